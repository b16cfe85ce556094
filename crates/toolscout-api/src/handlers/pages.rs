//! Content page handlers.

use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::Uri;
use axum::response::Html;
use toolscout_content::FaqAccordion;

use crate::error::{ApiError, HtmlError};
use crate::state::AppState;
use crate::views::{ComparisonTemplate, IndexTemplate, ReviewTemplate};

/// FAQ entries to show expanded, from `?open=0,2` or `?open=0&open=2`.
#[derive(Debug, Default)]
pub struct FaqQuery {
    /// Every `open` value, in order.
    pub open: Vec<String>,
}

impl FaqQuery {
    /// Collect the `open` values from decoded query pairs.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            open: pairs
                .into_iter()
                .filter(|(key, _)| key == "open")
                .map(|(_, value)| value)
                .collect(),
        }
    }

    /// Accordion state for a page with `len` entries.
    pub fn accordion(&self, len: usize) -> FaqAccordion {
        FaqAccordion::from_query(len, &self.open.join(","))
    }
}

/// `GET /`
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, HtmlError> {
    Ok(Html(IndexTemplate::new(&state.catalogue).render()?))
}

/// `GET /tools/{slug}`
pub async fn review(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, HtmlError> {
    let query = FaqQuery::from_pairs(pairs);
    let review = state
        .catalogue
        .review(&slug)
        .ok_or_else(|| ApiError::not_found("review", &slug))?;
    let accordion = query.accordion(review.faqs.len());
    tracing::debug!(slug = %slug, open = ?accordion.open_indices(), "Rendering review");
    Ok(Html(
        ReviewTemplate::new(review, &accordion, &state.catalogue).render()?,
    ))
}

/// `GET /compare/{slug}`
pub async fn comparison(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, HtmlError> {
    let query = FaqQuery::from_pairs(pairs);
    let page = state
        .catalogue
        .comparison(&slug)
        .ok_or_else(|| ApiError::not_found("comparison", &slug))?;
    let accordion = query.accordion(page.faqs.len());
    tracing::debug!(slug = %slug, open = ?accordion.open_indices(), "Rendering comparison");
    Ok(Html(
        ComparisonTemplate::new(page, &accordion, &state.catalogue).render()?,
    ))
}

/// Fallback for unknown paths.
pub async fn not_found(uri: Uri) -> HtmlError {
    ApiError::not_found("page", uri.path()).into_html()
}
