//! Askama templates and the view data they render.
//!
//! Page values are borrowed straight from the catalogue; only derived
//! data (rendered markdown, FAQ links, scoreboard cells) is built per
//! request.

use askama::Template;
use toolscout_connect::{ConnectState, PageOption};
use toolscout_content::{
    AlternativeLink, Catalogue, ComparisonPage, FaqAccordion, FaqEntry, Scoreboard, ToolReview,
    extract_first_paragraph, render_html,
};

/// Max blurb length on the index page.
const BLURB_CHARS: usize = 160;

// ============================================================================
// Shared pieces
// ============================================================================

/// One FAQ entry with its open flag and toggle link.
pub struct FaqView {
    /// Question text.
    pub question: String,
    /// Answer text.
    pub answer: String,
    /// Whether the answer is shown.
    pub open: bool,
    /// URL that flips this entry and keeps the others as they are.
    pub toggle_href: String,
}

/// Build FAQ views for a page at `path` in the given accordion state.
pub fn faq_views(path: &str, faqs: &[FaqEntry], accordion: &FaqAccordion) -> Vec<FaqView> {
    faqs.iter()
        .enumerate()
        .map(|(i, faq)| {
            let query = accordion.query_with_toggled(i);
            let toggle_href = if query.is_empty() {
                format!("{path}#faq-{i}")
            } else {
                format!("{path}?open={query}#faq-{i}")
            };
            FaqView {
                question: faq.question.clone(),
                answer: faq.answer.clone(),
                open: accordion.is_open(i).unwrap_or(false),
                toggle_href,
            }
        })
        .collect()
}

/// An alternative-tool link. `href` is `None` for a dangling slug.
pub struct AltView {
    /// Display name.
    pub name: String,
    /// Link target.
    pub href: Option<String>,
}

fn alt_views(alternatives: &[AlternativeLink], catalogue: &Catalogue) -> Vec<AltView> {
    alternatives
        .iter()
        .map(|alt| AltView {
            name: alt.name.clone(),
            href: alt.href(|slug| catalogue.has_review(slug)),
        })
        .collect()
}

// ============================================================================
// Index
// ============================================================================

/// A link on the index page.
pub struct IndexEntry {
    /// Link text.
    pub title: String,
    /// Target path.
    pub href: String,
    /// One-line description.
    pub blurb: String,
}

/// `/`
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Page title.
    pub title: String,
    /// Tool reviews.
    pub reviews: Vec<IndexEntry>,
    /// Comparisons.
    pub comparisons: Vec<IndexEntry>,
}

impl IndexTemplate {
    /// Build the index from the whole catalogue.
    pub fn new(catalogue: &Catalogue) -> Self {
        let reviews = catalogue
            .reviews()
            .map(|r| IndexEntry {
                title: r.name.clone(),
                href: format!("/tools/{}", r.slug),
                blurb: if r.tagline.is_empty() {
                    extract_first_paragraph(&r.body, BLURB_CHARS).unwrap_or_default()
                } else {
                    r.tagline.clone()
                },
            })
            .collect();
        let comparisons = catalogue
            .comparisons()
            .map(|c| IndexEntry {
                title: c.title.clone(),
                href: format!("/compare/{}", c.slug),
                blurb: if c.summary.is_empty() {
                    extract_first_paragraph(&c.body, BLURB_CHARS).unwrap_or_default()
                } else {
                    c.summary.clone()
                },
            })
            .collect();
        Self {
            title: "Toolscout".to_string(),
            reviews,
            comparisons,
        }
    }
}

// ============================================================================
// Review
// ============================================================================

/// `/tools/{slug}`
#[derive(Template)]
#[template(path = "review.html")]
pub struct ReviewTemplate<'a> {
    /// Page title.
    pub title: String,
    /// The review.
    pub review: &'a ToolReview,
    /// Rendered markdown body.
    pub body_html: String,
    /// FAQ entries.
    pub faqs: Vec<FaqView>,
    /// Alternative links.
    pub alternatives: Vec<AltView>,
}

impl<'a> ReviewTemplate<'a> {
    /// Build the view for a review with the given FAQ state.
    pub fn new(review: &'a ToolReview, accordion: &FaqAccordion, catalogue: &Catalogue) -> Self {
        let path = format!("/tools/{}", review.slug);
        Self {
            title: format!("{} review", review.name),
            review,
            body_html: render_html(&review.body),
            faqs: faq_views(&path, &review.faqs, accordion),
            alternatives: alt_views(&review.alternatives, catalogue),
        }
    }
}

// ============================================================================
// Comparison
// ============================================================================

/// A competitor column of the scoreboard.
pub struct CompetitorView {
    /// Competitor name.
    pub name: String,
    /// Average, one decimal place; empty without rows.
    pub average: String,
    /// Rows won.
    pub wins: usize,
    /// Best average overall.
    pub overall: bool,
}

/// One score cell.
pub struct CellView {
    /// Score, one decimal place.
    pub score: String,
    /// Row winner.
    pub winner: bool,
}

/// One category row.
pub struct RowView {
    /// Category label.
    pub category: String,
    /// One cell per competitor.
    pub cells: Vec<CellView>,
}

/// Scoreboard ready to render.
pub struct ScoreboardView {
    /// Competitor columns.
    pub competitors: Vec<CompetitorView>,
    /// Category rows.
    pub rows: Vec<RowView>,
}

impl From<&Scoreboard> for ScoreboardView {
    fn from(board: &Scoreboard) -> Self {
        let overall = board.overall_winner();
        let competitors = board
            .competitors()
            .iter()
            .enumerate()
            .map(|(i, name)| CompetitorView {
                name: name.clone(),
                average: board.formatted_average(i).unwrap_or_default(),
                wins: board.wins(i),
                overall: overall == Some(i),
            })
            .collect();
        let rows = board
            .rows()
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let winner = board.row_winner(r);
                RowView {
                    category: row.category.clone(),
                    cells: row
                        .scores
                        .iter()
                        .enumerate()
                        .map(|(i, score)| CellView {
                            score: format!("{score:.1}"),
                            winner: winner == Some(i),
                        })
                        .collect(),
                }
            })
            .collect();
        Self { competitors, rows }
    }
}

/// `/compare/{slug}`
#[derive(Template)]
#[template(path = "comparison.html")]
pub struct ComparisonTemplate<'a> {
    /// Page title.
    pub title: String,
    /// The comparison.
    pub page: &'a ComparisonPage,
    /// Scoreboard.
    pub board: ScoreboardView,
    /// Rendered markdown body.
    pub body_html: String,
    /// FAQ entries.
    pub faqs: Vec<FaqView>,
    /// Alternative links.
    pub alternatives: Vec<AltView>,
}

impl<'a> ComparisonTemplate<'a> {
    /// Build the view for a comparison with the given FAQ state.
    pub fn new(
        page: &'a ComparisonPage,
        accordion: &FaqAccordion,
        catalogue: &Catalogue,
    ) -> Self {
        let path = format!("/compare/{}", page.slug);
        Self {
            title: page.title.clone(),
            page,
            board: ScoreboardView::from(&page.scoreboard),
            body_html: render_html(&page.body),
            faqs: faq_views(&path, &page.faqs, accordion),
            alternatives: alt_views(&page.alternatives, catalogue),
        }
    }
}

// ============================================================================
// Connect
// ============================================================================

/// `/connect/instagram/callback` and `/connect/instagram/select`
#[derive(Template)]
#[template(path = "connect.html")]
pub struct ConnectTemplate {
    /// Page title.
    pub title: String,
    /// `loading`, `error`, `needs_selection` or `success`.
    pub status: &'static str,
    /// Error line.
    pub message: String,
    /// Pages to choose from.
    pub pages: Vec<PageChoice>,
    /// Correlation token for the selection form.
    pub token: String,
    /// Link target after success.
    pub dashboard_url: String,
}

/// A selectable page.
pub struct PageChoice {
    /// `page_id` value.
    pub id: String,
    /// Button label.
    pub label: String,
}

impl From<&PageOption> for PageChoice {
    fn from(option: &PageOption) -> Self {
        Self {
            id: option.id.clone(),
            label: option.label(),
        }
    }
}

impl ConnectTemplate {
    /// Build the view for a flow state.
    pub fn new(state: &ConnectState, dashboard_url: &str) -> Self {
        let (message, pages, token) = match state {
            ConnectState::Error { message, .. } => (message.clone(), Vec::new(), String::new()),
            ConnectState::NeedsSelection { pages, state } => (
                String::new(),
                pages.iter().map(PageChoice::from).collect(),
                state.clone(),
            ),
            ConnectState::Loading | ConnectState::Success => {
                (String::new(), Vec::new(), String::new())
            }
        };
        Self {
            title: "Connect Instagram".to_string(),
            status: state.name(),
            message,
            pages,
            token,
            dashboard_url: dashboard_url.to_string(),
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    /// Page title (status reason).
    pub title: String,
    /// Error text.
    pub message: String,
}
