//! Page types: tool reviews and comparison pages.
//!
//! Each page file is parsed into a `*Frontmatter` struct straight from
//! TOML, then validated into the public page type.

use serde::{Deserialize, Serialize};
use toolscout_core::{Error, Result, normalize_slug};

use crate::faq::FaqEntry;
use crate::scoreboard::{Scoreboard, ScoreboardSpec};

/// A pricing plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Plan name ("Pro").
    pub name: String,
    /// Price as displayed ("$29").
    pub price: String,
    /// Billing period ("per month").
    #[serde(default)]
    pub billing: String,
    /// Bullet points.
    #[serde(default)]
    pub highlights: Vec<String>,
}

/// A highlighted feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    /// Feature title.
    pub title: String,
    /// One-line description.
    pub description: String,
}

/// A link to an alternative tool: another review in the catalogue
/// (`slug`) or an external site (`url`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeLink {
    /// Display name.
    pub name: String,
    /// Slug of a review in this catalogue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// External URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl AlternativeLink {
    fn validate(mut self) -> Result<Self> {
        match (&self.slug, &self.url) {
            (Some(_), Some(_)) | (None, None) => Err(Error::validation_field(
                "alternatives",
                format!("'{}' needs exactly one of slug or url", self.name),
            )),
            _ => {
                self.slug = self.slug.as_deref().map(normalize_slug);
                Ok(self)
            }
        }
    }

    /// Link target, or `None` for a slug that does not resolve.
    pub fn href(&self, slug_exists: impl Fn(&str) -> bool) -> Option<String> {
        match (&self.slug, &self.url) {
            (Some(slug), _) if slug_exists(slug) => Some(format!("/tools/{slug}")),
            (Some(_), _) => None,
            (None, url) => url.clone(),
        }
    }
}

/// A literal comparison table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonTable {
    /// Table caption.
    pub title: String,
    /// Header cells.
    pub columns: Vec<String>,
    /// Body rows, each exactly `columns.len()` cells wide.
    pub rows: Vec<Vec<String>>,
}

impl ComparisonTable {
    /// Validate and build a table.
    pub fn new(title: String, columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::validation_field(
                "comparisons.columns",
                format!("table '{title}' has no columns"),
            ));
        }
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(Error::validation_field(
                "comparisons.rows",
                format!(
                    "table '{title}' row {i} has {} cells, expected {}",
                    row.len(),
                    columns.len()
                ),
            ));
        }
        Ok(Self {
            title,
            columns,
            rows,
        })
    }

    fn validate(self) -> Result<Self> {
        Self::new(self.title, self.columns, self.rows)
    }
}

// ============================================================================
// Tool review
// ============================================================================

/// Frontmatter of a review file.
#[derive(Debug, Deserialize)]
pub struct ReviewFrontmatter {
    /// Explicit slug; defaults to the file stem.
    pub slug: Option<String>,
    /// Tool name.
    pub name: String,
    /// One-line pitch.
    #[serde(default)]
    pub tagline: String,
    /// Product category.
    #[serde(default)]
    pub category: String,
    /// Vendor site.
    pub website: Option<String>,
    /// Pricing plans.
    #[serde(default)]
    pub pricing: Vec<PricingTier>,
    /// Highlighted features.
    #[serde(default)]
    pub features: Vec<Feature>,
    /// Pros.
    #[serde(default)]
    pub pros: Vec<String>,
    /// Cons.
    #[serde(default)]
    pub cons: Vec<String>,
    /// FAQ entries.
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
    /// Alternative tools.
    #[serde(default)]
    pub alternatives: Vec<AlternativeLink>,
    /// Comparison tables.
    #[serde(default)]
    pub comparisons: Vec<ComparisonTable>,
}

/// A tool review page.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ToolReview {
    /// URL slug.
    pub slug: String,
    /// Tool name.
    pub name: String,
    /// One-line pitch.
    pub tagline: String,
    /// Product category.
    pub category: String,
    /// Vendor site.
    pub website: Option<String>,
    /// Pricing plans.
    pub pricing: Vec<PricingTier>,
    /// Highlighted features.
    pub features: Vec<Feature>,
    /// Pros.
    pub pros: Vec<String>,
    /// Cons.
    pub cons: Vec<String>,
    /// FAQ entries.
    pub faqs: Vec<FaqEntry>,
    /// Alternative tools.
    pub alternatives: Vec<AlternativeLink>,
    /// Comparison tables.
    pub comparisons: Vec<ComparisonTable>,
    /// Markdown body.
    pub body: String,
}

impl ToolReview {
    /// Validate frontmatter and attach the body.
    pub fn from_parts(fm: ReviewFrontmatter, fallback_slug: &str, body: &str) -> Result<Self> {
        let slug = resolve_slug(fm.slug.as_deref(), fallback_slug)?;
        if fm.name.trim().is_empty() {
            return Err(Error::validation_field("name", "must not be empty"));
        }
        Ok(Self {
            slug,
            name: fm.name,
            tagline: fm.tagline,
            category: fm.category,
            website: fm.website,
            pricing: fm.pricing,
            features: fm.features,
            pros: fm.pros,
            cons: fm.cons,
            faqs: fm.faqs,
            alternatives: fm
                .alternatives
                .into_iter()
                .map(AlternativeLink::validate)
                .collect::<Result<_>>()?,
            comparisons: fm
                .comparisons
                .into_iter()
                .map(ComparisonTable::validate)
                .collect::<Result<_>>()?,
            body: body.to_string(),
        })
    }
}

// ============================================================================
// Comparison page
// ============================================================================

/// Frontmatter of a comparison file.
#[derive(Debug, Deserialize)]
pub struct ComparisonFrontmatter {
    /// Explicit slug; defaults to the file stem.
    pub slug: Option<String>,
    /// Page title.
    pub title: String,
    /// Short summary.
    #[serde(default)]
    pub summary: String,
    /// Scoreboard.
    pub scoreboard: ScoreboardSpec,
    /// Comparison tables.
    #[serde(default)]
    pub comparisons: Vec<ComparisonTable>,
    /// FAQ entries.
    #[serde(default)]
    pub faqs: Vec<FaqEntry>,
    /// Alternative tools.
    #[serde(default)]
    pub alternatives: Vec<AlternativeLink>,
}

/// A head-to-head comparison page with a scoreboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComparisonPage {
    /// URL slug.
    pub slug: String,
    /// Page title.
    pub title: String,
    /// Short summary.
    pub summary: String,
    /// Scoreboard.
    pub scoreboard: Scoreboard,
    /// Comparison tables.
    pub comparisons: Vec<ComparisonTable>,
    /// FAQ entries.
    pub faqs: Vec<FaqEntry>,
    /// Alternative tools.
    pub alternatives: Vec<AlternativeLink>,
    /// Markdown body.
    pub body: String,
}

impl ComparisonPage {
    /// Validate frontmatter and attach the body.
    pub fn from_parts(fm: ComparisonFrontmatter, fallback_slug: &str, body: &str) -> Result<Self> {
        let slug = resolve_slug(fm.slug.as_deref(), fallback_slug)?;
        Ok(Self {
            slug,
            title: fm.title,
            summary: fm.summary,
            scoreboard: Scoreboard::try_from(fm.scoreboard)?,
            comparisons: fm
                .comparisons
                .into_iter()
                .map(ComparisonTable::validate)
                .collect::<Result<_>>()?,
            faqs: fm.faqs,
            alternatives: fm
                .alternatives
                .into_iter()
                .map(AlternativeLink::validate)
                .collect::<Result<_>>()?,
            body: body.to_string(),
        })
    }
}

// ============================================================================
// Page
// ============================================================================

/// Either kind of page.
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    /// `/tools/{slug}`
    Review(ToolReview),
    /// `/compare/{slug}`
    Comparison(ComparisonPage),
}

/// Page kind, as shown in listings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    /// Tool review.
    Review,
    /// Comparison.
    Comparison,
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageKind::Review => write!(f, "review"),
            PageKind::Comparison => write!(f, "comparison"),
        }
    }
}

impl Page {
    /// URL slug.
    pub fn slug(&self) -> &str {
        match self {
            Page::Review(r) => &r.slug,
            Page::Comparison(c) => &c.slug,
        }
    }

    /// Display title.
    pub fn title(&self) -> &str {
        match self {
            Page::Review(r) => &r.name,
            Page::Comparison(c) => &c.title,
        }
    }

    /// Page kind.
    pub fn kind(&self) -> PageKind {
        match self {
            Page::Review(_) => PageKind::Review,
            Page::Comparison(_) => PageKind::Comparison,
        }
    }

    /// Canonical path.
    pub fn path(&self) -> String {
        match self {
            Page::Review(r) => format!("/tools/{}", r.slug),
            Page::Comparison(c) => format!("/compare/{}", c.slug),
        }
    }

    /// FAQ entries.
    pub fn faqs(&self) -> &[FaqEntry] {
        match self {
            Page::Review(r) => &r.faqs,
            Page::Comparison(c) => &c.faqs,
        }
    }

    /// Alternative links.
    pub fn alternatives(&self) -> &[AlternativeLink] {
        match self {
            Page::Review(r) => &r.alternatives,
            Page::Comparison(c) => &c.alternatives,
        }
    }

    /// Markdown body.
    pub fn body(&self) -> &str {
        match self {
            Page::Review(r) => &r.body,
            Page::Comparison(c) => &c.body,
        }
    }
}

fn resolve_slug(explicit: Option<&str>, fallback: &str) -> Result<String> {
    let slug = normalize_slug(explicit.unwrap_or(fallback));
    if slug.is_empty() {
        return Err(Error::validation_field("slug", "resolves to an empty slug"));
    }
    Ok(slug)
}
