//! The page catalogue.
//!
//! Pages live in two folders, `reviews/` and `comparisons/`, one markdown
//! file per page. The built-in set is compiled into the binary; a content
//! directory with the same layout can replace it at startup.

use std::collections::BTreeMap;
use std::path::Path;

use toolscout_core::{ContentConfig, Error, Result, slug_from_path};

use crate::frontmatter::extract_frontmatter;
use crate::page::{
    ComparisonFrontmatter, ComparisonPage, Page, PageKind, ReviewFrontmatter, ToolReview,
};

/// Built-in pages: `(relative path, contents)`.
const EMBEDDED: &[(&str, &str)] = &[
    (
        "reviews/appwrite.md",
        include_str!("../content/reviews/appwrite.md"),
    ),
    (
        "reviews/salesforce.md",
        include_str!("../content/reviews/salesforce.md"),
    ),
    (
        "reviews/hubspot.md",
        include_str!("../content/reviews/hubspot.md"),
    ),
    ("reviews/rytr.md", include_str!("../content/reviews/rytr.md")),
    (
        "reviews/jasper.md",
        include_str!("../content/reviews/jasper.md"),
    ),
    (
        "comparisons/rytr-vs-jasper.md",
        include_str!("../content/comparisons/rytr-vs-jasper.md"),
    ),
    (
        "comparisons/salesforce-vs-hubspot.md",
        include_str!("../content/comparisons/salesforce-vs-hubspot.md"),
    ),
];

/// Parse one page file.
///
/// `path` decides the kind (`reviews/` or `comparisons/` parent folder)
/// and supplies the fallback slug.
pub fn parse_page(path: &Path, content: &str) -> Result<Page> {
    let kind = kind_for_path(path)
        .ok_or_else(|| Error::content(path, "not under reviews/ or comparisons/"))?;
    let fallback_slug =
        slug_from_path(path).ok_or_else(|| Error::content(path, "cannot derive a slug"))?;

    let fm = extract_frontmatter(content);
    if let Some(err) = fm.parse_error() {
        return Err(Error::content(path, format!("invalid frontmatter: {err}")));
    }
    if !fm.has_frontmatter() {
        return Err(Error::content(path, "missing +++ frontmatter block"));
    }

    let page = match kind {
        PageKind::Review => {
            let meta: ReviewFrontmatter = fm
                .deserialize()
                .map_err(|e| Error::content(path, e.to_string()))?
                .ok_or_else(|| Error::content(path, "missing frontmatter"))?;
            Page::Review(
                ToolReview::from_parts(meta, &fallback_slug, fm.body())
                    .map_err(|e| Error::content(path, e.to_string()))?,
            )
        }
        PageKind::Comparison => {
            let meta: ComparisonFrontmatter = fm
                .deserialize()
                .map_err(|e| Error::content(path, e.to_string()))?
                .ok_or_else(|| Error::content(path, "missing frontmatter"))?;
            Page::Comparison(
                ComparisonPage::from_parts(meta, &fallback_slug, fm.body())
                    .map_err(|e| Error::content(path, e.to_string()))?,
            )
        }
    };
    Ok(page)
}

fn kind_for_path(path: &Path) -> Option<PageKind> {
    let parent = path.parent()?.file_name()?.to_str()?;
    match parent {
        "reviews" => Some(PageKind::Review),
        "comparisons" => Some(PageKind::Comparison),
        _ => None,
    }
}

/// All pages, indexed by slug.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    pages: BTreeMap<String, Page>,
}

impl Catalogue {
    /// Build from `(path, contents)` pairs. Slugs must be unique.
    pub fn from_sources<'a, I, P>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, &'a str)>,
        P: AsRef<Path>,
    {
        let mut pages = BTreeMap::new();
        for (path, content) in sources {
            let path = path.as_ref();
            let page = parse_page(path, content)?;
            let slug = page.slug().to_string();
            if pages.contains_key(&slug) {
                return Err(Error::content(path, format!("duplicate slug '{slug}'")));
            }
            log::debug!("Loaded {} page '{}' from {}", page.kind(), slug, path.display());
            pages.insert(slug, page);
        }
        let catalogue = Self { pages };
        catalogue.warn_dangling_alternatives();
        Ok(catalogue)
    }

    /// The pages compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_sources(EMBEDDED.iter().map(|(path, content)| (*path, *content)))
    }

    /// Load every `reviews/*.md` and `comparisons/*.md` under `dir`.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::config(format!(
                "Content directory does not exist: {}",
                dir.display()
            )));
        }

        let mut files = Vec::new();
        for sub in ["reviews", "comparisons"] {
            let pattern = dir.join(sub).join("*.md");
            let pattern = pattern.to_string_lossy();
            let entries = glob::glob(&pattern)
                .map_err(|e| Error::config(format!("Bad content pattern {pattern}: {e}")))?;
            for entry in entries {
                let path = entry.map_err(|e| {
                    let path = e.path().to_path_buf();
                    Error::io_with_path(e.into(), path)
                })?;
                let content =
                    std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
                files.push((path, content));
            }
        }

        log::info!("Loading {} page files from {}", files.len(), dir.display());
        Self::from_sources(files.iter().map(|(p, c)| (p.as_path(), c.as_str())))
    }

    /// The configured directory if set, otherwise the built-in pages.
    pub fn from_config(config: &ContentConfig) -> Result<Self> {
        match &config.dir {
            Some(dir) => Self::load_dir(dir),
            None => Self::embedded(),
        }
    }

    /// Look up any page.
    pub fn get(&self, slug: &str) -> Option<&Page> {
        self.pages.get(slug)
    }

    /// Look up a review.
    pub fn review(&self, slug: &str) -> Option<&ToolReview> {
        match self.pages.get(slug)? {
            Page::Review(r) => Some(r),
            Page::Comparison(_) => None,
        }
    }

    /// Look up a comparison.
    pub fn comparison(&self, slug: &str) -> Option<&ComparisonPage> {
        match self.pages.get(slug)? {
            Page::Comparison(c) => Some(c),
            Page::Review(_) => None,
        }
    }

    /// Whether `slug` names a review.
    pub fn has_review(&self, slug: &str) -> bool {
        self.review(slug).is_some()
    }

    /// All pages in slug order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// All reviews in slug order.
    pub fn reviews(&self) -> impl Iterator<Item = &ToolReview> {
        self.pages.values().filter_map(|p| match p {
            Page::Review(r) => Some(r),
            Page::Comparison(_) => None,
        })
    }

    /// All comparisons in slug order.
    pub fn comparisons(&self) -> impl Iterator<Item = &ComparisonPage> {
        self.pages.values().filter_map(|p| match p {
            Page::Comparison(c) => Some(c),
            Page::Review(_) => None,
        })
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the catalogue is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// `(page slug, alternative slug)` for every internal link that does
    /// not resolve to a review.
    pub fn dangling_alternatives(&self) -> Vec<(String, String)> {
        self.pages
            .values()
            .flat_map(|page| {
                page.alternatives()
                    .iter()
                    .filter_map(|alt| alt.slug.as_deref())
                    .filter(|slug| !self.has_review(slug))
                    .map(|slug| (page.slug().to_string(), slug.to_string()))
            })
            .collect()
    }

    fn warn_dangling_alternatives(&self) {
        for (page, target) in self.dangling_alternatives() {
            log::warn!("Page '{page}' links to unknown alternative '{target}'");
        }
    }
}
