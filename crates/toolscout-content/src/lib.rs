//! Tool review and comparison pages.
//!
//! Pages are markdown files with a TOML frontmatter block holding the
//! structured copy (pricing, features, FAQs, tables, scoreboard). This crate
//! parses them into immutable page values and provides the two pieces of
//! page logic: the FAQ accordion and the comparison scoreboard.
//!
//! # Modules
//!
//! - [`frontmatter`]: `+++` TOML frontmatter extraction
//! - [`markdown`]: body rendering and blurb extraction
//! - [`faq`]: FAQ entries and independent open/closed state
//! - [`scoreboard`]: averages and per-category winners
//! - [`page`]: review and comparison page types
//! - [`catalogue`]: loading and looking up pages
//!
//! # Example
//!
//! ```rust
//! use toolscout_content::Catalogue;
//!
//! let catalogue = Catalogue::embedded().unwrap();
//! let page = catalogue.comparison("rytr-vs-jasper").unwrap();
//! let board = &page.scoreboard;
//! let winner = board.overall_winner().unwrap();
//! println!("{} wins", board.competitors()[winner]);
//! ```

pub mod catalogue;
pub mod faq;
pub mod frontmatter;
pub mod markdown;
pub mod page;
pub mod scoreboard;

pub use catalogue::{Catalogue, parse_page};
pub use faq::{FaqAccordion, FaqEntry};
pub use frontmatter::{FrontmatterResult, extract_frontmatter};
pub use markdown::{extract_first_paragraph, render_html};
pub use page::{
    AlternativeLink, ComparisonPage, ComparisonTable, Feature, Page, PageKind, PricingTier,
    ToolReview,
};
pub use scoreboard::{ScoreRow, Scoreboard};
