//! TOML frontmatter extraction from markdown page files.
//!
//! Page files carry their structured data (pricing tiers, FAQs, comparison
//! tables) in a TOML block delimited by `+++`:
//!
//! ```markdown
//! +++
//! name = "Rytr"
//! category = "AI writing"
//!
//! [[faqs]]
//! question = "Is there a free plan?"
//! answer = "Yes, 10k characters a month."
//! +++
//!
//! Rytr is an AI writing assistant...
//! ```
//!
//! # Usage
//!
//! ```rust
//! use serde::Deserialize;
//! use toolscout_content::frontmatter::extract_frontmatter;
//!
//! #[derive(Deserialize)]
//! struct Meta {
//!     name: String,
//! }
//!
//! let content = "+++\nname = \"Rytr\"\n+++\n\nBody";
//! let result = extract_frontmatter(content);
//!
//! assert!(result.has_frontmatter());
//! let meta: Meta = result.deserialize().unwrap().unwrap();
//! assert_eq!(meta.name, "Rytr");
//! assert_eq!(result.body().trim(), "Body");
//! ```

use serde::de::DeserializeOwned;
use toml::Table;

/// Frontmatter delimiter line.
pub const DELIMITER: &str = "+++";

/// Result of frontmatter extraction.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    /// Parsed TOML table, if present and valid.
    table: Option<Table>,
    /// Body content after the closing delimiter.
    body: &'a str,
    /// Parse error message when delimiters were found but the TOML was bad.
    parse_error: Option<String>,
}

impl<'a> FrontmatterResult<'a> {
    fn with_frontmatter(table: Table, body: &'a str) -> Self {
        Self {
            table: Some(table),
            body,
            parse_error: None,
        }
    }

    fn without_frontmatter(body: &'a str) -> Self {
        Self {
            table: None,
            body,
            parse_error: None,
        }
    }

    fn with_invalid_frontmatter(body: &'a str, error: String) -> Self {
        Self {
            table: None,
            body,
            parse_error: Some(error),
        }
    }

    /// Check if valid frontmatter was found and parsed.
    pub fn has_frontmatter(&self) -> bool {
        self.table.is_some()
    }

    /// The TOML parse error, if the block between the delimiters was invalid.
    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    /// Get the body content (everything after frontmatter).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Deserialize the frontmatter into a specific type.
    ///
    /// Returns `Ok(None)` if no frontmatter was found.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<Option<T>, toml::de::Error> {
        match &self.table {
            Some(table) => {
                let parsed: T = toml::Value::Table(table.clone()).try_into()?;
                Ok(Some(parsed))
            }
            None => Ok(None),
        }
    }
}

/// Extract TOML frontmatter from page content.
///
/// - No opening `+++` line: body returned as-is, `has_frontmatter() == false`
/// - Opening but no closing delimiter: treated as no frontmatter
/// - Invalid TOML: logs a warning, body is everything after the closing `+++`
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    if !content.starts_with(DELIMITER) {
        return FrontmatterResult::without_frontmatter(content);
    }

    let after_first_delimiter = match content[DELIMITER.len()..].find('\n') {
        Some(pos) => &content[DELIMITER.len() + pos + 1..],
        None => return FrontmatterResult::without_frontmatter(content),
    };

    let (toml_content, body_after_closing) =
        if let Some(rest) = after_first_delimiter.strip_prefix(DELIMITER) {
            ("", rest)
        } else if let Some(closing_pos) = after_first_delimiter.find("\n+++") {
            (
                &after_first_delimiter[..closing_pos],
                &after_first_delimiter[closing_pos + 1 + DELIMITER.len()..],
            )
        } else {
            log::warn!("Frontmatter opening delimiter found but no closing delimiter");
            return FrontmatterResult::without_frontmatter(content);
        };

    let body = body_after_closing
        .strip_prefix("\r\n")
        .or_else(|| body_after_closing.strip_prefix('\n'))
        .unwrap_or(body_after_closing);

    match toml_content.trim_end_matches('\r').parse::<Table>() {
        Ok(table) => FrontmatterResult::with_frontmatter(table, body),
        Err(e) => {
            log::warn!("Failed to parse frontmatter TOML: {e}");
            FrontmatterResult::with_invalid_frontmatter(body, e.to_string())
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
