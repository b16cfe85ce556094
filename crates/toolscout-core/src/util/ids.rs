//! Slug normalization.
//!
//! Page slugs appear in URLs (`/tools/{slug}`, `/compare/{slug}`) and in
//! alternative-tool links, so every slug goes through [`normalize_slug`]
//! before it is stored or looked up.

use std::path::Path;

/// Normalize a name to a lowercase, hyphen-separated URL slug.
///
/// 1. Trims and lowercases
/// 2. Treats underscores, whitespace and `/` as separators
/// 3. Drops any other character that is not ASCII alphanumeric or `-`
/// 4. Collapses runs of separators into a single hyphen
///
/// # Examples
///
/// ```
/// use toolscout_core::util::ids::normalize_slug;
///
/// assert_eq!(normalize_slug("Appwrite Review"), "appwrite-review");
/// assert_eq!(normalize_slug("rytr_vs_jasper"), "rytr-vs-jasper");
/// assert_eq!(normalize_slug("Salesforce vs. HubSpot"), "salesforce-vs-hubspot");
/// assert_eq!(normalize_slug("  --Mixed   Case--  "), "mixed-case");
/// ```
pub fn normalize_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '_' | '/' => ' ',
            '-' => ' ',
            c if c.is_whitespace() => ' ',
            c => c,
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == ' ')
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Compute a slug from a file path's stem.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use toolscout_core::util::ids::slug_from_path;
///
/// assert_eq!(
///     slug_from_path(Path::new("content/reviews/Appwrite.md")),
///     Some("appwrite".to_string())
/// );
/// assert_eq!(slug_from_path(Path::new("/")), None);
/// ```
pub fn slug_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(normalize_slug)
        .filter(|s| !s.is_empty())
}
