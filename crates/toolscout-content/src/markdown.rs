//! Markdown rendering for page bodies.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, html};

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

/// Render a markdown body to HTML.
///
/// Raw HTML in the source is passed through unchanged; page files are
/// trusted, repository-owned content.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Extract the first paragraph as plain text, truncated to `max_chars`
/// characters (with a trailing `…` when cut).
///
/// Used for the catalogue index blurbs.
///
/// ```rust
/// use toolscout_content::markdown::extract_first_paragraph;
///
/// let md = "# Rytr\n\nRytr is an **AI** writer.\n\nMore.";
/// assert_eq!(extract_first_paragraph(md, 100).as_deref(), Some("Rytr is an AI writer."));
/// ```
pub fn extract_first_paragraph(markdown: &str, max_chars: usize) -> Option<String> {
    let mut in_paragraph = false;
    let mut text = String::new();

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                if in_paragraph && !text.trim().is_empty() {
                    return Some(truncate(text.trim(), max_chars));
                }
                in_paragraph = false;
            }
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }
    None
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
