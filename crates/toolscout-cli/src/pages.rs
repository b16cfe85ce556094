//! `toolscout pages` commands: inspect the catalogue without starting a server.

use std::io::Write;

use toolscout_content::{Catalogue, ComparisonPage, Page, ToolReview};
use toolscout_core::{Error, Result};

use crate::cli::PagesAction;

/// Handle a pages subcommand, printing to stdout.
pub fn handle_pages_command(catalogue: &Catalogue, action: PagesAction) -> Result<()> {
    let mut out = std::io::stdout().lock();
    match action {
        PagesAction::List => cmd_pages_list(catalogue, &mut out),
        PagesAction::Show { slug } => cmd_pages_show(catalogue, &slug, &mut out),
    }
}

fn io_err(e: std::io::Error) -> Error {
    Error::config(format!("Failed to write output: {e}"))
}

/// One line per page: path, kind, title.
pub fn cmd_pages_list(catalogue: &Catalogue, out: &mut impl Write) -> Result<()> {
    for page in catalogue.pages() {
        writeln!(out, "{:<36} {:<11} {}", page.path(), page.kind(), page.title())
            .map_err(io_err)?;
    }
    writeln!(out, "{} pages", catalogue.len()).map_err(io_err)
}

/// Summary of a single page.
pub fn cmd_pages_show(catalogue: &Catalogue, slug: &str, out: &mut impl Write) -> Result<()> {
    let page = catalogue
        .get(slug)
        .ok_or_else(|| Error::config(format!("No page with slug '{slug}'")))?;
    match page {
        Page::Review(review) => show_review(catalogue, review, out),
        Page::Comparison(comparison) => show_comparison(comparison, out),
    }
    .map_err(io_err)
}

fn show_review(
    catalogue: &Catalogue,
    review: &ToolReview,
    out: &mut impl Write,
) -> std::io::Result<()> {
    writeln!(out, "{} ({})", review.name, review.category)?;
    writeln!(out, "{}", review.tagline)?;
    writeln!(out, "path:        /tools/{}", review.slug)?;
    writeln!(out, "pricing:     {} tiers", review.pricing.len())?;
    writeln!(out, "tables:      {}", review.comparisons.len())?;
    writeln!(out, "faqs:        {}", review.faqs.len())?;
    for alt in &review.alternatives {
        let target = alt
            .href(|s| catalogue.has_review(s))
            .unwrap_or_else(|| "(unlinked)".to_string());
        writeln!(out, "alternative: {} -> {target}", alt.name)?;
    }
    Ok(())
}

fn show_comparison(page: &ComparisonPage, out: &mut impl Write) -> std::io::Result<()> {
    let board = &page.scoreboard;
    writeln!(out, "{}", page.title)?;
    writeln!(out, "{}", page.summary)?;
    writeln!(out, "path:        /compare/{}", page.slug)?;

    for (r, row) in board.rows().iter().enumerate() {
        let winner = board
            .row_winner(r)
            .and_then(|i| board.competitors().get(i))
            .map(String::as_str)
            .unwrap_or("-");
        writeln!(out, "  {:<24} winner: {winner}", row.category)?;
    }
    for (i, name) in board.competitors().iter().enumerate() {
        let avg = board.formatted_average(i).unwrap_or_else(|| "-".into());
        writeln!(out, "  {name:<24} average: {avg} ({} wins)", board.wins(i))?;
    }
    if let Some(name) = board.overall_winner().and_then(|i| board.competitors().get(i)) {
        writeln!(out, "overall:     {name}")?;
    }
    Ok(())
}
