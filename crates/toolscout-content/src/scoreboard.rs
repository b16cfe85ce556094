//! Comparison-page scoreboard.
//!
//! A scoreboard has a fixed list of competitors and a list of category
//! rows, each holding one score per competitor in competitor order.
//!
//! ```rust
//! use toolscout_content::scoreboard::{ScoreRow, Scoreboard};
//!
//! let board = Scoreboard::new(
//!     vec!["Rytr".into(), "Jasper".into()],
//!     vec![
//!         ScoreRow::new("Price", vec![9.0, 6.0]),
//!         ScoreRow::new("Output quality", vec![7.0, 9.0]),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(board.formatted_average(0).as_deref(), Some("8.0"));
//! assert_eq!(board.row_winner(1), Some(1));
//! ```

use serde::{Deserialize, Serialize};
use toolscout_core::{Error, Result};

/// One category row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    /// Category label ("Ease of use").
    pub category: String,
    /// One score per competitor, in competitor order.
    pub scores: Vec<f64>,
}

impl ScoreRow {
    /// Create a row.
    pub fn new(category: impl Into<String>, scores: Vec<f64>) -> Self {
        Self {
            category: category.into(),
            scores,
        }
    }
}

/// Raw scoreboard as written in page frontmatter, before validation.
#[derive(Clone, Debug, Deserialize)]
pub struct ScoreboardSpec {
    /// Competitor names.
    pub competitors: Vec<String>,
    /// Category rows.
    #[serde(default)]
    pub rows: Vec<ScoreRow>,
}

/// A validated scoreboard.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scoreboard {
    competitors: Vec<String>,
    rows: Vec<ScoreRow>,
}

impl TryFrom<ScoreboardSpec> for Scoreboard {
    type Error = Error;

    fn try_from(spec: ScoreboardSpec) -> Result<Self> {
        Scoreboard::new(spec.competitors, spec.rows)
    }
}

impl Scoreboard {
    /// Validate and build a scoreboard.
    ///
    /// Requires at least one competitor, one score per competitor in
    /// every row, and finite scores.
    pub fn new(competitors: Vec<String>, rows: Vec<ScoreRow>) -> Result<Self> {
        if competitors.is_empty() {
            return Err(Error::validation_field(
                "scoreboard.competitors",
                "at least one competitor is required",
            ));
        }
        for row in &rows {
            if row.scores.len() != competitors.len() {
                return Err(Error::validation_field(
                    "scoreboard.rows",
                    format!(
                        "row '{}' has {} scores, expected {}",
                        row.category,
                        row.scores.len(),
                        competitors.len()
                    ),
                ));
            }
            if let Some(bad) = row.scores.iter().find(|s| !s.is_finite()) {
                return Err(Error::validation_field(
                    "scoreboard.rows",
                    format!("row '{}' has non-finite score {bad}", row.category),
                ));
            }
        }
        Ok(Self { competitors, rows })
    }

    /// Competitor names in insertion order.
    pub fn competitors(&self) -> &[String] {
        &self.competitors
    }

    /// Category rows.
    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    /// Mean of a competitor's scores: sum divided by row count.
    ///
    /// `None` for an unknown competitor or a board without rows.
    pub fn average(&self, competitor: usize) -> Option<f64> {
        if competitor >= self.competitors.len() || self.rows.is_empty() {
            return None;
        }
        let sum: f64 = self.rows.iter().map(|r| r.scores[competitor]).sum();
        Some(sum / self.rows.len() as f64)
    }

    /// [`average`](Self::average) rendered with exactly one decimal place.
    pub fn formatted_average(&self, competitor: usize) -> Option<String> {
        self.average(competitor).map(|avg| format!("{avg:.1}"))
    }

    /// Index of the competitor with the strictly greatest score in `row`.
    /// Ties go to the earliest competitor.
    pub fn row_winner(&self, row: usize) -> Option<usize> {
        first_max(&self.rows.get(row)?.scores)
    }

    /// Competitor with the best average. Ties go to the earliest competitor.
    pub fn overall_winner(&self) -> Option<usize> {
        let averages: Vec<f64> = (0..self.competitors.len())
            .filter_map(|i| self.average(i))
            .collect();
        first_max(&averages)
    }

    /// Number of rows a competitor wins outright or by tie-break.
    pub fn wins(&self, competitor: usize) -> usize {
        (0..self.rows.len())
            .filter(|&r| self.row_winner(r) == Some(competitor))
            .count()
    }
}

/// Position of the first maximum; later equal values do not replace it.
fn first_max(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
