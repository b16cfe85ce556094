//! FAQ entries and the per-page accordion state.
//!
//! Every entry has its own open/closed flag. Opening one entry never
//! closes another; the accordion is a set of independent booleans, not a
//! mutually exclusive group.

use serde::{Deserialize, Serialize};

/// A single question/answer pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// The question, shown as the accordion header.
    pub question: String,
    /// The answer, shown when the entry is open.
    pub answer: String,
}

/// Open/closed state for a page's FAQ list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FaqAccordion {
    open: Vec<bool>,
}

impl FaqAccordion {
    /// All `len` entries closed.
    pub fn closed(len: usize) -> Self {
        Self {
            open: vec![false; len],
        }
    }

    /// Build from a set of open indices. Indices `>= len` are ignored.
    pub fn with_open(len: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut accordion = Self::closed(len);
        for i in indices {
            accordion.open(i);
        }
        accordion
    }

    /// Parse the `?open=` query value (`"0,3"`). Blank or non-numeric
    /// parts are skipped.
    pub fn from_query(len: usize, value: &str) -> Self {
        Self::with_open(
            len,
            value
                .split(',')
                .filter_map(|part| part.trim().parse::<usize>().ok()),
        )
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Whether entry `index` is open. `None` when out of range.
    pub fn is_open(&self, index: usize) -> Option<bool> {
        self.open.get(index).copied()
    }

    /// Flip entry `index` and return its new state.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.open.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    /// Open entry `index`. Returns `false` when out of range.
    pub fn open(&mut self, index: usize) -> bool {
        self.set(index, true)
    }

    /// Close entry `index`. Returns `false` when out of range.
    pub fn close(&mut self, index: usize) -> bool {
        self.set(index, false)
    }

    fn set(&mut self, index: usize, value: bool) -> bool {
        match self.open.get_mut(index) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Indices of the open entries, ascending.
    pub fn open_indices(&self) -> Vec<usize> {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(i, open)| open.then_some(i))
            .collect()
    }

    /// The `?open=` value for the current state.
    pub fn to_query(&self) -> String {
        self.open_indices()
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The `?open=` value that would result from toggling `index`,
    /// leaving `self` unchanged.
    pub fn query_with_toggled(&self, index: usize) -> String {
        let mut next = self.clone();
        next.toggle(index);
        next.to_query()
    }
}
