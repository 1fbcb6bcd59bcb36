//! Search term and the ordered match set navigated from the search field.

use serde::Serialize;

use crate::document::{ChecklistDocument, CriterionId};
use crate::fold;

/// A search term with its folded form cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    folded: String,
}

impl SearchTerm {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let folded = fold::fold(&raw);
        Self { raw, folded }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn folded(&self) -> &str {
        &self.folded
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Case-insensitive substring test. Every text matches an empty term.
    pub fn matches(&self, text: &str) -> bool {
        fold::contains_folded(text, &self.folded)
    }
}

/// Current term, the visible matches in document order, and the cursor.
///
/// `current` is `None` (idle) or an index into `matches`.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    term: SearchTerm,
    matches: Vec<CriterionId>,
    current: Option<usize>,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &SearchTerm {
        &self.term
    }

    /// Replace the term. Returns whether it changed.
    pub fn set_term(&mut self, raw: &str) -> bool {
        if self.term.as_str() == raw {
            return false;
        }
        self.term = SearchTerm::new(raw);
        true
    }

    pub fn matches(&self) -> &[CriterionId] {
        &self.matches
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_id(&self) -> Option<&CriterionId> {
        self.current.and_then(|idx| self.matches.get(idx))
    }

    /// Move the cursor. Out-of-range indices are ignored.
    pub fn set_current(&mut self, current: Option<usize>) {
        match current {
            Some(idx) if idx >= self.matches.len() => {}
            _ => self.current = current,
        }
    }

    /// Rebuild the match set from the document's current visibility.
    ///
    /// An empty term yields no matches and resets the cursor. Otherwise the
    /// cursor is clamped into the new range.
    pub fn rebuild(&mut self, document: &ChecklistDocument) -> &[CriterionId] {
        if self.term.is_empty() {
            self.matches.clear();
            self.current = None;
            return &self.matches;
        }

        self.matches = document
            .criteria()
            .filter(|(_, criterion)| criterion.visible)
            .map(|(_, criterion)| criterion.id.clone())
            .collect();

        self.current = match (self.current, self.matches.len()) {
            (_, 0) => None,
            (Some(idx), len) if idx >= len => Some(len - 1),
            (current, _) => current,
        };

        &self.matches
    }

    /// Clear term, matches and cursor.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// What the search info line reports after a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchInfo {
    pub term_active: bool,
    /// Number of visible criteria.
    pub visible: usize,
}

impl SearchInfo {
    /// Status text; empty while no term is active.
    pub fn message(&self) -> String {
        if !self.term_active {
            return String::new();
        }
        match self.visible {
            0 => "No criteria match the search.".to_string(),
            1 => "Found: 1 result".to_string(),
            n => format!("Found: {} results", n),
        }
    }

    pub fn is_empty_result(&self) -> bool {
        self.term_active && self.visible == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Criterion};

    fn doc(visible: &[bool]) -> ChecklistDocument {
        let blocks = visible
            .iter()
            .enumerate()
            .map(|(idx, &visible)| {
                let mut c = Criterion::new(format!("1.1.{}", idx + 1), "Item", "A", "");
                c.visible = visible;
                Block::Criterion(c)
            })
            .collect();
        ChecklistDocument::from_blocks("t", blocks).unwrap()
    }

    #[test]
    fn test_empty_term_yields_no_matches() {
        let mut state = SearchState::new();
        state.set_current(Some(0));
        assert!(state.rebuild(&doc(&[true, true])).is_empty());
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_rebuild_collects_visible_in_order() {
        let mut state = SearchState::new();
        state.set_term("item");
        let matches: Vec<String> = state
            .rebuild(&doc(&[true, false, true]))
            .iter()
            .map(|id| id.to_string())
            .collect();
        assert_eq!(matches, vec!["sc-1-1-1", "sc-1-1-3"]);
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_rebuild_clamps_cursor() {
        let mut state = SearchState::new();
        state.set_term("item");
        state.rebuild(&doc(&[true, true, true, true]));
        state.set_current(Some(3));
        state.rebuild(&doc(&[true, false, true, false]));
        assert_eq!(state.current(), Some(1));
        state.rebuild(&doc(&[false, false]));
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_set_current_ignores_out_of_range() {
        let mut state = SearchState::new();
        state.set_term("item");
        state.rebuild(&doc(&[true]));
        state.set_current(Some(5));
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_search_info_message() {
        let info = |term_active, visible| SearchInfo { term_active, visible };
        assert_eq!(info(false, 10).message(), "");
        assert_eq!(info(true, 0).message(), "No criteria match the search.");
        assert_eq!(info(true, 1).message(), "Found: 1 result");
        assert_eq!(info(true, 3).message(), "Found: 3 results");
        assert!(info(true, 0).is_empty_result());
    }

    #[test]
    fn test_term_matching_is_case_insensitive() {
        let term = SearchTerm::new("CONTRAST");
        assert!(term.matches("Non-text Contrast"));
        assert!(!term.matches("Reflow"));
        assert!(SearchTerm::new("").matches("anything"));
    }
}
