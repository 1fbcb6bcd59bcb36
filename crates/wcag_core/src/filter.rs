//! Level filters and the visibility pass over the document.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::document::{ChecklistDocument, Criterion, Level};
use crate::search::SearchTerm;
use crate::sections::SectionIndex;

/// Which conformance levels are shown. All enabled by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveFilters {
    a: bool,
    aa: bool,
    aaa: bool,
}

impl Default for ActiveFilters {
    fn default() -> Self {
        Self {
            a: true,
            aa: true,
            aaa: true,
        }
    }
}

impl ActiveFilters {
    /// Filters with exactly the given levels enabled.
    pub fn only(levels: &[Level]) -> Self {
        let mut filters = Self {
            a: false,
            aa: false,
            aaa: false,
        };
        for level in levels {
            filters.set(*level, true);
        }
        filters
    }

    pub fn is_enabled(&self, level: Level) -> bool {
        match level {
            Level::A => self.a,
            Level::AA => self.aa,
            Level::AAA => self.aaa,
        }
    }

    /// Unknown levels are never allowed.
    pub fn allows(&self, level: Option<Level>) -> bool {
        level.is_some_and(|level| self.is_enabled(level))
    }

    pub fn set(&mut self, level: Level, enabled: bool) {
        match level {
            Level::A => self.a = enabled,
            Level::AA => self.aa = enabled,
            Level::AAA => self.aaa = enabled,
        }
    }

    /// Flip a level and return its new state.
    pub fn toggle(&mut self, level: Level) -> bool {
        let enabled = !self.is_enabled(level);
        self.set(level, enabled);
        enabled
    }

    pub fn enabled_levels(&self) -> Vec<Level> {
        Level::ALL
            .iter()
            .copied()
            .filter(|level| self.is_enabled(*level))
            .collect()
    }
}

/// Whether a criterion matches the term by its own text or by its governing heading.
pub fn matches_search(
    document: &ChecklistDocument,
    sections: &SectionIndex,
    pos: usize,
    criterion: &Criterion,
    term: &SearchTerm,
) -> bool {
    if term.is_empty() || term.matches(&criterion.search_text()) {
        return true;
    }
    sections
        .governing_heading(pos)
        .and_then(|heading| document.block(heading))
        .and_then(|block| block.as_heading())
        .is_some_and(|heading| term.matches(&heading.text))
}

/// Recompute visibility of every criterion and intro.
///
/// A criterion is visible when its level is enabled and it matches the term.
/// Intros are hidden while a term is active. Returns the number of visible
/// criteria.
pub fn apply_filters(
    document: &mut ChecklistDocument,
    sections: &SectionIndex,
    filters: &ActiveFilters,
    term: &SearchTerm,
) -> usize {
    let heading_matches: HashSet<usize> = if term.is_empty() {
        HashSet::new()
    } else {
        document
            .headings()
            .filter(|(_, heading)| term.matches(&heading.text))
            .map(|(pos, _)| pos)
            .collect()
    };

    let mut visible = 0;
    for (pos, criterion) in document.criteria_mut() {
        let matches = term.is_empty()
            || term.matches(&criterion.search_text())
            || sections
                .governing_heading(pos)
                .is_some_and(|heading| heading_matches.contains(&heading));
        criterion.visible = filters.allows(criterion.level()) && matches;
        if criterion.visible {
            visible += 1;
        }
    }

    let show_intros = term.is_empty();
    for intro in document.intros_mut() {
        intro.visible = show_intros;
    }

    tracing::debug!(
        term = term.as_str(),
        levels = ?filters.enabled_levels(),
        visible,
        "Applied filters"
    );
    visible
}
