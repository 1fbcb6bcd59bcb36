//! Completion statistics over all criteria.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::document::{ChecklistDocument, Level};

/// Persisted check state: criterion id -> checked.
pub type ProgressMap = BTreeMap<String, bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelProgress {
    pub level: Level,
    pub checked: usize,
    pub total: usize,
}

impl LevelProgress {
    pub fn percent(&self) -> u8 {
        percent(self.checked, self.total)
    }

    /// `checked/total`
    pub fn stats(&self) -> String {
        format!("{}/{}", self.checked, self.total)
    }
}

/// Counts cover every criterion regardless of filter visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub checked: usize,
    pub total: usize,
    pub levels: Vec<LevelProgress>,
}

impl Progress {
    pub fn compute(document: &ChecklistDocument) -> Self {
        let mut levels: Vec<LevelProgress> = Level::ALL
            .iter()
            .map(|level| LevelProgress {
                level: *level,
                checked: 0,
                total: 0,
            })
            .collect();
        let mut checked = 0;
        let mut total = 0;

        for (_, criterion) in document.criteria() {
            total += 1;
            if criterion.checked {
                checked += 1;
            }
            if let Some(entry) = criterion
                .level()
                .and_then(|level| levels.iter_mut().find(|entry| entry.level == level))
            {
                entry.total += 1;
                if criterion.checked {
                    entry.checked += 1;
                }
            }
        }

        Self {
            checked,
            total,
            levels,
        }
    }

    pub fn percent(&self) -> u8 {
        percent(self.checked, self.total)
    }

    pub fn level(&self, level: Level) -> Option<&LevelProgress> {
        self.levels.iter().find(|entry| entry.level == level)
    }

    /// Progress bar label: `42% (33/78)`.
    pub fn label(&self) -> String {
        format!("{}% ({}/{})", self.percent(), self.checked, self.total)
    }

    /// Screen-reader value text.
    pub fn value_text(&self) -> String {
        format!(
            "{} percent, {} of {}",
            self.percent(),
            self.checked,
            self.total
        )
    }
}

fn percent(checked: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((checked as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Criterion};

    fn doc(entries: &[(&str, &str, bool)]) -> ChecklistDocument {
        let blocks = entries
            .iter()
            .map(|(number, level, checked)| {
                let mut c = Criterion::new(*number, "Item", *level, "");
                c.checked = *checked;
                Block::Criterion(c)
            })
            .collect();
        ChecklistDocument::from_blocks("t", blocks).unwrap()
    }

    #[test]
    fn test_empty_document_is_zero_percent() {
        let progress = Progress::compute(&doc(&[]));
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.label(), "0% (0/0)");
        assert_eq!(progress.level(Level::AA).unwrap().percent(), 0);
    }

    #[test]
    fn test_rounding_and_per_level_counts() {
        let progress = Progress::compute(&doc(&[
            ("1.1.1", "A", true),
            ("1.1.2", "A", false),
            ("1.1.3", "AA", true),
            ("1.1.4", "AAA", false),
            ("1.1.5", "AAA", false),
            ("1.1.6", "X", true),
        ]));
        assert_eq!(progress.checked, 3);
        assert_eq!(progress.total, 6);
        assert_eq!(progress.label(), "50% (3/6)");
        assert_eq!(progress.value_text(), "50 percent, 3 of 6");
        assert_eq!(progress.level(Level::A).unwrap().stats(), "1/2");
        assert_eq!(progress.level(Level::AA).unwrap().percent(), 100);
        assert_eq!(progress.level(Level::AAA).unwrap().percent(), 0);
    }

    #[test]
    fn test_percent_rounds_half_up() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
    }
}
