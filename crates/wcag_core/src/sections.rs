//! Flat heading index for governing-heading lookups.
//!
//! Built once per document. Every heading governs the blocks that follow it
//! up to (not including) the next heading, so the governing heading of a
//! block is the nearest preceding heading in document order.

use std::ops::Range;

use crate::document::ChecklistDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionEntry {
    /// Block position of the heading.
    pub heading: usize,
    pub level: u8,
    /// Block positions governed by the heading.
    pub range: Range<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SectionIndex {
    entries: Vec<SectionEntry>,
}

impl SectionIndex {
    pub fn build(document: &ChecklistDocument) -> Self {
        let headings: Vec<(usize, u8)> = document
            .headings()
            .map(|(pos, heading)| (pos, heading.level))
            .collect();

        let entries = headings
            .iter()
            .enumerate()
            .map(|(idx, &(pos, level))| {
                let end = headings
                    .get(idx + 1)
                    .map_or(document.len(), |&(next, _)| next);
                SectionEntry {
                    heading: pos,
                    level,
                    range: pos + 1..end,
                }
            })
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    /// Entry of the heading governing block `pos`.
    pub fn section_of(&self, pos: usize) -> Option<&SectionEntry> {
        let idx = self.entries.partition_point(|entry| entry.heading < pos);
        idx.checked_sub(1).map(|idx| &self.entries[idx])
    }

    /// Block position of the heading governing block `pos`.
    pub fn governing_heading(&self, pos: usize) -> Option<usize> {
        self.section_of(pos).map(|entry| entry.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Block, Criterion};

    fn doc() -> ChecklistDocument {
        ChecklistDocument::from_blocks(
            "t",
            vec![
                Block::Criterion(Criterion::new("0.0.1", "Orphan", "A", "")), // 0
                Block::heading(2, "Perceivable"),                             // 1
                Block::intro("intro"),                                        // 2
                Block::heading(3, "Text Alternatives"),                       // 3
                Block::Criterion(Criterion::new("1.1.1", "Non-text", "A", "")), // 4
                Block::heading(3, "Distinguishable"),                         // 5
                Block::Criterion(Criterion::new("1.4.1", "Color", "A", "")),  // 6
                Block::Criterion(Criterion::new("1.4.3", "Contrast", "AA", "")), // 7
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_governing_heading_is_nearest_preceding() {
        let index = SectionIndex::build(&doc());
        assert_eq!(index.governing_heading(0), None);
        assert_eq!(index.governing_heading(2), Some(1));
        assert_eq!(index.governing_heading(4), Some(3));
        assert_eq!(index.governing_heading(6), Some(5));
        assert_eq!(index.governing_heading(7), Some(5));
    }

    #[test]
    fn test_heading_is_not_its_own_governor() {
        let index = SectionIndex::build(&doc());
        assert_eq!(index.governing_heading(3), Some(1));
        assert_eq!(index.governing_heading(1), None);
    }

    #[test]
    fn test_ranges_cover_until_next_heading() {
        let index = SectionIndex::build(&doc());
        let ranges: Vec<_> = index.entries().iter().map(|e| e.range.clone()).collect();
        assert_eq!(ranges, vec![2..3, 4..5, 6..8]);
    }
}
