//! Non-destructive search highlighting.
//!
//! Text is never rewritten: a highlight is a byte span recorded against a
//! (block, field) key, and rendering splits the untouched original text into
//! segments. Clearing drops the spans, so the rendered text is always the
//! original text.

use std::collections::HashMap;
use std::ops::Range;

use crate::document::{Block, ChecklistDocument, FieldKind};
use crate::fold;
use crate::search::SearchTerm;

/// Which text of a block a span belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HighlightField {
    Heading,
    Criterion(FieldKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub block: usize,
    pub field: HighlightField,
}

impl FieldKey {
    pub fn heading(block: usize) -> Self {
        Self {
            block,
            field: HighlightField::Heading,
        }
    }

    pub fn criterion(block: usize, kind: FieldKind) -> Self {
        Self {
            block,
            field: HighlightField::Criterion(kind),
        }
    }
}

/// A rendered piece of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Highlights {
    spans: HashMap<FieldKey, Range<usize>>,
}

impl Highlights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the first occurrence of `term` in every highlightable field of
    /// the block at `pos`. Summary and legend text is skipped. Returns the
    /// number of fields marked.
    pub fn highlight(&mut self, document: &ChecklistDocument, pos: usize, term: &SearchTerm) -> usize {
        if term.is_empty() {
            return 0;
        }
        let mut marked = 0;
        match document.block(pos) {
            Some(Block::Heading(heading)) => {
                if let Some(span) = fold::find_folded(&heading.text, term.folded()) {
                    self.spans.insert(FieldKey::heading(pos), span);
                    marked += 1;
                }
            }
            Some(Block::Criterion(criterion)) => {
                for (kind, text) in criterion.fields() {
                    if !kind.role().is_highlightable() {
                        continue;
                    }
                    if let Some(span) = fold::find_folded(text, term.folded()) {
                        self.spans.insert(FieldKey::criterion(pos, kind), span);
                        marked += 1;
                    }
                }
            }
            Some(Block::Intro(_)) | None => {}
        }
        marked
    }

    pub fn clear(&mut self) {
        self.spans.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn span(&self, key: FieldKey) -> Option<Range<usize>> {
        self.spans.get(&key).cloned()
    }

    pub fn is_block_highlighted(&self, pos: usize) -> bool {
        self.spans.keys().any(|key| key.block == pos)
    }

    /// Split `text` into plain and highlighted segments for `key`.
    ///
    /// A span that does not fit `text` is ignored and the text is returned
    /// as a single plain segment.
    pub fn segments<'a>(&self, key: FieldKey, text: &'a str) -> Vec<Segment<'a>> {
        let plain = |text: &'a str| Segment {
            text,
            highlighted: false,
        };
        let Some(span) = self.spans.get(&key) else {
            return vec![plain(text)];
        };
        let (Some(before), Some(hit), Some(after)) = (
            text.get(..span.start),
            text.get(span.clone()),
            text.get(span.end..),
        ) else {
            return vec![plain(text)];
        };

        let mut segments = Vec::with_capacity(3);
        if !before.is_empty() {
            segments.push(plain(before));
        }
        segments.push(Segment {
            text: hit,
            highlighted: true,
        });
        if !after.is_empty() {
            segments.push(plain(after));
        }
        segments
    }
}

/// Concatenate segments back into a string.
pub fn render_plain(segments: &[Segment<'_>]) -> String {
    segments.iter().map(|segment| segment.text).collect()
}
