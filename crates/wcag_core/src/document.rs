//! Checklist document: the ordered blocks a checklist page is made of.
//!
//! A document is loaded once (from TOML or the bundled WCAG 2.1 data) and
//! flattened into a list of [`Block`]s in reading order. Block positions are
//! stable for the lifetime of the document and are used as the document
//! position by the section index, the highlighter and the search index.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::DocumentError;

const BUILTIN_WCAG21: &str = include_str!("../data/wcag21.toml");

/// WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    A,
    AA,
    AAA,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::A, Level::AA, Level::AAA];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A => "A",
            Level::AA => "AA",
            Level::AAA => "AAA",
        }
    }

    /// Parse a level badge. Surrounding whitespace is ignored, case is not.
    pub fn parse(tag: &str) -> Option<Level> {
        match tag.trim() {
            "A" => Some(Level::A),
            "AA" => Some(Level::AA),
            "AAA" => Some(Level::AAA),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::parse(&s.to_ascii_uppercase())
            .ok_or_else(|| format!("unknown level '{}' (expected A, AA or AAA)", s))
    }
}

/// Strongly-typed criterion identifier (e.g. `sc-1-4-3`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CriterionId(String);

impl CriterionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identifier derived from a success criterion number: `1.4.3` -> `sc-1-4-3`.
    pub fn from_number(number: &str) -> Self {
        Self(format!("sc-{}", number.trim().replace('.', "-")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text fields carried by a criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Number,
    Title,
    Badge,
    Description,
    Summary,
}

impl FieldKind {
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Number,
        FieldKind::Title,
        FieldKind::Badge,
        FieldKind::Description,
        FieldKind::Summary,
    ];

    pub fn role(self) -> TextRole {
        match self {
            FieldKind::Number | FieldKind::Title | FieldKind::Description => TextRole::Content,
            FieldKind::Badge => TextRole::Legend,
            FieldKind::Summary => TextRole::Summary,
        }
    }
}

/// Structural role of a piece of text. Only `Content` is ever highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    Content,
    Summary,
    Legend,
}

impl TextRole {
    pub fn is_highlightable(self) -> bool {
        matches!(self, TextRole::Content)
    }
}

/// One checklist entry tied to a success criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub id: CriterionId,
    pub number: String,
    pub title: String,
    /// Level badge as written in the source document.
    pub level_tag: String,
    pub description: String,
    /// Disclosure label (e.g. exceptions); searchable, never highlighted.
    pub summary: Option<String>,
    pub visible: bool,
    pub checked: bool,
}

impl Criterion {
    pub fn new(
        number: impl Into<String>,
        title: impl Into<String>,
        level_tag: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let number = number.into();
        Self {
            id: CriterionId::from_number(&number),
            number,
            title: title.into(),
            level_tag: level_tag.into(),
            description: description.into(),
            summary: None,
            visible: true,
            checked: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = CriterionId::new(id);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Parsed level, `None` for an unknown badge.
    pub fn level(&self) -> Option<Level> {
        Level::parse(&self.level_tag)
    }

    pub fn field(&self, kind: FieldKind) -> Option<&str> {
        match kind {
            FieldKind::Number => Some(&self.number),
            FieldKind::Title => Some(&self.title),
            FieldKind::Badge => Some(&self.level_tag),
            FieldKind::Description => Some(&self.description),
            FieldKind::Summary => self.summary.as_deref(),
        }
    }

    /// Present fields in display order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldKind, &str)> + '_ {
        FieldKind::ALL
            .iter()
            .filter_map(move |kind| self.field(*kind).map(|text| (*kind, text)))
    }

    /// All text of the criterion joined by single spaces.
    pub fn search_text(&self) -> String {
        self.fields()
            .map(|(_, text)| text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Section heading. Level 2 is a principle, level 3 a guideline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

/// Introductory paragraph below a heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intro {
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Heading),
    Intro(Intro),
    Criterion(Criterion),
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading(Heading {
            level,
            text: text.into(),
        })
    }

    pub fn intro(text: impl Into<String>) -> Self {
        Block::Intro(Intro {
            text: text.into(),
            visible: true,
        })
    }

    pub fn as_criterion(&self) -> Option<&Criterion> {
        match self {
            Block::Criterion(criterion) => Some(criterion),
            _ => None,
        }
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(heading) => Some(heading),
            _ => None,
        }
    }
}

/// The complete checklist in reading order.
#[derive(Debug, Clone)]
pub struct ChecklistDocument {
    title: String,
    blocks: Vec<Block>,
    by_id: HashMap<CriterionId, usize>,
}

impl ChecklistDocument {
    /// Build a document from blocks, validating ids and headings.
    pub fn from_blocks(title: impl Into<String>, blocks: Vec<Block>) -> Result<Self, DocumentError> {
        let mut by_id = HashMap::new();
        for (pos, block) in blocks.iter().enumerate() {
            match block {
                Block::Heading(heading) if !(2..=3).contains(&heading.level) => {
                    return Err(DocumentError::InvalidHeadingLevel(heading.level));
                }
                Block::Criterion(criterion) => {
                    if criterion.title.trim().is_empty() {
                        return Err(DocumentError::EmptyField {
                            number: criterion.number.clone(),
                            field: "title",
                        });
                    }
                    if by_id.insert(criterion.id.clone(), pos).is_some() {
                        return Err(DocumentError::DuplicateId(criterion.id.to_string()));
                    }
                }
                _ => {}
            }
        }

        Ok(Self {
            title: title.into(),
            blocks,
            by_id,
        })
    }

    /// Parse the sectioned TOML format.
    pub fn from_toml_str(source: &str) -> Result<Self, DocumentError> {
        let raw: RawDocument = toml::from_str(source)?;
        raw.into_document()
    }

    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let source = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::from_toml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            criteria = document.criteria_count(),
            "Loaded checklist"
        );
        Ok(document)
    }

    /// The bundled WCAG 2.1 checklist.
    pub fn builtin() -> Result<Self, DocumentError> {
        Self::from_toml_str(BUILTIN_WCAG21)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn block(&self, pos: usize) -> Option<&Block> {
        self.blocks.get(pos)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Criteria with their block positions, in document order.
    pub fn criteria(&self) -> impl Iterator<Item = (usize, &Criterion)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, block)| block.as_criterion().map(|c| (pos, c)))
    }

    pub fn criteria_mut(&mut self) -> impl Iterator<Item = (usize, &mut Criterion)> + '_ {
        self.blocks
            .iter_mut()
            .enumerate()
            .filter_map(|(pos, block)| match block {
                Block::Criterion(criterion) => Some((pos, criterion)),
                _ => None,
            })
    }

    pub fn intros_mut(&mut self) -> impl Iterator<Item = &mut Intro> + '_ {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Intro(intro) => Some(intro),
            _ => None,
        })
    }

    pub fn headings(&self) -> impl Iterator<Item = (usize, &Heading)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter_map(|(pos, block)| block.as_heading().map(|h| (pos, h)))
    }

    pub fn criteria_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn position_of(&self, id: &CriterionId) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    pub fn criterion(&self, id: &CriterionId) -> Option<&Criterion> {
        self.position_of(id)
            .and_then(|pos| self.blocks.get(pos))
            .and_then(Block::as_criterion)
    }

    pub fn criterion_mut(&mut self, id: &CriterionId) -> Option<&mut Criterion> {
        let pos = self.position_of(id)?;
        match self.blocks.get_mut(pos) {
            Some(Block::Criterion(criterion)) => Some(criterion),
            _ => None,
        }
    }
}

// =============================================================================
// TOML source format
// =============================================================================

#[derive(Debug, Deserialize)]
struct RawDocument {
    title: String,
    #[serde(default)]
    sections: Vec<RawSection>,
}

#[derive(Debug, Deserialize)]
struct RawSection {
    heading: String,
    #[serde(default)]
    intro: Option<String>,
    #[serde(default)]
    guidelines: Vec<RawGuideline>,
}

#[derive(Debug, Deserialize)]
struct RawGuideline {
    heading: String,
    #[serde(default)]
    intro: Option<String>,
    #[serde(default)]
    criteria: Vec<RawCriterion>,
}

#[derive(Debug, Deserialize)]
struct RawCriterion {
    #[serde(default)]
    id: Option<String>,
    number: String,
    title: String,
    level: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    summary: Option<String>,
}

impl RawDocument {
    fn into_document(self) -> Result<ChecklistDocument, DocumentError> {
        let mut blocks = Vec::new();
        for section in self.sections {
            blocks.push(Block::heading(2, section.heading));
            if let Some(intro) = section.intro {
                blocks.push(Block::intro(intro));
            }
            for guideline in section.guidelines {
                blocks.push(Block::heading(3, guideline.heading));
                if let Some(intro) = guideline.intro {
                    blocks.push(Block::intro(intro));
                }
                for raw in guideline.criteria {
                    if raw.number.trim().is_empty() {
                        return Err(DocumentError::EmptyField {
                            number: raw.title,
                            field: "number",
                        });
                    }
                    let mut criterion =
                        Criterion::new(raw.number, raw.title, raw.level, raw.description);
                    if let Some(id) = raw.id {
                        criterion = criterion.with_id(id);
                    }
                    criterion.summary = raw.summary;
                    blocks.push(Block::Criterion(criterion));
                }
            }
        }
        ChecklistDocument::from_blocks(self.title, blocks)
    }
}
