//! WCAG checklist core.
//!
//! A [`ChecklistSession`] owns one [`ChecklistDocument`] together with the
//! level filters, the search state, highlights and navigation cursor. The
//! shell feeds it user input and acts on the returned [`Effect`]s; nothing in
//! this crate touches a terminal.
//!
//! Peripheral collaborators live next to it: [`progress`] statistics, the
//! JSON [`store`] for check state and the [`theme`] preference.

pub mod document;
pub mod error;
pub mod filter;
pub mod fold;
pub mod highlight;
pub mod navigator;
pub mod progress;
pub mod search;
pub mod sections;
pub mod session;
pub mod store;
pub mod theme;

pub use document::{Block, ChecklistDocument, Criterion, CriterionId, FieldKind, Heading, Intro, Level};
pub use error::{DocumentError, StoreError};
pub use filter::ActiveFilters;
pub use highlight::{FieldKey, Highlights, Segment};
pub use navigator::{Key, Modifiers, NavCommand};
pub use progress::{Progress, ProgressMap};
pub use search::{SearchInfo, SearchState, SearchTerm};
pub use sections::SectionIndex;
pub use session::{ApplyOutcome, ChecklistSession, Effect};
pub use store::ProgressStore;
pub use theme::{Preferences, PreferencesStore, Theme};
