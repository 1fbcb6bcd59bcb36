//! The checklist session: one document plus all view state derived from it.
//!
//! Every entry point runs to completion and returns the [`Effect`]s the shell
//! has to act on. Any change of filters, term or check state runs the whole
//! pipeline again: visibility, match set, highlights.

use serde::Serialize;

use crate::document::{Block, ChecklistDocument, Criterion, CriterionId, Level};
use crate::filter::{apply_filters, ActiveFilters};
use crate::highlight::Highlights;
use crate::navigator::{transition, Key, Modifiers, NavCommand};
use crate::progress::{Progress, ProgressMap};
use crate::search::{SearchInfo, SearchState};
use crate::sections::SectionIndex;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Something the shell should do in response to an entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emitted after every recompute.
    SearchInfo(SearchInfo),
    ScrollIntoView(CriterionId),
    Focus(CriterionId),
    /// The current match moved. `previous` loses its marker.
    CurrentChanged {
        previous: Option<CriterionId>,
        current: Option<CriterionId>,
    },
    CheckedChanged {
        id: CriterionId,
        checked: bool,
    },
    ProgressChanged(Progress),
}

impl Effect {
    pub fn changes_progress(&self) -> bool {
        matches!(self, Effect::CheckedChanged { .. })
    }
}

/// Result of applying a saved or imported progress map.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyOutcome {
    /// Entries that changed a check state.
    pub applied: usize,
    /// Ids not present in the document.
    pub skipped: Vec<String>,
    #[serde(skip)]
    pub effects: Vec<Effect>,
}

#[derive(Debug, Clone)]
pub struct ChecklistSession {
    document: ChecklistDocument,
    sections: SectionIndex,
    filters: ActiveFilters,
    search: SearchState,
    highlights: Highlights,
    page_size: usize,
}

impl ChecklistSession {
    pub fn new(document: ChecklistDocument) -> Self {
        let sections = SectionIndex::build(&document);
        let mut session = Self {
            document,
            sections,
            filters: ActiveFilters::default(),
            search: SearchState::new(),
            highlights: Highlights::new(),
            page_size: DEFAULT_PAGE_SIZE,
        };
        session.recompute(&mut Vec::new());
        session
    }

    /// Back to default filters and an empty term. Check state is kept.
    pub fn reset(&mut self) -> Vec<Effect> {
        self.filters = ActiveFilters::default();
        self.search.reset();
        let mut effects = Vec::new();
        self.recompute(&mut effects);
        effects
    }

    pub fn document(&self) -> &ChecklistDocument {
        &self.document
    }

    pub fn sections(&self) -> &SectionIndex {
        &self.sections
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn highlights(&self) -> &Highlights {
        &self.highlights
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    pub fn current_match(&self) -> Option<&Criterion> {
        self.search
            .current_id()
            .and_then(|id| self.document.criterion(id))
    }

    pub fn search_info(&self) -> SearchInfo {
        SearchInfo {
            term_active: !self.search.term().is_empty(),
            visible: self.visible_criteria().count(),
        }
    }

    pub fn visible_criteria(&self) -> impl Iterator<Item = (usize, &Criterion)> + '_ {
        self.document.criteria().filter(|(_, c)| c.visible)
    }

    /// Blocks as currently displayed: headings always, intros and criteria
    /// when visible.
    pub fn visible_blocks(&self) -> impl Iterator<Item = (usize, &Block)> + '_ {
        self.document
            .blocks()
            .iter()
            .enumerate()
            .filter(|(_, block)| match block {
                Block::Heading(_) => true,
                Block::Intro(intro) => intro.visible,
                Block::Criterion(criterion) => criterion.visible,
            })
    }

    // =========================================================================
    // Entry points
    // =========================================================================

    pub fn on_filter_toggled(&mut self, level: Level) -> Vec<Effect> {
        let enabled = self.filters.toggle(level);
        tracing::debug!(level = %level, enabled, "Filter toggled");
        let mut effects = Vec::new();
        self.recompute(&mut effects);
        effects
    }

    pub fn set_filters(&mut self, filters: ActiveFilters) -> Vec<Effect> {
        self.filters = filters;
        let mut effects = Vec::new();
        self.recompute(&mut effects);
        effects
    }

    /// Every change of the term supersedes the previous match set.
    pub fn on_search_term_changed(&mut self, term: &str) -> Vec<Effect> {
        self.search.set_term(term);
        let mut effects = Vec::new();
        self.recompute(&mut effects);
        effects
    }

    /// Keys that are not navigation keys produce no effects.
    pub fn on_search_key(&mut self, key: Key, modifiers: Modifiers) -> Vec<Effect> {
        match NavCommand::from_key(key, modifiers, self.page_size) {
            Some(command) => self.navigate(command),
            None => Vec::new(),
        }
    }

    pub fn navigate(&mut self, command: NavCommand) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.search.is_empty() {
            self.recompute(&mut effects);
        }

        if command == NavCommand::Accept {
            let Some(id) = self.search.current_id().cloned() else {
                return effects;
            };
            self.toggle_into(&id, &mut effects);
            self.recompute(&mut effects);
            effects.push(Effect::Focus(id));
            return effects;
        }

        let previous = self.search.current_id().cloned();
        let next = transition(self.search.current(), self.search.len(), command);
        self.search.set_current(next);

        if let Some(current) = self.search.current_id().cloned() {
            tracing::debug!(?command, current = %current, "Moved to match");
            if previous.as_ref() != Some(&current) {
                effects.push(Effect::CurrentChanged {
                    previous,
                    current: Some(current.clone()),
                });
            }
            effects.push(Effect::ScrollIntoView(current.clone()));
            effects.push(Effect::Focus(current));
        }
        effects
    }

    /// Flip the check state of `id`. Unknown ids are ignored.
    pub fn toggle_checked(&mut self, id: &CriterionId) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.toggle_into(id, &mut effects) {
            self.recompute(&mut effects);
        }
        effects
    }

    pub fn set_checked(&mut self, id: &CriterionId, checked: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.set_checked_into(id, checked, &mut effects) {
            self.push_progress(&mut effects);
            self.recompute(&mut effects);
        }
        effects
    }

    /// Check every currently visible criterion.
    pub fn check_all_visible(&mut self) -> Vec<Effect> {
        let ids: Vec<CriterionId> = self
            .visible_criteria()
            .filter(|(_, c)| !c.checked)
            .map(|(_, c)| c.id.clone())
            .collect();
        self.set_many(&ids, true)
    }

    pub fn uncheck_all(&mut self) -> Vec<Effect> {
        let ids: Vec<CriterionId> = self
            .document
            .criteria()
            .filter(|(_, c)| c.checked)
            .map(|(_, c)| c.id.clone())
            .collect();
        self.set_many(&ids, false)
    }

    /// Apply saved or imported check state. Unknown ids are skipped.
    pub fn apply_progress(&mut self, map: &ProgressMap) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();
        for (id, checked) in map {
            let id = CriterionId::new(id.as_str());
            if self.document.criterion(&id).is_none() {
                outcome.skipped.push(id.to_string());
                continue;
            }
            if self.set_checked_into(&id, *checked, &mut outcome.effects) {
                outcome.applied += 1;
            }
        }
        if !outcome.skipped.is_empty() {
            tracing::warn!(
                skipped = outcome.skipped.len(),
                ids = ?outcome.skipped,
                "Progress contains unknown criteria"
            );
        }
        if outcome.applied > 0 {
            self.push_progress(&mut outcome.effects);
        }
        self.recompute(&mut outcome.effects);
        outcome
    }

    /// Check state of every criterion.
    pub fn progress_map(&self) -> ProgressMap {
        self.document
            .criteria()
            .map(|(_, c)| (c.id.to_string(), c.checked))
            .collect()
    }

    pub fn progress(&self) -> Progress {
        Progress::compute(&self.document)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn set_many(&mut self, ids: &[CriterionId], checked: bool) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut changed = false;
        for id in ids {
            changed |= self.set_checked_into(id, checked, &mut effects);
        }
        if changed {
            self.push_progress(&mut effects);
            self.recompute(&mut effects);
        }
        effects
    }

    fn toggle_into(&mut self, id: &CriterionId, effects: &mut Vec<Effect>) -> bool {
        let Some(checked) = self.document.criterion(id).map(|c| !c.checked) else {
            return false;
        };
        self.set_checked_into(id, checked, effects);
        self.push_progress(effects);
        true
    }

    fn set_checked_into(&mut self, id: &CriterionId, checked: bool, effects: &mut Vec<Effect>) -> bool {
        match self.document.criterion_mut(id) {
            Some(criterion) if criterion.checked != checked => {
                criterion.checked = checked;
                effects.push(Effect::CheckedChanged {
                    id: id.clone(),
                    checked,
                });
                true
            }
            _ => false,
        }
    }

    fn push_progress(&self, effects: &mut Vec<Effect>) {
        effects.push(Effect::ProgressChanged(self.progress()));
    }

    fn recompute(&mut self, effects: &mut Vec<Effect>) {
        let previous = self.search.current_id().cloned();
        let visible = apply_filters(
            &mut self.document,
            &self.sections,
            &self.filters,
            self.search.term(),
        );
        self.search.rebuild(&self.document);

        self.highlights.clear();
        let term = self.search.term();
        if !term.is_empty() {
            let targets: Vec<usize> = self
                .document
                .headings()
                .filter(|(_, heading)| term.matches(&heading.text))
                .map(|(pos, _)| pos)
                .chain(self.visible_criteria().map(|(pos, _)| pos))
                .collect();
            for pos in targets {
                self.highlights.highlight(&self.document, pos, term);
            }
        }

        effects.push(Effect::SearchInfo(SearchInfo {
            term_active: !term.is_empty(),
            visible,
        }));

        let current = self.search.current_id().cloned();
        if current != previous {
            effects.push(Effect::CurrentChanged { previous, current });
        }
    }
}
