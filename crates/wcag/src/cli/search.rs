//! `wcag search`: run the checklist search without the terminal UI.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use wcag_core::{ActiveFilters, ChecklistSession, Effect, Level, SearchInfo};

use super::context::AppContext;
use super::output::{criterion_row, print_table, CriterionOutput};

#[derive(Debug)]
pub struct SearchArgs {
    pub term: String,
    pub levels: Vec<Level>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    term: String,
    levels: Vec<Level>,
    message: String,
    count: usize,
    matches: Vec<CriterionOutput>,
}

/// Apply level filters and the term; returns the info of the last recompute.
pub fn apply(session: &mut ChecklistSession, levels: &[Level], term: &str) -> SearchInfo {
    if !levels.is_empty() {
        session.set_filters(ActiveFilters::only(levels));
    }
    session
        .on_search_term_changed(term)
        .into_iter()
        .rev()
        .find_map(|effect| match effect {
            Effect::SearchInfo(info) => Some(info),
            _ => None,
        })
        .unwrap_or_else(|| session.search_info())
}

pub fn run(ctx: &AppContext, args: SearchArgs) -> Result<()> {
    let mut session = ctx.open_session()?;
    let info = apply(&mut session, &args.levels, &args.term);
    tracing::info!(term = %args.term, visible = info.visible, "Searched checklist");

    let document = session.document();
    let matches: Vec<(usize, &wcag_core::Criterion)> = session
        .search()
        .matches()
        .iter()
        .filter_map(|id| Some((document.position_of(id)?, document.criterion(id)?)))
        .collect();

    if args.json {
        let output = SearchOutput {
            term: args.term.clone(),
            levels: session.filters().enabled_levels(),
            message: info.message(),
            count: matches.len(),
            matches: matches
                .iter()
                .map(|(pos, criterion)| {
                    CriterionOutput::new(criterion).with_highlights(session.highlights(), *pos)
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if args.term.is_empty() {
        println!("Enter a search term.");
        return Ok(());
    }
    println!("{}", info.message());
    if matches.is_empty() {
        return Ok(());
    }
    println!();
    let rows: Vec<Vec<Cell>> = matches
        .iter()
        .map(|(_, criterion)| criterion_row(criterion))
        .collect();
    print_table(&["SC", "TITLE", "LEVEL", "STATUS"], rows);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcag_core::ChecklistDocument;

    #[test]
    fn test_apply_reports_visible_count() {
        let mut session = ChecklistSession::new(ChecklistDocument::builtin().unwrap());
        let info = apply(&mut session, &[], "contrast");
        assert_eq!(info.message(), "Found: 3 results");
        assert_eq!(session.search().len(), 3);
    }

    #[test]
    fn test_apply_with_levels() {
        let mut session = ChecklistSession::new(ChecklistDocument::builtin().unwrap());
        let info = apply(&mut session, &[Level::AAA], "contrast");
        assert_eq!(info.message(), "Found: 1 result");
    }
}
