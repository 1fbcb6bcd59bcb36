//! `wcag report`: printable checklist with check state and progress.

use anyhow::Result;
use comfy_table::Cell;
use serde::Serialize;
use wcag_core::{Level, Progress};

use super::context::AppContext;
use super::output::{criterion_row, print_progress_summary, print_table, CriterionOutput};
use super::search;

#[derive(Debug)]
pub struct ReportArgs {
    pub levels: Vec<Level>,
    pub term: Option<String>,
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct ReportOutput {
    title: String,
    generated: String,
    levels: Vec<Level>,
    term: Option<String>,
    progress: Progress,
    criteria: Vec<CriterionOutput>,
}

pub fn run(ctx: &AppContext, args: ReportArgs) -> Result<()> {
    let mut session = ctx.open_session()?;
    let term = args.term.clone().unwrap_or_default();
    search::apply(&mut session, &args.levels, &term);

    let progress = session.progress();
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();

    if args.json {
        let output = ReportOutput {
            title: session.document().title().to_string(),
            generated,
            levels: session.filters().enabled_levels(),
            term: args.term.clone(),
            progress,
            criteria: session
                .visible_criteria()
                .map(|(_, criterion)| CriterionOutput::new(criterion))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", session.document().title());
    println!("Generated {}", generated);
    println!();
    print_progress_summary(&progress);
    println!();

    let rows: Vec<Vec<Cell>> = session
        .visible_criteria()
        .map(|(_, criterion)| criterion_row(criterion))
        .collect();
    if rows.is_empty() {
        println!("No criteria match the current filters.");
        return Ok(());
    }
    print_table(&["SC", "TITLE", "LEVEL", "STATUS"], rows);
    Ok(())
}
