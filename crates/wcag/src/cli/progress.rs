//! `wcag progress`: show, export, import and reset saved progress.

use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::{Path, PathBuf};
use wcag_core::store::{default_export_name_today, export_progress, import_progress};
use wcag_core::{ApplyOutcome, ChecklistSession, StoreError};

use super::context::AppContext;
use super::error::HelpfulError;
use super::output::print_progress_summary;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ProgressAction {
    /// Show overall and per-level progress
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write progress to a JSON file
    Export {
        /// Target file (default: wcag-progress-YYYY-MM-DD.json)
        path: Option<PathBuf>,
    },

    /// Load progress from a JSON file written by export
    Import {
        path: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Uncheck every criterion
    Reset,
}

impl Default for ProgressAction {
    fn default() -> Self {
        ProgressAction::Show { json: false }
    }
}

impl ProgressAction {
    pub fn wants_json(&self) -> bool {
        match self {
            ProgressAction::Show { json } | ProgressAction::Import { json, .. } => *json,
            _ => false,
        }
    }
}

pub fn run(ctx: &AppContext, action: ProgressAction) -> Result<()> {
    match action {
        ProgressAction::Show { json } => show(ctx, json),
        ProgressAction::Export { path } => export(ctx, path),
        ProgressAction::Import { path, json } => import(ctx, &path, json),
        ProgressAction::Reset => reset(ctx),
    }
}

fn show(ctx: &AppContext, json: bool) -> Result<()> {
    let session = ctx.open_session()?;
    let progress = session.progress();
    if json {
        let value = serde_json::json!({
            "percent": progress.percent(),
            "checked": progress.checked,
            "total": progress.total,
            "label": progress.label(),
            "levels": progress.levels.iter().map(|level| serde_json::json!({
                "level": level.level,
                "checked": level.checked,
                "total": level.total,
                "percent": level.percent(),
            })).collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_progress_summary(&progress);
    }
    Ok(())
}

fn export(ctx: &AppContext, path: Option<PathBuf>) -> Result<()> {
    let session = ctx.open_session()?;
    let path = path.unwrap_or_else(|| PathBuf::from(default_export_name_today()));
    export_progress(&path, &session.progress_map())
        .with_context(|| format!("Failed to export progress to {}", path.display()))?;
    println!("Exported progress to {}", path.display());
    Ok(())
}

/// Read an import file and apply it. Malformed files leave the session untouched.
pub fn import_into(session: &mut ChecklistSession, path: &Path) -> Result<ApplyOutcome> {
    let map = import_progress(path).map_err(|err| -> anyhow::Error {
        match err {
            StoreError::Malformed { source, .. } => {
                HelpfulError::malformed_import(path, &source.to_string()).into()
            }
            other => anyhow::Error::new(other).context("Failed to import progress"),
        }
    })?;
    Ok(session.apply_progress(&map))
}

fn import(ctx: &AppContext, path: &Path, json: bool) -> Result<()> {
    let mut session = ctx.open_session()?;
    let outcome = import_into(&mut session, path)?;
    ctx.save_progress(&session)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }
    println!("Imported {} ({} changed)", path.display(), outcome.applied);
    if !outcome.skipped.is_empty() {
        println!("Skipped {} unknown: {}", outcome.skipped.len(), outcome.skipped.join(", "));
    }
    println!("Progress: {}", session.progress().label());
    Ok(())
}

fn reset(ctx: &AppContext) -> Result<()> {
    let mut session = ctx.open_session()?;
    session.uncheck_all();
    ctx.save_progress(&session)?;
    println!("All criteria unchecked.");
    Ok(())
}
