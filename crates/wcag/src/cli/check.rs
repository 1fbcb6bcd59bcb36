//! `wcag check` / `wcag uncheck`

use anyhow::Result;
use wcag_core::{ChecklistSession, CriterionId, Effect};

use super::context::{resolve_criterion, AppContext};
use super::error::HelpfulError;

/// Resolve every reference or fail without changing anything.
pub fn resolve_all(session: &ChecklistSession, references: &[String]) -> Result<Vec<CriterionId>> {
    let mut ids = Vec::with_capacity(references.len());
    let mut unknown = Vec::new();
    for reference in references {
        match resolve_criterion(session, reference) {
            Some(id) => ids.push(id),
            None => unknown.push(reference.clone()),
        }
    }
    if !unknown.is_empty() {
        return Err(HelpfulError::unknown_criteria(&unknown).into());
    }
    Ok(ids)
}

pub fn run(ctx: &AppContext, references: &[String], checked: bool) -> Result<()> {
    let mut session = ctx.open_session()?;
    let ids = resolve_all(&session, references)?;

    let mut changed = 0;
    for id in &ids {
        let effects = session.set_checked(id, checked);
        if effects.iter().any(Effect::changes_progress) {
            changed += 1;
        }
        if let Some(criterion) = session.document().criterion(id) {
            let mark = if checked { "[x]" } else { "[ ]" };
            println!("{} {} {}", mark, criterion.number, criterion.title);
        }
    }

    if changed > 0 {
        ctx.save_progress(&session)?;
    }
    tracing::info!(changed, checked, "Updated check state");
    println!("Progress: {}", session.progress().label());
    Ok(())
}
