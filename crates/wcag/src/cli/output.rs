//! Output formatting utilities for CLI commands

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use serde::Serialize;
use wcag_core::{Criterion, FieldKey, FieldKind, Highlights, Level, Progress};

/// Print a table with a styled header row
pub fn print_table(headers: &[&str], rows: Vec<Vec<Cell>>) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = headers
        .iter()
        .map(|h| Cell::new(h).fg(Color::Cyan))
        .collect();
    table.set_header(header_cells);

    for row in rows {
        table.add_row(row);
    }

    println!("{}", table);
}

pub fn level_color(level: Option<Level>) -> Color {
    match level {
        Some(Level::A) => Color::Green,
        Some(Level::AA) => Color::Blue,
        Some(Level::AAA) => Color::Magenta,
        None => Color::Grey,
    }
}

pub fn status_text(checked: bool) -> &'static str {
    if checked {
        "done"
    } else {
        "open"
    }
}

/// Number, title, level and status cells for one criterion
pub fn criterion_row(criterion: &Criterion) -> Vec<Cell> {
    let status = Cell::new(status_text(criterion.checked)).fg(if criterion.checked {
        Color::Green
    } else {
        Color::DarkGrey
    });
    vec![
        Cell::new(&criterion.number),
        Cell::new(&criterion.title),
        Cell::new(&criterion.level_tag).fg(level_color(criterion.level())),
        status,
    ]
}

pub fn print_progress_summary(progress: &Progress) {
    println!("Progress: {}", progress.label());
    for level in &progress.levels {
        println!(
            "  {:<4} {:>7}  {:>3}%",
            level.level.as_str(),
            level.stats(),
            level.percent()
        );
    }
}

#[derive(Debug, Serialize)]
pub struct SpanOutput {
    pub field: &'static str,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Serialize)]
pub struct CriterionOutput {
    pub id: String,
    pub number: String,
    pub title: String,
    pub level: String,
    pub checked: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<SpanOutput>,
}

impl CriterionOutput {
    pub fn new(criterion: &Criterion) -> Self {
        Self {
            id: criterion.id.to_string(),
            number: criterion.number.clone(),
            title: criterion.title.clone(),
            level: criterion.level_tag.clone(),
            checked: criterion.checked,
            highlights: Vec::new(),
        }
    }

    /// Attach the highlight spans recorded for the criterion at `pos`.
    pub fn with_highlights(mut self, highlights: &Highlights, pos: usize) -> Self {
        self.highlights = FieldKind::ALL
            .iter()
            .filter_map(|kind| {
                highlights
                    .span(FieldKey::criterion(pos, *kind))
                    .map(|span| SpanOutput {
                        field: field_name(*kind),
                        start: span.start,
                        end: span.end,
                    })
            })
            .collect();
        self
    }
}

fn field_name(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Number => "number",
        FieldKind::Title => "title",
        FieldKind::Badge => "level",
        FieldKind::Description => "description",
        FieldKind::Summary => "summary",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        assert_eq!(status_text(true), "done");
        assert_eq!(status_text(false), "open");
    }

    #[test]
    fn test_criterion_output_serializes_without_empty_highlights() {
        let criterion = Criterion::new("1.4.3", "Contrast (Minimum)", "AA", "");
        let json = serde_json::to_value(CriterionOutput::new(&criterion)).unwrap();
        assert_eq!(json["id"], "sc-1-4-3");
        assert_eq!(json["level"], "AA");
        assert!(json.get("highlights").is_none());
    }
}
