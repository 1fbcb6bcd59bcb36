//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};
use wcag_core::{Block as DocBlock, FieldKey, FieldKind, Highlights, Level};

use super::app::{App, InputFocus};
use super::components::action_bar::{format_help_lines, render_action_bar};
use super::keymap;
use super::palette::Palette;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme);
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base), area);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(2),
    ])
    .split(area);

    draw_header(frame, app, &palette, chunks[0]);
    draw_filters(frame, app, &palette, chunks[1]);
    draw_search(frame, app, &palette, chunks[2]);
    draw_info(frame, app, &palette, chunks[3]);

    let body = Layout::horizontal([Constraint::Min(40), Constraint::Length(30)]).split(chunks[4]);
    draw_list(frame, app, &palette, body[0]);
    draw_progress(frame, app, &palette, body[1]);

    render_action_bar(
        frame,
        chunks[5],
        &keymap::actions_for(app),
        palette.base,
        palette.accent,
    );

    if app.prompt.is_some() {
        draw_prompt(frame, app, &palette, area);
    } else if app.show_help {
        draw_help(frame, &palette, area);
    }
}

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.session.document().title()),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" theme: {}", app.theme), palette.dim),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_filters(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut spans = vec![Span::styled(" Levels ", palette.dim)];
    for (n, level) in Level::ALL.iter().enumerate() {
        let enabled = app.session.filters().is_enabled(*level);
        let mark = if enabled { "[x]" } else { "[ ]" };
        let style = if enabled {
            Style::default().fg(palette.level(Some(*level))).add_modifier(Modifier::BOLD)
        } else {
            palette.dim
        };
        spans.push(Span::styled(format!(" {} {} ", mark, level), style));
        spans.push(Span::styled(format!("({}) ", n + 1), palette.dim));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let focused = app.focus == InputFocus::Search && app.prompt.is_none();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
        .title(" Search criteria ");
    let inner = block.inner(area);

    let text = if app.search_input.is_empty() && !focused {
        Line::from(Span::styled("Press / to search", palette.dim))
    } else {
        Line::from(app.search_input.as_str())
    };
    frame.render_widget(Paragraph::new(text).block(block), area);

    if focused && inner.width > 0 {
        let offset = (app.search_input.chars().count() as u16).min(inner.width - 1);
        frame.set_cursor_position((inner.x + offset, inner.y));
    }
}

fn draw_info(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let mut spans = vec![Span::styled(
        format!(" {}", app.search_message),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(status) = &app.status {
        let color = if status.is_error { palette.error } else { palette.checked };
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.text.clone(), Style::default().fg(color)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Split a field into styled spans, marking its highlight span.
fn field_spans<'a>(
    highlights: &Highlights,
    key: FieldKey,
    text: &'a str,
    style: Style,
    palette: &Palette,
) -> Vec<Span<'a>> {
    highlights
        .segments(key, text)
        .into_iter()
        .map(|segment| {
            let style = if segment.highlighted { palette.highlight } else { style };
            Span::styled(segment.text, style)
        })
        .collect()
}

/// Lines of the criteria list and the line index of the selected row.
pub(crate) fn list_lines<'a>(app: &'a App, palette: &Palette) -> (Vec<Line<'a>>, Option<usize>) {
    let session = &app.session;
    let highlights = session.highlights();
    let current = session.search().current_id();
    let mut lines = Vec::new();
    let mut selected_line = None;

    for (pos, block) in session.visible_blocks() {
        match block {
            DocBlock::Heading(heading) => {
                let (indent, style) = if heading.level == 2 {
                    ("", Style::default().fg(palette.accent).add_modifier(Modifier::BOLD))
                } else {
                    ("  ", Style::default().add_modifier(Modifier::BOLD))
                };
                let mut spans = vec![Span::raw(indent)];
                spans.extend(field_spans(highlights, FieldKey::heading(pos), &heading.text, style, palette));
                lines.push(Line::from(spans));
            }
            DocBlock::Intro(intro) => {
                lines.push(Line::from(Span::styled(
                    format!("    {}", intro.text),
                    palette.dim.add_modifier(Modifier::ITALIC),
                )));
            }
            DocBlock::Criterion(criterion) => {
                let is_current = current == Some(&criterion.id);
                let is_selected = app.selected.as_ref() == Some(&criterion.id);
                let marker = if is_current { "> " } else { "  " };
                let checkbox = if criterion.checked { "[x] " } else { "[ ] " };
                let checkbox_style = if criterion.checked {
                    Style::default().fg(palette.checked).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let title_style = if is_current {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(palette.accent)),
                    Span::styled(checkbox, checkbox_style),
                ];
                spans.extend(field_spans(
                    highlights,
                    FieldKey::criterion(pos, FieldKind::Number),
                    &criterion.number,
                    title_style,
                    palette,
                ));
                spans.push(Span::raw(" "));
                spans.extend(field_spans(
                    highlights,
                    FieldKey::criterion(pos, FieldKind::Title),
                    &criterion.title,
                    title_style,
                    palette,
                ));
                spans.push(Span::styled(
                    format!(" ({})", criterion.level_tag),
                    Style::default().fg(palette.level(criterion.level())),
                ));

                let mut row = Line::from(spans);
                if is_selected {
                    selected_line = Some(lines.len());
                    row = row.style(palette.selected);
                }
                lines.push(row);

                let mut description = vec![Span::raw("        ")];
                description.extend(field_spans(
                    highlights,
                    FieldKey::criterion(pos, FieldKind::Description),
                    &criterion.description,
                    palette.dim,
                    palette,
                ));
                lines.push(Line::from(description));

                if let Some(summary) = &criterion.summary {
                    lines.push(Line::from(Span::styled(
                        format!("        + {}", summary),
                        palette.dim,
                    )));
                }
            }
        }
    }

    (lines, selected_line)
}

fn draw_list(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let shown = app.session.visible_criteria().count();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(app.focus == InputFocus::List))
        .title(format!(" Criteria ({} shown) ", shown));
    let height = block.inner(area).height as usize;

    let (lines, selected_line) = list_lines(app, palette);
    // Keep the selected row in the upper third of the viewport
    let offset = selected_line
        .map(|line| line.saturating_sub(height / 3))
        .unwrap_or(0);

    frame.render_widget(
        Paragraph::new(lines).block(block).scroll((offset as u16, 0)),
        area,
    );
}

fn draw_progress(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let progress = app.session.progress();
    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(palette.checked))
        .percent(u16::from(progress.percent().min(100)))
        .label(progress.label());
    frame.render_widget(gauge, chunks[0]);

    let mut lines: Vec<Line> = progress
        .levels
        .iter()
        .map(|level| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<4}", level.level.as_str()),
                    Style::default().fg(palette.level(Some(level.level))),
                ),
                Span::raw(format!("{:>7} {:>4}%", level.stats(), level.percent())),
            ])
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(format!(" {}", progress.value_text()), palette.dim)));

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" By level "))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn draw_prompt(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let Some(prompt) = &app.prompt else {
        return;
    };
    let popup = centered(area, 60, 3);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .title(prompt.kind.title())
        .style(palette.base);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(prompt.value.as_str()).block(block), popup);
    if inner.width > 0 {
        let offset = (prompt.value.chars().count() as u16).min(inner.width - 1);
        frame.set_cursor_position((inner.x + offset, inner.y));
    }
}

fn draw_help(frame: &mut Frame, palette: &Palette, area: Rect) {
    let mut lines = vec![Line::from(Span::styled(
        "Search field",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.extend(format_help_lines(&keymap::search_actions()).into_iter().map(Line::from));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Criteria list",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.extend(format_help_lines(&keymap::list_actions()).into_iter().map(Line::from));

    let popup = centered(area, 50, lines.len() as u16 + 2);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border(true))
                .title(" Help ")
                .style(palette.base),
        ),
        popup,
    );
}
