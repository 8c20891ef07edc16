// src/ui/widgets/form.rs

use crate::app::{App, AppState};
use crate::core::catalog::ToolKind;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn render_header(frame: &mut Frame, kind: ToolKind, area: Rect) {
    let tool = kind.descriptor();
    let line = Line::from(vec![
        Span::styled(tool.title, Style::new().bold().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(tool.description, Style::default().fg(Color::DarkGray)),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(tool.category));
    frame.render_widget(header, area);
}

/// Renders the input form: one label line and one value line per field.
pub fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.state == AppState::Idle;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(if editing { "Input (Tab next field)" } else { "Input" });

    let mut lines = Vec::new();
    for (i, field) in app.form.fields.iter().enumerate() {
        let focused = editing && i == app.form.focus;
        let label_style = if focused {
            Style::new().bold().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(Line::from(Span::styled(field.label, label_style)));

        let value = field.display_value();
        let value_style = if field.is_choice() { Style::default().fg(Color::Cyan) } else { Style::default() };
        let mut spans = vec![Span::raw(if focused { "> " } else { "  " }), Span::styled(value, value_style)];
        if focused && !field.is_choice() {
            spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}
