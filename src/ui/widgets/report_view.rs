// src/ui/widgets/report_view.rs

use crate::app::{App, AppState, SPINNER_CHARS};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
};

/// Colours one line of the plain-text report.
fn style_line(raw: &str) -> Line<'_> {
    if raw.starts_with("===") {
        Line::from(raw.yellow().bold())
    } else if raw.starts_with("VR Tools - ") {
        Line::from(raw.cyan().bold())
    } else if raw.contains("NOT DETECTED") {
        Line::from(raw.green())
    } else if raw.contains("DETECTED") || raw.contains(": Fail") {
        Line::from(raw.red())
    } else if raw.starts_with('•') {
        Line::from(vec![Span::styled("• ", Style::default().fg(Color::Cyan)), Span::raw(&raw['•'.len_utf8()..])])
    } else {
        Line::from(raw)
    }
}

pub fn render_report(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Report (scroll with ↑ ↓)");

    match app.state {
        AppState::Idle => {
            let hint = Paragraph::new("Fill in the form and press Enter to run.")
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(hint, area);
        }
        AppState::Running => {
            let spinner = SPINNER_CHARS[app.spinner_frame];
            let running = Paragraph::new(Line::from(vec![
                Span::styled(format!("{} ", spinner), Style::default().fg(Color::Cyan)),
                Span::raw("Analyzing... Please wait."),
            ]))
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(running, area);
        }
        AppState::Finished => {
            let lines: Vec<Line> = app.report_text.lines().map(style_line).collect();
            let total = lines.len();
            let report = Paragraph::new(lines)
                .block(block)
                .wrap(Wrap { trim: false })
                .scroll((app.scroll_offset as u16, 0));
            frame.render_widget(report, area);

            app.report_scroll_state = app.report_scroll_state.content_length(total);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                &mut app.report_scroll_state,
            );
        }
    }
}
