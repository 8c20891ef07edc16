// src/ui/widgets/footer.rs

use crate::app::{App, AppState, Notice, Screen};
use crate::core::models::ToolReport;
use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

fn key(label: &str) -> Span<'_> {
    Span::styled(label, Style::new().bold().fg(Color::Yellow))
}

/// Renders the notice line and the key hints for the current screen and state.
pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let notice = match &app.notice {
        Notice::None => Line::from(""),
        Notice::Info(msg) => Line::from(msg.as_str().green()),
        Notice::Error(msg) => Line::from(msg.as_str().red().bold()),
    };

    let hints = match (app.screen, app.state) {
        (Screen::Dashboard, _) => Line::from(vec![
            key("↑↓"),
            Span::raw(" select, type to search, "),
            key("Enter"),
            Span::raw(" open, "),
            key("Q"),
            Span::raw(" quit"),
        ]),
        (Screen::Tool(_), AppState::Idle) => Line::from(vec![
            key("Tab"),
            Span::raw(" next field, "),
            key("←→"),
            Span::raw(" change option, "),
            key("Enter"),
            Span::raw(" run, "),
            key("Esc"),
            Span::raw(" back"),
        ]),
        (Screen::Tool(_), AppState::Running) => Line::from(vec![
            Span::raw("Running... "),
            key("Esc"),
            Span::raw(" back"),
        ]),
        (Screen::Tool(_), AppState::Finished) => {
            let mut spans = vec![key("[E]"), Span::raw("xport, "), key("[N]"), Span::raw("ew, ")];
            if matches!(app.report, Some(ToolReport::Cipher(_))) {
                spans.extend([key("[S]"), Span::raw("wap, ")]);
            }
            spans.extend([key("Esc"), Span::raw(" back")]);
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(vec![notice, hints]).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
