// src/ui/mod.rs

use crate::app::{App, Screen};
use ratatui::prelude::*;

mod layout;
mod widgets;

pub fn render(app: &mut App, frame: &mut Frame) {
    let layout = layout::create_layout(frame.area());

    match app.screen {
        Screen::Dashboard => {
            widgets::dashboard::render_search(frame, app, layout.header);
            widgets::dashboard::render_tool_list(frame, app, layout.main);
            widgets::dashboard::render_tool_card(frame, app, layout.side);
        }
        Screen::Tool(kind) => {
            widgets::form::render_header(frame, kind, layout.header);
            widgets::form::render_form(frame, app, layout.side);
            widgets::report_view::render_report(frame, app, layout.main);
        }
    }

    widgets::summary::render_summary(frame, app, layout.summary);
    widgets::footer::render_footer(frame, app, layout.footer);

    if app.show_disclaimer {
        widgets::disclaimer_popup::render_disclaimer_popup(frame, frame.area());
    }
}
