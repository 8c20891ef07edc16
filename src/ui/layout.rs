// src/ui/layout.rs

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The widget areas shared by the dashboard and the tool pages.
///
/// On the dashboard `main` holds the tool list and `side` the selected card;
/// on a tool page `main` holds the report and `side` the input form.
pub struct AppLayout {
    pub header: Rect,
    pub main: Rect,
    pub side: Rect,
    pub summary: Rect,
    pub footer: Rect,
}

/// Splits the frame into a header row, a content row and a two-line footer.
/// The content row is split 60/40 and the right column again into the side
/// panel and the summary.
pub fn create_layout(frame_size: Rect) -> AppLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame_size);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[1]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(9)])
        .split(content_chunks[1]);

    AppLayout {
        header: main_chunks[0],
        main: content_chunks[0],
        side: side_chunks[0],
        summary: side_chunks[1],
        footer: main_chunks[2],
    }
}
