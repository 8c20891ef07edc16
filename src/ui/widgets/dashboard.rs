// src/ui/widgets/dashboard.rs

use crate::app::App;
use crate::core::catalog::Difficulty;
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn difficulty_style(difficulty: Difficulty) -> Style {
    match difficulty {
        Difficulty::Beginner => Style::default().fg(Color::Green),
        Difficulty::Intermediate => Style::default().fg(Color::Yellow),
        Difficulty::Advanced => Style::default().fg(Color::Red),
    }
}

/// Renders the search box. Typing on the dashboard always edits the filter.
pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Search tools");
    let paragraph = Paragraph::new(app.filter.as_str())
        .block(block)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(paragraph, area);

    if !app.show_disclaimer {
        frame.set_cursor_position((area.x + app.filter.chars().count() as u16 + 1, area.y + 1));
    }
}

pub fn render_tool_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let tools = app.visible_tools();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Tools ({}) - navigate with ↑ ↓", tools.len()));

    if tools.is_empty() {
        let empty = Paragraph::new(format!("No tools match \"{}\".", app.filter))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = tools
        .iter()
        .map(|tool| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", tool.category), Style::default().fg(Color::DarkGray)),
                Span::styled(tool.title, Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::new().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.tool_list_state);
}

pub fn render_tool_card(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Details");
    let Some(tool) = app.selected_tool() else {
        frame.render_widget(block, area);
        return;
    };

    let text = vec![
        Line::from(tool.title.bold()),
        Line::from(""),
        Line::from(tool.description),
        Line::from(""),
        Line::from(vec![Span::raw("Category: "), Span::styled(tool.category, Style::default().fg(Color::Cyan))]),
        Line::from(vec![
            Span::raw("Difficulty: "),
            Span::styled(tool.difficulty.to_string(), difficulty_style(tool.difficulty)),
        ]),
        Line::from(vec![Span::raw("Route: "), Span::styled(format!("/{}", tool.slug), Style::default().fg(Color::DarkGray))]),
    ];
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }).block(block), area);
}
