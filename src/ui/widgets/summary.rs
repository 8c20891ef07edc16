// src/ui/widgets/summary.rs

use crate::app::{App, AppState, Screen};
use crate::core::catalog::{self, ToolKind};
use crate::core::models::{RiskLevel, ToolReport};
use ratatui::{
    prelude::*,
    text::Line,
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

fn risk_style(level: RiskLevel) -> Style {
    match level {
        RiskLevel::Safe => Style::default().fg(Color::Green),
        RiskLevel::Suspicious => Style::default().fg(Color::Yellow),
        RiskLevel::Dangerous => Style::default().fg(Color::Red),
    }
}

/// Renders the summary panel: catalog stats on the dashboard, the headline
/// and risk gauge of the last report on a tool page.
pub fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let container = Block::default().borders(Borders::ALL).title("Summary");
    let inner = container.inner(area);
    frame.render_widget(container, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Headline
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // Extra lines
        ])
        .split(inner);

    if app.screen == Screen::Dashboard {
        let stats = vec![
            Line::from(format!("{} tools available", catalog::all().len())),
            Line::from(format!("{} categories", catalog::categories().len())),
        ];
        frame.render_widget(Paragraph::new(stats), chunks[0]);
        return;
    }

    if app.state != AppState::Finished {
        return;
    }
    let Some(report) = &app.report else { return };

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(report.headline(), Style::new().bold()))).wrap(Wrap { trim: true }),
        chunks[0],
    );

    // --- Score Gauge ---
    if let Some((score, level)) = report.risk() {
        let label = match report {
            ToolReport::Ip(_) => format!("Risk {}/100", score),
            _ => format!("{}/100 ({})", score, level),
        };
        let gauge = Gauge::default()
            .percent(score as u16)
            .label(label)
            .gauge_style(risk_style(level));
        frame.render_widget(gauge, chunks[1]);
    }

    let mut extra = Vec::new();
    match report {
        ToolReport::Phishing(a) => {
            let found = a.indicators.iter().filter(|i| i.found).count();
            extra.push(Line::from(format!("Indicators found: {}", found)));
        }
        ToolReport::PortScan(p) => {
            extra.push(Line::from(format!("Ports scanned: {}", p.ports.len())));
        }
        ToolReport::Breach(b) => {
            for breach in &b.breaches {
                extra.push(Line::from(format!("- {} ({})", breach.name, breach.tier())));
            }
        }
        ToolReport::Ip(_) if app.screen == Screen::Tool(ToolKind::IpLookup) => {
            extra.push(Line::from(format!("Lookups this session: {}", app.ip_history.len())));
        }
        _ => {}
    }
    frame.render_widget(Paragraph::new(extra), chunks[2]);
}
