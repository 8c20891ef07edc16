// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

mod app;
mod cli;
mod config;
mod core;
mod logging;
mod ui;

use app::{App, TaskResult};
use cli::{Cli, Command};
use config::Settings;
use core::catalog;
use core::models::ToolReport;
use core::report;
use core::tools::{ToolRequest, run_tool};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    logging::initialize_logging()?;

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if cli.no_delay {
        settings.simulate_latency = false;
    }
    info!(?settings, "Starting vr-tools.");

    match &cli.command {
        Some(command) => run_headless(&cli, command, &settings).await,
        None => run_tui(settings).await,
    }
}

/// Runs one tool and prints its report to stdout.
async fn run_headless(cli: &Cli, command: &Command, settings: &Settings) -> Result<()> {
    let Some(request) = command.to_request()? else {
        if let Command::Tools { slug } = command {
            print_catalog(slug.as_deref(), cli.json)?;
        }
        return Ok(());
    };

    let report = run_tool(request, settings).await?;
    if let (Command::Dns { records: true, .. }, ToolReport::Dns(dns)) = (command, &report) {
        for record in &dns.records {
            println!("{}", record.to_line());
        }
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render(&report));
    }

    if cli.export {
        let path = report::export(&report, &settings.export_dir())?;
        eprintln!("Report saved to {}", path.display());
    }
    Ok(())
}

fn print_catalog(slug: Option<&str>, json: bool) -> Result<()> {
    if let Some(slug) = slug {
        let Some(kind) = catalog::ToolKind::from_slug(slug) else {
            color_eyre::eyre::bail!("Unknown tool '{}'. Run `vr-tools tools` for the list.", slug);
        };
        let tool = kind.descriptor();
        if json {
            println!("{}", serde_json::to_string_pretty(tool)?);
        } else {
            println!("{} ({}, {})\n{}", tool.title, tool.category, tool.difficulty, tool.description);
        }
        return Ok(());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(catalog::all())?);
        return Ok(());
    }
    for category in catalog::categories() {
        println!("{}", category);
        for tool in catalog::all().iter().filter(|t| t.category == category) {
            println!("  {:<18} {:<24} [{}] {}", tool.slug, tool.title, tool.difficulty, tool.description);
        }
    }
    Ok(())
}

async fn run_tui(settings: Settings) -> Result<()> {
    // --- Setup ---
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;
    enable_raw_mode()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let mut app = App::new(settings);
    let (tx, mut rx) = mpsc::channel::<TaskResult>(4);

    let outcome = event_loop(&mut terminal, &mut app, &tx, &mut rx).await;

    // --- Restore Terminal ---
    stdout().execute(LeaveAlternateScreen)?;
    stdout().execute(DisableBracketedPaste)?;
    disable_raw_mode()?;
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tx: &mpsc::Sender<TaskResult>,
    rx: &mut mpsc::Receiver<TaskResult>,
) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(100))? {
            handle_events(app, tx)?;
        }

        while let Ok(result) = rx.try_recv() {
            app.finish_run(result);
        }
        app.on_tick();
    }
    Ok(())
}

fn handle_events(app: &mut App, tx: &mpsc::Sender<TaskResult>) -> Result<()> {
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if let Some(run) = app.handle_key(key) {
                spawn_run(run, &app.settings, tx);
            }
        }
        Event::Paste(text) => app.handle_paste(&text),
        _ => {}
    }
    Ok(())
}

fn spawn_run((run_id, request): (u64, ToolRequest), settings: &Settings, tx: &mpsc::Sender<TaskResult>) {
    let settings = settings.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = run_tool(request, &settings).await;
        if let Err(e) = &result {
            error!(run_id, error = %e, "Tool run failed.");
        }
        let _ = tx.send((run_id, result)).await;
    });
}
