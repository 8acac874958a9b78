use std::io;
use std::time::Duration;

use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod ai;
mod app;
mod config;
mod db;
mod editor;
mod error;
mod feed;
mod models;
mod services;
mod tui;

use app::App;
use config::Config;
use error::Result;
use tui::{draw, handle_key_event};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    // Load configuration
    let config = Config::load()?;

    // Check for --search flag (print matches and exit)
    let search_query = if args.len() >= 3 && args[1] == "--search" {
        Some(args[2..].join(" "))
    } else {
        None
    };

    // Check for --refresh flag (headless refresh)
    let headless_refresh = args.len() >= 2 && args[1] == "--refresh";

    // Initialize app (loads news from the remote or the local cache)
    let mut app = App::new(&config).await?;

    if headless_refresh {
        println!("Loaded {} articles", app.articles.len());
        return Ok(());
    }

    if let Some(query) = search_query {
        print_search(&app, &query);
        return Ok(());
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

fn print_search(app: &App, query: &str) {
    let matches = feed::search(&app.articles, query);
    if matches.is_empty() {
        println!("No results found for {query:?}");
        return;
    }

    for article in matches {
        println!("{} [{}]", article.headline, article.category.label());
        println!("{}\n", textwrap::fill(&article.preview_text, 78));
    }
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Poll for completed background work
        app.poll_refresh_result();
        app.poll_ai_result();

        // Poll for events with timeout to allow async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) =
                        handle_key_event(key, app.screen, app.is_input_active(), app.show_help)
                    {
                        let should_quit = app.handle_action(action).await?;
                        if should_quit {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}
