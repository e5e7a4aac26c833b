//! ReviewTUI - terminal client for a movie-review catalog
//!
//! Browse movies and their reviews, search and sort them, and read a
//! movie's reviews in detail.
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! reviewtui
//!
//! # CLI mode (for automation)
//! reviewtui list --sort highest
//! reviewtui show 3 --json
//! ```

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info};

use reviewtui::api::CmsClient;
use reviewtui::app::{App, AppState, InputMode};
use reviewtui::cli::{Cli, Command, ExitCode, Output};
use reviewtui::commands::{self, Context};
use reviewtui::config::Config;
use reviewtui::loader::{FetchEvent, Loader};
use reviewtui::logging;
use reviewtui::ui::{self, Theme};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        if let Err(e) = logging::init_stderr(cli.verbose, cli.quiet) {
            eprintln!("Logging disabled: {}", e);
        }
        let config = Config::load(cli.config.as_deref());
        let exit_code = run_cli(cli, config).await;
        std::process::exit(exit_code.into());
    } else {
        // TUI mode: the terminal is ours, so logs go to a file
        let config = Config::load(cli.config.as_deref());
        if let Some(path) = config.log_path(cli.log_file.as_deref()) {
            if let Err(e) = logging::init_file(cli.verbose, cli.quiet, &path) {
                eprintln!("Logging disabled ({}): {}", path.display(), e);
            }
        }
        run_tui(cli, config).await
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: Config) -> ExitCode {
    let output = Output::new(&cli);
    let client = CmsClient::new(config.base_url(cli.base_url.as_deref()));
    let ctx = Context::new(client, config.sort());

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, &ctx, &output).await,

        Some(Command::Reviews(cmd)) => commands::reviews_cmd(cmd, &ctx, &output).await,

        Some(Command::Show(cmd)) => commands::show_cmd(cmd, &ctx, &output).await,

        None => {
            // This shouldn't happen (handled by is_cli_mode check)
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(cli: Cli, config: Config) -> Result<()> {
    let client = CmsClient::new(config.base_url(cli.base_url.as_deref()));
    info!(base_url = client.base_url(), "starting interactive mode");

    let (mut loader, mut rx) = Loader::new(client);
    let mut app = App::with_default_sort(config.sort());
    app.load_catalog();

    let mut terminal = init_terminal()?;

    let result = run_event_loop(&mut terminal, &mut app, &mut loader, &mut rx).await;
    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, folds in fetch results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    loader: &mut Loader,
    rx: &mut mpsc::Receiver<FetchEvent>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    while app.running {
        for request in app.take_requests() {
            loader.handle(request);
        }

        terminal.draw(|frame| render_ui(frame, app))?;

        // Poll for events with timeout so finished fetches get picked up
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(fetch) = rx.try_recv() {
            app.apply(fetch);
        }
    }

    Ok(())
}

// =============================================================================
// UI Rendering
// =============================================================================

/// Main render function - dispatches to view-specific renderers
fn render_ui(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Clear with background color
    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    // Main layout: header, content, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_content(frame, chunks[1], app);
    render_status_bar(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Logo
            Constraint::Min(1),     // Search box
        ])
        .split(area);

    // Logo
    let logo = Paragraph::new(Line::from(vec![
        Span::styled(
            "REVIEW",
            Style::default()
                .fg(Theme::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "TUI",
            Style::default()
                .fg(Theme::SECONDARY)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::border()),
    );
    frame.render_widget(logo, header_chunks[0]);

    // Search box for the active view; a focused review has none
    let editing = app.input_mode == InputMode::Editing;
    let (search_text, sort_label) = match app.active_filter() {
        Some(filter) if editing => {
            let (before, after) = filter.split_at_cursor();
            (format!("⌕ {}│{}", before, after), filter.sort.label())
        }
        Some(filter) if filter.query.is_empty() => {
            ("⌕ Type / to search...".to_string(), filter.sort.label())
        }
        Some(filter) => (format!("⌕ {}", filter.query), filter.sort.label()),
        None => (String::new(), ""),
    };

    let search_box = Paragraph::new(search_text)
        .style(if editing {
            Theme::input().fg(Theme::PRIMARY)
        } else {
            Theme::input()
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(if editing {
                    Theme::border_focused()
                } else {
                    Theme::border()
                })
                .title(Span::styled(" SEARCH ", Theme::title()))
                .title(
                    Line::from(Span::styled(format!(" {} ", sort_label), Theme::secondary()))
                        .alignment(Alignment::Right),
                ),
        );
    frame.render_widget(search_box, header_chunks[1]);
}

fn render_content(frame: &mut Frame, area: Rect, app: &mut App) {
    match app.state {
        AppState::Catalog => ui::catalog::render(frame, area, &mut app.catalog),
        AppState::Feed => ui::feed::render(frame, area, &mut app.feed, &app.catalog.loading),
        AppState::Detail => {
            if let Some(detail) = app.detail.as_mut() {
                ui::detail::render(frame, area, detail);
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_indicator = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::PRIMARY),
        ),
        InputMode::Editing => Span::styled(
            " INSERT ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::SECONDARY),
        ),
    };

    let state_indicator = Span::styled(format!(" {} ", app.state.label()), Theme::dimmed());

    let help = match (app.input_mode, app.state) {
        (InputMode::Editing, _) => " Enter/Esc:done  ^U:clear ",
        (_, AppState::Detail) => " q:quit  /:search  o:sort  Esc:back ",
        _ => " q:quit  /:search  o:sort  Tab:movies/reviews  Enter:open ",
    };

    let status_line = Line::from(vec![
        mode_indicator,
        state_indicator,
        Span::raw("│"),
        Span::styled(help, Theme::keybind_desc()),
    ]);

    let status = Paragraph::new(status_line).style(Theme::status_bar());
    frame.render_widget(status, area);
}
