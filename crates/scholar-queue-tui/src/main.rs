use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use scholar_queue_core::config_file::{self, ConfigFile};
use scholar_queue_core::{FileStore, Library, QueueStore, SearchEngine};
use tracing_subscriber::EnvFilter;

mod action;
mod app;
mod input;
mod model;
mod theme;
mod view;

use app::{App, TuiHost};

const LOG_FILE: &str = "scholar-queue-tui.log";

/// Scholar Queue TUI - a floating panel for stepping through papers on Google Scholar.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the queue, library, and panel position
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Search endpoint queries are appended to as `?q=...`
    #[arg(long)]
    engine: Option<String>,

    /// Log search URLs instead of opening them in the browser
    #[arg(long)]
    no_open: bool,

    /// Color theme: hacker or modern (default from config, else hacker)
    #[arg(long)]
    theme: Option<String>,

    /// Redraws per second
    #[arg(long)]
    fps: Option<u32>,
}

/// Log to a file in the data dir; the terminal belongs to the UI.
fn init_tracing(data_dir: &Path) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    if let Err(e) = std::fs::create_dir_all(data_dir) {
        eprintln!("Warning: could not create {}: {}", data_dir.display(), e);
        return None;
    }
    let appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter =
        EnvFilter::try_from_env("SCHOLAR_QUEUE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Resolve config from CLI flags > env vars > config file > defaults
    let config = config_file::load_config();
    let data_dir = resolve_data_dir(args.data_dir.clone(), &config)?;
    let _log_guard = init_tracing(&data_dir);

    let mut machine = config.machine_config();
    if let Some(engine) = args
        .engine
        .clone()
        .or_else(|| std::env::var("SCHOLAR_QUEUE_ENGINE").ok())
    {
        machine.engine = SearchEngine::new(engine);
    }

    let theme = theme::Theme::by_name(
        args.theme
            .as_deref()
            .or(config.theme())
            .unwrap_or("hacker"),
    );
    let fps = args.fps.or(config.fps()).unwrap_or(30).clamp(1, 120);
    let tick_rate = Duration::from_millis(1000 / fps as u64);

    tracing::info!(
        data_dir = %data_dir.display(),
        engine = machine.engine.base_url(),
        "starting"
    );

    let store = QueueStore::new(FileStore::new(&data_dir));
    let host = TuiHost::new(Library::in_dir(&data_dir), !args.no_open);
    let mut app = App::new(store, machine, host, theme);
    app.start();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            DisableBracketedPaste
        );
        original_hook(panic_info);
    }));

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let result = run(&mut terminal, &mut app, tick_rate);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| view::render(f, app))?;

        if event::poll(tick_rate)? {
            let evt = event::read()?;
            let action = input::map_event(&evt, &app.input_mode);
            if app.update(action) {
                break;
            }
        }

        // Process tick
        if app.update(action::Action::Tick) {
            break;
        }
    }
    tracing::info!("exiting");
    Ok(())
}

fn resolve_data_dir(flag: Option<PathBuf>, config: &ConfigFile) -> anyhow::Result<PathBuf> {
    flag.or_else(|| std::env::var("SCHOLAR_QUEUE_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.data_dir())
        .or_else(scholar_queue_core::storage::default_data_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory; pass --data-dir"))
}
