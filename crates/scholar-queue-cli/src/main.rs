use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use scholar_queue_core::config_file::{self, ConfigFile};
use scholar_queue_core::{
    FileStore, Library, MachineConfig, Navigator, QueueStore, SearchEngine, Session, Trigger,
    normalize_query,
};
use tracing_subscriber::EnvFilter;

mod host;
mod output;

use host::CliHost;
use output::ColorMode;

/// Scholar Queue - step through a list of paper titles and DOIs on Google Scholar
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the queue and library (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Search endpoint queries are appended to as `?q=...`
    #[arg(long, global = true)]
    engine: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Print search URLs instead of opening them in the browser
    #[arg(long, global = true)]
    no_open: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a new queue (one title or DOI per line) and open the first search
    Begin {
        /// File with one query per line; reads stdin when omitted or `-`
        file: Option<PathBuf>,
    },

    /// Drop the current query and open the next one
    Next,

    /// Save the current query to the library
    Save,

    /// Delete the queue
    Clear,

    /// Show the current and next query
    Status,

    /// List every queued query
    List,

    /// Re-open the search page for the current query
    Open,

    /// Print the search URL for the current query
    Url,

    /// Show how a line would be searched
    Normalize {
        /// Titles, DOIs, or DOI URLs
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// List papers saved to the library
    Library,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SCHOLAR_QUEUE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    // Resolve configuration: CLI flags > env vars > config file > defaults
    let config = config_file::load_config();
    let data_dir = resolve_data_dir(cli.data_dir.clone(), &config)?;
    let mut machine = config.machine_config();
    if let Some(engine) = cli
        .engine
        .clone()
        .or_else(|| std::env::var("SCHOLAR_QUEUE_ENGINE").ok())
    {
        machine.engine = SearchEngine::new(engine);
    }
    if cli.no_open {
        machine = scholar_queue_core::session::immediate(machine);
    }

    let color = ColorMode(!cli.no_color && std::io::stdout().is_terminal());
    let library = Library::in_dir(&data_dir);
    let mut host = CliHost::new(std::io::stdout(), color, !cli.no_open, library);
    let store = QueueStore::new(FileStore::new(&data_dir));
    tracing::debug!(data_dir = %data_dir.display(), engine = machine.engine.base_url(), "resolved configuration");

    match cli.command {
        Command::Begin { file } => begin(file.as_deref(), store, machine, &mut host),
        Command::Next => run_trigger(Trigger::Next, store, machine, &mut host),
        Command::Save => run_trigger(Trigger::Save, store, machine, &mut host),
        Command::Clear => run_trigger(Trigger::Clear, store, machine, &mut host),
        Command::Status => {
            output::print_snapshot(host.writer(), &store.snapshot(), color)?;
            Ok(())
        }
        Command::List => {
            output::print_queue(host.writer(), &store.load(), color)?;
            Ok(())
        }
        Command::Open => match store.peek() {
            Some(current) => {
                host.navigate(&machine.engine.search_url(&current))?;
                Ok(())
            }
            None => {
                output::print_snapshot(host.writer(), &store.snapshot(), color)?;
                Ok(())
            }
        },
        Command::Url => {
            if let Some(current) = store.peek() {
                writeln!(host.writer(), "{}", machine.engine.search_url(&current))?;
            }
            Ok(())
        }
        Command::Normalize { text } => {
            for line in text {
                writeln!(host.writer(), "{}", normalize_query(&line))?;
            }
            Ok(())
        }
        Command::Library => {
            let entries = host.library().entries();
            output::print_library(host.writer(), &entries, color)?;
            Ok(())
        }
    }
}

fn resolve_data_dir(flag: Option<PathBuf>, config: &ConfigFile) -> anyhow::Result<PathBuf> {
    flag.or_else(|| std::env::var("SCHOLAR_QUEUE_DATA_DIR").ok().map(PathBuf::from))
        .or_else(|| config.data_dir())
        .or_else(scholar_queue_core::storage::default_data_dir)
        .ok_or_else(|| anyhow::anyhow!("Could not determine a data directory; pass --data-dir"))
}

fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn begin<W: Write>(
    file: Option<&Path>,
    store: QueueStore<FileStore>,
    machine: MachineConfig,
    host: &mut CliHost<W>,
) -> anyhow::Result<()> {
    let input = read_input(file)?;
    if input.trim().is_empty() {
        let color = host.color();
        output::print_warning(host.writer(), "No queries in input; queue unchanged.", color)?;
        return Ok(());
    }
    run_trigger(Trigger::Begin(input), store, machine, host)
}

fn run_trigger<W: Write>(
    trigger: Trigger,
    store: QueueStore<FileStore>,
    machine: MachineConfig,
    host: &mut CliHost<W>,
) -> anyhow::Result<()> {
    let mut session = Session::new(store, machine);
    session.dispatch(trigger, host)?;
    session.settle(host);
    host.writer().flush()?;
    Ok(())
}
