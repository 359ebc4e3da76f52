use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, EnableFocusChange},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use letter_path::config::AppConfig;
use letter_path::dictionary::{NounDictionary, WordDictionary};
use letter_path::engine::{Engine, GameSession};
use letter_path::settings::{FileStore, SettingsRepository};
use letter_path::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Play Letter Path in the terminal.
#[derive(Parser)]
#[command(name = "letter_path", about = "Two-player word game on a 5x5 grid")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "letter_path.toml")]
    config: PathBuf,

    /// Override the word list file
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Fixed random seed for starting words and computer moves
    #[arg(long)]
    seed: Option<u64>,

    /// Print the default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(path) = cli.dictionary {
        config.dictionary.path = Some(path);
    }

    // Log to a file so the terminal screen stays intact
    let log_file = File::create(&config.logging.file)
        .with_context(|| format!("creating log file {}", config.logging.file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter)),
        )
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    let dictionary: Arc<dyn WordDictionary> = match &config.dictionary.path {
        Some(path) => Arc::new(NounDictionary::from_path(path)),
        None => Arc::new(NounDictionary::bundled()),
    };
    let settings = SettingsRepository::new(Box::new(FileStore::new(&config.storage.settings_dir)));
    let engine = Engine::new(dictionary, settings, config.engine_options(cli.seed))
        .context("starting the game engine")?;
    info!(agent = engine.agent_name(), "starting Letter Path");

    let session = GameSession::start(engine, config.autoplay.session_options());
    run(session).context("running the terminal UI")
}

fn run(session: GameSession) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableFocusChange)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), DisableFocusChange, LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
