use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use letter_path::config::AppConfig;
use letter_path::dictionary::{NounDictionary, WordDictionary};
use letter_path::engine::Engine;
use letter_path::game::{GameOutcome, GameState, PlayerTurn};
use letter_path::settings::{DifficultyRecord, GameType, SettingsRepository};

/// Let two computer players play against each other without a screen.
#[derive(Parser)]
#[command(name = "selfplay", about = "Run computer vs computer Letter Path games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "letter_path.toml")]
    config: PathBuf,

    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Longest word the computers may trace
    #[arg(long, default_value_t = 6)]
    max_word_length: usize,

    /// Share of the dictionary the computers know, between 0 and 1
    #[arg(long, default_value_t = 0.2)]
    vocabulary: f64,

    /// Seed for the first game; later games use the following seeds
    #[arg(long)]
    seed: Option<u64>,

    /// Override the word list file
    #[arg(long)]
    dictionary: Option<PathBuf>,
}

#[derive(Debug, Default)]
struct Tally {
    player1_wins: usize,
    player2_wins: usize,
    draws: usize,
    give_ups: usize,
    words: usize,
    letters: usize,
}

impl Tally {
    fn record(&mut self, state: &GameState) {
        match state.outcome() {
            Some(GameOutcome::Winner(PlayerTurn::Player1)) => self.player1_wins += 1,
            Some(GameOutcome::Winner(_)) => self.player2_wins += 1,
            Some(GameOutcome::Draw) | None => self.draws += 1,
        }
        if state.player_turn != PlayerTurn::GameOver {
            self.give_ups += 1;
        }
        self.words += state.player1.played_words.len() + state.player2.played_words.len();
        self.letters += state.player1.score() + state.player2.score();
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if !(0.0..=1.0).contains(&cli.vocabulary) {
        bail!("--vocabulary must be between 0 and 1, got {}", cli.vocabulary);
    }
    if cli.max_word_length < 2 {
        bail!("--max-word-length must be at least 2");
    }

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(path) = cli.dictionary {
        config.dictionary.path = Some(path);
    }

    let dictionary: Arc<dyn WordDictionary> = match &config.dictionary.path {
        Some(path) => Arc::new(NounDictionary::from_path(path)),
        None => Arc::new(NounDictionary::bundled()),
    };
    let difficulty = DifficultyRecord {
        max_word_length: cli.max_word_length,
        max_vocabulary_normalized_size: cli.vocabulary,
        is_custom: true,
    };

    let mut tally = Tally::default();
    let started = Instant::now();
    for game in 0..cli.games {
        let settings = SettingsRepository::in_memory();
        settings
            .update(
                settings
                    .read()
                    .with_game_type(GameType::ComputerVsComputer)
                    .with_difficulty(difficulty),
            )
            .context("preparing settings")?;
        let seed = cli.seed.map(|seed| seed.wrapping_add(game as u64));
        let mut engine = Engine::new(Arc::clone(&dictionary), settings, config.engine_options(seed))
            .context("starting the game engine")?;

        let state = play_out(&mut engine).with_context(|| format!("playing game {}", game + 1))?;
        println!(
            "Game {:>3}: {:<5}  {:>2} - {:<2}  {}",
            game + 1,
            state.starting_word().text(),
            state.player1.score(),
            state.player2.score(),
            describe(&state)
        );
        tally.record(&state);
    }

    let elapsed = started.elapsed();
    println!();
    println!(
        "Computer 1 won {}, Computer 2 won {}, {} draws ({} ended by giving up)",
        tally.player1_wins, tally.player2_wins, tally.draws, tally.give_ups
    );
    if tally.words > 0 {
        println!(
            "{} words played, {:.2} letters per word",
            tally.words,
            tally.letters as f64 / tally.words as f64
        );
    }
    info!(games = cli.games, ?elapsed, "self-play finished");
    println!("Finished in {:.1}s", elapsed.as_secs_f64());
    Ok(())
}

/// Replays computer moves until the game ends.
fn play_out(engine: &mut Engine) -> Result<GameState> {
    engine.new_game(&mut || {})?;
    // one planned move per turn and at most one turn per empty cell
    for _ in 0..=letter_path::game::BOARD_SIZE * letter_path::game::BOARD_SIZE {
        engine.consume_all_auto_play_inputs(&mut || {});
        let state = engine.state();
        if state.is_terminal() {
            return Ok(state);
        }
        if let Some(error) = state.error {
            warn!(%error, "computer move was rejected");
        }
        engine.queue_auto_play_inputs(&mut || {});
    }
    bail!("game did not finish")
}

fn describe(state: &GameState) -> String {
    let ending = match state.outcome() {
        Some(GameOutcome::Winner(PlayerTurn::Player1)) => "Computer 1 won",
        Some(GameOutcome::Winner(_)) => "Computer 2 won",
        Some(GameOutcome::Draw) | None => "draw",
    };
    if state.player_turn == PlayerTurn::GameOver {
        ending.to_string()
    } else {
        format!("{ending}, the other gave up")
    }
}
