use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::Engine;
use crate::error::EngineError;
use crate::game::GameState;
use crate::settings::{GameType, SettingsRecord};
use crate::store::{Playback, StateStore};

/// Input sent from the UI thread to the game thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameCommand {
    CellClick { row: usize, column: usize },
    Letter(char),
    Delete,
    Enter,
    NewGame,
    Pause,
    Resume,
    SetShown(bool),
    SetGameType(GameType),
    SetPresetDifficulty(usize),
    SetDefaultDifficulty { is_custom: bool },
    SetCustomMaxWordLength(usize),
    SetCustomMaxVocabularyPercentage(u32),
    SetColorTheme(usize),
    Quit,
}

/// Notifications sent from the game thread to the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The computer is about to search for its move.
    ComputerThinking,
    Error(String),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Pause between two replayed computer inputs.
    pub step_delay: Duration,
    /// Pause after announcing a computer search, so the UI can show it.
    pub think_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        SessionOptions {
            step_delay: Duration::from_millis(300),
            think_delay: Duration::from_millis(50),
        }
    }
}

/// Runs an `Engine` on its own thread.
///
/// Commands are applied in the order they are sent. Between commands the
/// thread replays one queued computer input per `step_delay` while playback
/// is active.
pub struct GameSession {
    commands: Sender<GameCommand>,
    events: Receiver<SessionEvent>,
    game: StateStore<GameState>,
    playback: StateStore<Playback>,
    settings: SettingsRecord,
    settings_updates: Receiver<SettingsRecord>,
    handle: Option<JoinHandle<()>>,
}

impl GameSession {
    pub fn start(engine: Engine, options: SessionOptions) -> Self {
        let (command_tx, command_rx) = mpsc::channel::<GameCommand>();
        let (event_tx, event_rx) = mpsc::channel::<SessionEvent>();
        let (game, playback) = engine.stores();
        let settings = engine.settings();
        let settings_updates = engine.subscribe_settings();

        let handle = thread::spawn(move || run_game_thread(engine, command_rx, event_tx, options));

        GameSession {
            commands: command_tx,
            events: event_rx,
            game,
            playback,
            settings,
            settings_updates,
            handle: Some(handle),
        }
    }

    pub fn send(&self, command: GameCommand) {
        if self.commands.send(command).is_err() {
            warn!("game thread has stopped");
        }
    }

    /// Latest game state.
    pub fn state(&self) -> GameState {
        self.game.get()
    }

    pub fn playback(&self) -> Playback {
        self.playback.get()
    }

    /// Latest saved settings, which apply from the next game on.
    pub fn settings(&mut self) -> SettingsRecord {
        if let Some(latest) = self.settings_updates.try_iter().last() {
            self.settings = latest;
        }
        self.settings
    }

    pub fn subscribe(&self) -> Receiver<GameState> {
        self.game.subscribe()
    }

    /// Events emitted since the last call.
    pub fn drain_events(&self) -> Vec<SessionEvent> {
        self.events.try_iter().collect()
    }

    /// Stops the game thread and waits for it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let _ = self.commands.send(GameCommand::Quit);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("game thread panicked");
            }
        }
    }
}

impl Drop for GameSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_game_thread(
    mut engine: Engine,
    commands: Receiver<GameCommand>,
    events: Sender<SessionEvent>,
    options: SessionOptions,
) {
    let thinking_events = events.clone();
    let think_delay = options.think_delay;
    let mut before_computer_move = move || {
        let _ = thinking_events.send(SessionEvent::ComputerThinking);
        thread::sleep(think_delay);
    };

    // a computer first player starts right away
    engine.queue_auto_play_inputs(&mut before_computer_move);

    let mut next_step = Instant::now() + options.step_delay;
    loop {
        let wait = next_step.saturating_duration_since(Instant::now());
        match commands.recv_timeout(wait) {
            Ok(GameCommand::Quit) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(command) => {
                if let Err(e) = apply(&mut engine, command, &mut before_computer_move) {
                    warn!(error = %e, "command failed");
                    let _ = events.send(SessionEvent::Error(e.to_string()));
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                engine.consume_next_auto_play_input(&mut before_computer_move);
                next_step = Instant::now() + options.step_delay;
            }
        }
    }
    debug!("game thread finished");
}

fn apply(
    engine: &mut Engine,
    command: GameCommand,
    before_computer_move: &mut dyn FnMut(),
) -> Result<(), EngineError> {
    match command {
        GameCommand::CellClick { row, column } => engine.cell_click(true, row, column),
        GameCommand::Letter(letter) => engine.letter_input(true, letter),
        GameCommand::Delete => engine.delete_press(true),
        GameCommand::Enter => engine.enter_press(true, before_computer_move),
        GameCommand::NewGame => engine.new_game(before_computer_move)?,
        GameCommand::Pause => engine.on_pause(),
        GameCommand::Resume => engine.on_resume(),
        GameCommand::SetShown(is_shown) => engine.set_shown(is_shown),
        GameCommand::SetGameType(game_type) => engine.set_game_type(game_type)?,
        GameCommand::SetPresetDifficulty(index) => engine.set_preset_difficulty(index)?,
        GameCommand::SetDefaultDifficulty { is_custom } => {
            engine.set_default_difficulty(is_custom)?
        }
        GameCommand::SetCustomMaxWordLength(length) => engine.set_custom_max_word_length(length)?,
        GameCommand::SetCustomMaxVocabularyPercentage(percentage) => {
            engine.set_custom_max_vocabulary_percentage(percentage)?
        }
        GameCommand::SetColorTheme(index) => engine.set_color_theme(index)?,
        GameCommand::Quit => {}
    }
    Ok(())
}
