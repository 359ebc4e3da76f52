//! The turn engine: interprets player input against the current game state
//! and replays the computer player's scripted input.

mod autoplay;
pub mod session;
mod turn;

pub use session::{GameCommand, GameSession, SessionEvent};

use std::sync::mpsc::Receiver;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::ai::{Agent, WordSearchAgent};
use crate::dictionary::WordDictionary;
use crate::error::EngineError;
use crate::game::{Board, GameState, Player, BOARD_SIZE};
use crate::settings::{difficulty, theme, GameType, SettingsRecord, SettingsRepository};
use crate::store::{Playback, StateStore};

/// Starting words are drawn from this many of the most common words.
pub const DEFAULT_SEED_POOL_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub seed_pool_size: usize,
    /// Fixed seed for starting words and search tie-breaks.
    pub rng_seed: Option<u64>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            seed_pool_size: DEFAULT_SEED_POOL_SIZE,
            rng_seed: None,
        }
    }
}

/// Owns the game and everything the turn operations need.
///
/// All state changes replace the whole `GameState`; observers subscribe to
/// the store and always see complete states.
pub struct Engine {
    game: StateStore<GameState>,
    playback: StateStore<Playback>,
    dictionary: Arc<dyn WordDictionary>,
    settings: SettingsRepository,
    agent: Box<dyn Agent>,
    rng: StdRng,
    options: EngineOptions,
}

impl Engine {
    /// Loads the dictionary and deals a first game from the current settings.
    ///
    /// No computer move is queued yet; call `new_game` or
    /// `queue_auto_play_inputs` to let a computer first player start.
    pub fn new(
        dictionary: Arc<dyn WordDictionary>,
        settings: SettingsRepository,
        options: EngineOptions,
    ) -> Result<Self, EngineError> {
        dictionary.load_once()?;
        let mut rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let agent: Box<dyn Agent> = Box::new(WordSearchAgent::with_rng(StdRng::from_rng(&mut rng)));
        let initial = Self::deal(dictionary.as_ref(), &settings.read(), options.seed_pool_size, &mut rng)?;
        Ok(Engine {
            game: StateStore::new(initial),
            playback: StateStore::new(Playback::default()),
            dictionary,
            settings,
            agent,
            rng,
            options,
        })
    }

    pub fn with_agent(mut self, agent: Box<dyn Agent>) -> Self {
        self.agent = agent;
        self
    }

    fn deal(
        dictionary: &dyn WordDictionary,
        settings: &SettingsRecord,
        seed_pool_size: usize,
        rng: &mut StdRng,
    ) -> Result<GameState, EngineError> {
        let word = dictionary.random_word(BOARD_SIZE, seed_pool_size, rng)?;
        let board = Board::with_starting_word(&word)?;
        let difficulty = settings.computer_difficulty;
        Ok(GameState::new(
            board,
            Player::new(settings.is_player1_computer, &difficulty),
            Player::new(settings.is_player2_computer, &difficulty),
        ))
    }

    // --- Observation ---

    pub fn state(&self) -> GameState {
        self.game.get()
    }

    pub fn subscribe(&self) -> Receiver<GameState> {
        self.game.subscribe()
    }

    pub fn playback(&self) -> Playback {
        self.playback.get()
    }

    pub fn subscribe_playback(&self) -> Receiver<Playback> {
        self.playback.subscribe()
    }

    pub fn dictionary(&self) -> &dyn WordDictionary {
        self.dictionary.as_ref()
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    pub fn agent(&self) -> &dyn Agent {
        self.agent.as_ref()
    }

    pub fn is_current_player_computer(&self) -> bool {
        self.game.get().is_current_player_computer()
    }

    pub fn is_current_game_losable(&self) -> bool {
        self.game.get().is_losable()
    }

    /// Replaces the whole game, e.g. with a prepared position.
    pub fn restore(&self, state: GameState) {
        self.game.replace(state);
    }

    pub(crate) fn stores(&self) -> (StateStore<GameState>, StateStore<Playback>) {
        (self.game.clone(), self.playback.clone())
    }

    // --- Lifecycle ---

    /// Deals a fresh game from the current settings and resumes play.
    pub fn new_game(&mut self, before_computer_move: &mut dyn FnMut()) -> Result<(), EngineError> {
        let settings = self.settings.read();
        let state = Self::deal(
            self.dictionary.as_ref(),
            &settings,
            self.options.seed_pool_size,
            &mut self.rng,
        )?;
        info!(
            starting_word = %state.starting_word(),
            game_type = %settings.game_type(),
            "new game"
        );
        self.game.replace(state);
        self.on_resume();
        self.queue_auto_play_inputs(before_computer_move);
        Ok(())
    }

    pub fn on_pause(&self) {
        self.playback.update(|playback| Playback {
            is_paused: true,
            ..*playback
        });
    }

    pub fn on_resume(&self) {
        self.playback.update(|playback| Playback {
            is_paused: false,
            ..*playback
        });
    }

    pub fn set_shown(&self, is_shown: bool) {
        self.playback.update(|playback| Playback {
            is_shown,
            ..*playback
        });
    }

    // --- Settings, applied from the next game on ---

    pub fn settings(&self) -> SettingsRecord {
        self.settings.read()
    }

    pub fn subscribe_settings(&self) -> Receiver<SettingsRecord> {
        self.settings.subscribe()
    }

    pub fn set_game_type(&self, game_type: GameType) -> Result<(), EngineError> {
        let record = self.settings.read().with_game_type(game_type);
        self.settings.update(record)?;
        Ok(())
    }

    pub fn set_game_type_index(&self, index: usize) -> Result<(), EngineError> {
        self.set_game_type(GameType::from_index(index))
    }

    /// Selects a difficulty preset; an unknown index selects the default preset.
    pub fn set_preset_difficulty(&self, index: usize) -> Result<(), EngineError> {
        let preset = difficulty::presets()
            .get(index)
            .copied()
            .unwrap_or_else(difficulty::default_preset);
        self.settings.update(self.settings.read().with_difficulty(preset))?;
        Ok(())
    }

    /// Switches between the default preset and the default custom difficulty.
    pub fn set_default_difficulty(&self, is_custom: bool) -> Result<(), EngineError> {
        let difficulty = if is_custom {
            difficulty::default_custom()
        } else {
            difficulty::default_preset()
        };
        self.settings.update(self.settings.read().with_difficulty(difficulty))?;
        Ok(())
    }

    pub fn set_custom_max_word_length(&self, max_word_length: usize) -> Result<(), EngineError> {
        let record = self.settings.read();
        let difficulty = difficulty::DifficultyRecord {
            max_word_length,
            ..record.computer_difficulty
        };
        self.settings.update(record.with_difficulty(difficulty))?;
        Ok(())
    }

    pub fn set_custom_max_vocabulary_percentage(&self, percentage: u32) -> Result<(), EngineError> {
        let record = self.settings.read();
        let difficulty = difficulty::DifficultyRecord {
            max_vocabulary_normalized_size: f64::from(percentage) / 100.0,
            ..record.computer_difficulty
        };
        self.settings.update(record.with_difficulty(difficulty))?;
        Ok(())
    }

    /// Selects a color theme; an unknown index selects the default theme.
    /// Takes effect immediately.
    pub fn set_color_theme(&self, index: usize) -> Result<(), EngineError> {
        if index >= theme::themes().len() {
            debug!(index, "unknown color theme, using the default");
        }
        self.settings.update(self.settings.read().with_color_theme(index))?;
        Ok(())
    }

    /// Index of the selected difficulty preset, `None` when it is custom.
    pub fn difficulty_selection_index(&self) -> Option<usize> {
        difficulty::selection_index(&self.settings.read().computer_difficulty)
    }
}
