//! Persisted player settings: game type, computer difficulty and color theme.

pub mod difficulty;
mod storage;
pub mod theme;

pub use difficulty::DifficultyRecord;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use theme::ColorTheme;

use std::fmt;
use std::sync::mpsc::Receiver;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::store::StateStore;

/// Bumped whenever the stored layout changes. Older records are discarded.
pub const SCHEMA_VERSION: u32 = 2;

const SETTINGS_KEY: &str = "settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    HumanVsHuman,
    HumanVsComputer,
    ComputerVsComputer,
}

impl GameType {
    pub const ALL: [GameType; 3] = [
        GameType::HumanVsHuman,
        GameType::HumanVsComputer,
        GameType::ComputerVsComputer,
    ];

    /// Index as shown in the game type picker; anything past the end means
    /// computer against computer.
    pub fn from_index(index: usize) -> GameType {
        match index {
            0 => GameType::HumanVsHuman,
            1 => GameType::HumanVsComputer,
            _ => GameType::ComputerVsComputer,
        }
    }

    pub fn index(self) -> usize {
        match self {
            GameType::HumanVsHuman => 0,
            GameType::HumanVsComputer => 1,
            GameType::ComputerVsComputer => 2,
        }
    }

    pub fn next(self) -> GameType {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Which players the computer controls, player 1 first.
    pub fn computer_players(self) -> (bool, bool) {
        match self {
            GameType::HumanVsHuman => (false, false),
            GameType::HumanVsComputer => (false, true),
            GameType::ComputerVsComputer => (true, true),
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameType::HumanVsHuman => "Player vs Player",
            GameType::HumanVsComputer => "Player vs Computer",
            GameType::ComputerVsComputer => "Computer vs Computer",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SettingsRecord {
    pub schema_version: u32,
    pub is_player1_computer: bool,
    pub is_player2_computer: bool,
    pub computer_difficulty: DifficultyRecord,
    /// Position in `theme::themes()`; records saved before themes existed get the default.
    #[serde(default)]
    pub color_theme_index: usize,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        SettingsRecord {
            schema_version: SCHEMA_VERSION,
            is_player1_computer: false,
            is_player2_computer: true,
            computer_difficulty: difficulty::default_preset(),
            color_theme_index: theme::DEFAULT_INDEX,
        }
    }
}

impl SettingsRecord {
    pub fn game_type(&self) -> GameType {
        match (self.is_player1_computer, self.is_player2_computer) {
            (false, false) => GameType::HumanVsHuman,
            (false, true) => GameType::HumanVsComputer,
            // a computer first player only happens in computer-only games
            (true, _) => GameType::ComputerVsComputer,
        }
    }

    pub fn with_game_type(self, game_type: GameType) -> Self {
        let (is_player1_computer, is_player2_computer) = game_type.computer_players();
        SettingsRecord {
            is_player1_computer,
            is_player2_computer,
            ..self
        }
    }

    pub fn with_difficulty(self, computer_difficulty: DifficultyRecord) -> Self {
        SettingsRecord {
            computer_difficulty,
            ..self
        }
    }

    /// Selects the theme at `index`; an unknown index selects the default theme.
    pub fn with_color_theme(self, index: usize) -> Self {
        SettingsRecord {
            color_theme_index: theme::checked_index(index),
            ..self
        }
    }

    pub fn color_theme(&self) -> ColorTheme {
        theme::theme(self.color_theme_index)
    }

    fn decode(json: &str) -> Option<Self> {
        match serde_json::from_str::<SettingsRecord>(json) {
            Ok(record) if record.schema_version == SCHEMA_VERSION => Some(record),
            Ok(record) => {
                warn!(
                    found = record.schema_version,
                    expected = SCHEMA_VERSION,
                    "settings schema changed, using defaults"
                );
                None
            }
            Err(e) => {
                warn!(error = %e, "stored settings unreadable, using defaults");
                None
            }
        }
    }
}

/// Current settings, backed by a key/value store.
///
/// Read once at construction; later reads come from memory.
pub struct SettingsRepository {
    storage: Box<dyn KeyValueStore>,
    current: StateStore<SettingsRecord>,
}

impl SettingsRepository {
    pub fn new(storage: Box<dyn KeyValueStore>) -> Self {
        let stored = storage.read_string(SETTINGS_KEY, "");
        let record = if stored.trim().is_empty() {
            SettingsRecord::default()
        } else {
            SettingsRecord::decode(&stored).unwrap_or_default()
        };
        debug!(?record, "settings read");
        SettingsRepository {
            storage,
            current: StateStore::new(record),
        }
    }

    /// Settings held in memory only.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn read(&self) -> SettingsRecord {
        self.current.get()
    }

    /// Writes the settings to storage, then makes them current. A failed
    /// write leaves the current settings untouched.
    pub fn update(&self, record: SettingsRecord) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&record).map_err(std::io::Error::other)?;
        self.storage.write_string(SETTINGS_KEY, &json)?;
        self.current.replace(record);
        Ok(())
    }

    pub fn subscribe(&self) -> Receiver<SettingsRecord> {
        self.current.subscribe()
    }
}

impl fmt::Debug for SettingsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingsRepository")
            .field("current", &self.current.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_storage_empty() {
        let repository = SettingsRepository::in_memory();
        let record = repository.read();
        assert_eq!(record, SettingsRecord::default());
        assert_eq!(record.game_type(), GameType::HumanVsComputer);
    }

    #[test]
    fn test_settings_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let repository = SettingsRepository::new(Box::new(FileStore::new(dir.path())));
        let record = repository
            .read()
            .with_game_type(GameType::ComputerVsComputer)
            .with_difficulty(difficulty::ULTRA);
        repository.update(record).unwrap();

        let reopened = SettingsRepository::new(Box::new(FileStore::new(dir.path())));
        assert_eq!(reopened.read(), record);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let storage = MemoryStore::new();
        storage.write_string(SETTINGS_KEY, "not json").unwrap();
        let repository = SettingsRepository::new(Box::new(storage));
        assert_eq!(repository.read(), SettingsRecord::default());
    }

    #[test]
    fn test_schema_mismatch_falls_back_to_defaults() {
        let old = SettingsRecord {
            schema_version: SCHEMA_VERSION - 1,
            is_player1_computer: true,
            ..SettingsRecord::default()
        };
        let storage = MemoryStore::new();
        storage
            .write_string(SETTINGS_KEY, &serde_json::to_string(&old).unwrap())
            .unwrap();
        let repository = SettingsRepository::new(Box::new(storage));
        assert_eq!(repository.read(), SettingsRecord::default());
    }

    #[test]
    fn test_game_type_indices() {
        assert_eq!(GameType::from_index(0), GameType::HumanVsHuman);
        assert_eq!(GameType::from_index(1), GameType::HumanVsComputer);
        assert_eq!(GameType::from_index(2), GameType::ComputerVsComputer);
        assert_eq!(GameType::from_index(9), GameType::ComputerVsComputer);
        for game_type in GameType::ALL {
            let record = SettingsRecord::default().with_game_type(game_type);
            assert_eq!(record.game_type(), game_type);
        }
        assert_eq!(GameType::ComputerVsComputer.next(), GameType::HumanVsHuman);
    }

    #[test]
    fn test_update_notifies_subscribers() {
        let repository = SettingsRepository::in_memory();
        let rx = repository.subscribe();
        let record = repository.read().with_game_type(GameType::HumanVsHuman);
        repository.update(record).unwrap();
        assert_eq!(rx.try_recv().unwrap(), record);
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read_string(&self, _key: &str, default: &str) -> String {
            default.to_string()
        }

        fn write_string(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }
    }

    #[test]
    fn test_failed_write_keeps_current_settings() {
        let repository = SettingsRepository::new(Box::new(ReadOnlyStore));
        let rx = repository.subscribe();
        let record = repository.read().with_game_type(GameType::HumanVsHuman);
        assert!(matches!(repository.update(record), Err(StorageError::Io(_))));
        assert_eq!(repository.read(), SettingsRecord::default());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_color_theme_persists_and_old_records_get_default() {
        let dir = tempfile::tempdir().unwrap();
        let repository = SettingsRepository::new(Box::new(FileStore::new(dir.path())));
        repository.update(repository.read().with_color_theme(1)).unwrap();
        let reopened = SettingsRepository::new(Box::new(FileStore::new(dir.path())));
        assert_eq!(reopened.read().color_theme(), theme::CYBER);

        let storage = MemoryStore::new();
        let without_theme = format!(
            r#"{{"schema_version":{SCHEMA_VERSION},"is_player1_computer":false,"is_player2_computer":false,
            "computer_difficulty":{{"max_word_length":4,"max_vocabulary_normalized_size":0.1,"is_custom":false}}}}"#
        );
        storage.write_string(SETTINGS_KEY, &without_theme).unwrap();
        let record = SettingsRepository::new(Box::new(storage)).read();
        assert_eq!(record.game_type(), GameType::HumanVsHuman);
        assert_eq!(record.color_theme_index, theme::DEFAULT_INDEX);
    }

    #[test]
    fn test_unknown_color_theme_selects_default() {
        let record = SettingsRecord::default().with_color_theme(3);
        assert_eq!(record.color_theme(), theme::LIGHT);
        assert_eq!(record.with_color_theme(99).color_theme_index, theme::DEFAULT_INDEX);
    }
}
