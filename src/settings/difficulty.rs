use serde::{Deserialize, Serialize};

/// How strong the computer player is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyRecord {
    /// Longest word the computer looks for.
    pub max_word_length: usize,
    /// Share of the dictionary the computer knows, most common words first.
    pub max_vocabulary_normalized_size: f64,
    pub is_custom: bool,
}

impl DifficultyRecord {
    const fn preset(max_word_length: usize, max_vocabulary_normalized_size: f64) -> Self {
        DifficultyRecord {
            max_word_length,
            max_vocabulary_normalized_size,
            is_custom: false,
        }
    }
}

impl Default for DifficultyRecord {
    fn default() -> Self {
        default_preset()
    }
}

pub const EASY: DifficultyRecord = DifficultyRecord::preset(4, 0.1);
pub const MEDIUM: DifficultyRecord = DifficultyRecord::preset(5, 0.15);
pub const HARD: DifficultyRecord = DifficultyRecord::preset(6, 0.2);
pub const ULTRA: DifficultyRecord = DifficultyRecord::preset(10, 0.5);

/// Selectable presets, easiest first.
pub fn presets() -> [DifficultyRecord; 4] {
    [EASY, MEDIUM, HARD, ULTRA]
}

pub fn default_preset() -> DifficultyRecord {
    MEDIUM
}

/// Starting point when the player switches to a custom difficulty.
pub fn default_custom() -> DifficultyRecord {
    DifficultyRecord {
        is_custom: true,
        ..HARD
    }
}

/// Position of `difficulty` among the presets, `None` for custom values.
pub fn selection_index(difficulty: &DifficultyRecord) -> Option<usize> {
    presets().iter().position(|preset| preset == difficulty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_medium() {
        let difficulty = DifficultyRecord::default();
        assert_eq!(difficulty.max_word_length, 5);
        assert!((difficulty.max_vocabulary_normalized_size - 0.15).abs() < 1e-9);
        assert!(!difficulty.is_custom);
    }

    #[test]
    fn test_selection_index() {
        assert_eq!(selection_index(&EASY), Some(0));
        assert_eq!(selection_index(&ULTRA), Some(3));
        assert_eq!(selection_index(&default_custom()), None);
    }

    #[test]
    fn test_default_custom_copies_hard() {
        let custom = default_custom();
        assert!(custom.is_custom);
        assert_eq!(custom.max_word_length, HARD.max_word_length);
    }
}
