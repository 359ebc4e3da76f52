use super::word::Word;
use crate::settings::DifficultyRecord;

/// Whose turn it is, or that the game has been played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerTurn {
    Player1,
    Player2,
    GameOver,
}

impl PlayerTurn {
    /// Get the other player. `GameOver` stays `GameOver`.
    pub fn other(self) -> PlayerTurn {
        match self {
            PlayerTurn::Player1 => PlayerTurn::Player2,
            PlayerTurn::Player2 => PlayerTurn::Player1,
            PlayerTurn::GameOver => PlayerTurn::GameOver,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub played_words: Vec<Word>,
    pub is_computer: bool,
    pub computer_max_word_length: usize,
    /// Share of the dictionary, most common words first, the computer may use.
    /// 0.5 is the more common half of the nouns, 1.0 all of them.
    pub computer_max_vocabulary_normalized_size: f64,
}

impl Player {
    pub fn new(is_computer: bool, difficulty: &DifficultyRecord) -> Self {
        Player {
            played_words: Vec::new(),
            is_computer,
            computer_max_word_length: difficulty.max_word_length,
            computer_max_vocabulary_normalized_size: difficulty.max_vocabulary_normalized_size,
        }
    }

    pub fn human(difficulty: &DifficultyRecord) -> Self {
        Self::new(false, difficulty)
    }

    pub fn computer(difficulty: &DifficultyRecord) -> Self {
        Self::new(true, difficulty)
    }

    /// Total length of all played words.
    pub fn score(&self) -> usize {
        self.played_words.iter().map(Word::len).sum()
    }

    pub fn with_word_played(&self, word: Word) -> Player {
        let mut played_words = self.played_words.clone();
        played_words.push(word);
        Player {
            played_words,
            ..self.clone()
        }
    }
}
