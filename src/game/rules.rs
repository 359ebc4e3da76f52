use super::state::GameState;
use crate::dictionary::WordDictionary;

/// A rule the player broke when trying to finish a turn. Shown to the player
/// and cleared by their next successful action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum RuleViolation {
    #[error("new letter must be in the word")]
    NewLetterNotIncluded,

    #[error("word was already played")]
    WordAlreadyPlayed,

    #[error("word is not allowed")]
    WordNotAllowed,
}

/// Whether `word` may be played now: not yet played by either player, not the
/// starting word, and present in the allowed share of the dictionary.
pub fn check_word_allowed(
    state: &GameState,
    word: &str,
    use_part_of_dictionary: f64,
    dictionary: &dyn WordDictionary,
) -> Result<(), RuleViolation> {
    let starting_word = state.board.starting_letter_cells_in_order().text();
    let is_word_played = state
        .player1
        .played_words
        .iter()
        .chain(&state.player2.played_words)
        .any(|played| played.text() == word)
        || starting_word == word;
    if is_word_played {
        return Err(RuleViolation::WordAlreadyPlayed);
    }

    if !dictionary.is_allowed(word, use_part_of_dictionary) {
        return Err(RuleViolation::WordNotAllowed);
    }
    Ok(())
}
