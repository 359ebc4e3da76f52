use crate::dictionary::WordDictionary;
use crate::game::{GameState, Word};

/// Counters from the most recent search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Candidate paths of two or more letters that survived pruning.
    pub candidates: usize,
    /// Length of the longest surviving candidate.
    pub longest_candidate: usize,
}

/// Universal interface for computer players.
pub trait Agent: Send {
    /// Pick the word to play for the player whose turn it is in `state`.
    ///
    /// `None` means there is no legal word and the player gives up.
    fn plan_move(&mut self, state: &GameState, dictionary: &dyn WordDictionary) -> Option<Word>;

    /// Return the agent's display name.
    fn name(&self) -> &str;

    fn last_stats(&self) -> Option<SearchStats> {
        None
    }
}
