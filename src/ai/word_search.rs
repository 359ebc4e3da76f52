use std::collections::{BTreeMap, HashSet};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, instrument};

use super::agent::{Agent, SearchStats};
use crate::dictionary::WordDictionary;
use crate::game::{check_word_allowed, Board, Direction, GameState, Word, WordLetter};

/// Grows candidate paths outward from every legal new-letter placement and
/// plays the longest one that is a real, unplayed word.
///
/// Each generation adds one board letter at either end of every candidate.
/// Candidates that no known word contains are dropped before growing further,
/// which keeps the search small even at long word lengths.
pub struct WordSearchAgent {
    rng: StdRng,
    last_stats: Option<SearchStats>,
}

impl WordSearchAgent {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        WordSearchAgent {
            rng,
            last_stats: None,
        }
    }
}

impl Default for WordSearchAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn board_letter(board: &Board, row: usize, column: usize) -> Option<WordLetter> {
    board.get(row, column)?.letter().map(|cell| WordLetter {
        letter: cell.letter,
        row,
        column,
        is_new: false,
    })
}

/// Candidates one letter longer, extended at the front then at the back.
fn grow(word: &Word, board: &Board) -> Vec<Word> {
    let (Some(first), Some(last)) = (word.first(), word.last()) else {
        return Vec::new();
    };
    let mut longer = Vec::new();
    for (anchor, at_front) in [(first, true), (last, false)] {
        for direction in Direction::ALL {
            let Some((row, column)) = direction.step(anchor.row, anchor.column) else {
                continue;
            };
            if word.contains_cell(row, column) {
                continue;
            }
            let Some(letter) = board_letter(board, row, column) else {
                continue;
            };
            let mut letters = Vec::with_capacity(word.len() + 1);
            if at_front {
                letters.push(letter);
                letters.extend_from_slice(&word.letters);
            } else {
                letters.extend_from_slice(&word.letters);
                letters.push(letter);
            }
            longer.push(Word::new(letters));
        }
    }
    longer
}

/// Every path up to `max_length` letters containing `letter` placed at one of
/// the board's free spots, pruned to those some known word contains.
fn candidates_for_letter(
    board: &Board,
    letter: char,
    max_length: usize,
    fraction: f64,
    dictionary: &dyn WordDictionary,
) -> Vec<Word> {
    let mut generation: Vec<Word> = board
        .placements()
        .into_iter()
        .map(|(row, column)| {
            Word::new(vec![WordLetter {
                letter,
                row,
                column,
                is_new: true,
            }])
        })
        .collect();
    let mut all = generation.clone();

    for _ in 1..max_length {
        let mut seen = HashSet::new();
        generation = generation
            .iter()
            .flat_map(|word| grow(word, board))
            .filter(|word| seen.insert(word.clone()))
            .filter(|word| dictionary.has_substring_match(&word.text(), fraction))
            .collect();
        if generation.is_empty() {
            break;
        }
        all.extend(generation.iter().cloned());
    }
    all
}

impl Agent for WordSearchAgent {
    #[instrument(skip_all, fields(turn = ?state.player_turn))]
    fn plan_move(&mut self, state: &GameState, dictionary: &dyn WordDictionary) -> Option<Word> {
        let player = state.current_player()?;
        let max_length = player.computer_max_word_length;
        let fraction = player.computer_max_vocabulary_normalized_size;

        let mut by_length: BTreeMap<usize, Vec<Word>> = BTreeMap::new();
        for letter in 'a'..='z' {
            for word in candidates_for_letter(&state.board, letter, max_length, fraction, dictionary)
            {
                // a lone new letter can never be confirmed
                if word.len() >= 2 {
                    by_length.entry(word.len()).or_default().push(word);
                }
            }
        }
        for words in by_length.values_mut() {
            words.shuffle(&mut self.rng);
        }

        let stats = SearchStats {
            candidates: by_length.values().map(Vec::len).sum(),
            longest_candidate: by_length.keys().next_back().copied().unwrap_or(0),
        };
        self.last_stats = Some(stats);
        debug!(?stats, "candidates collected");

        let chosen = by_length
            .into_values()
            .flatten()
            .rev()
            .find(|word| check_word_allowed(state, &word.text(), fraction, dictionary).is_ok());
        match &chosen {
            Some(word) => debug!(%word, "word chosen"),
            None => debug!("no legal word"),
        }
        chosen
    }

    fn name(&self) -> &str {
        "Word search"
    }

    fn last_stats(&self) -> Option<SearchStats> {
        self.last_stats
    }
}
