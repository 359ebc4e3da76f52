//! Core game model: cells and their selection links, the immutable board,
//! words, players, the game state record and the word legality rule.

mod autoplay;
mod board;
mod cell;
mod player;
mod rules;
mod state;
mod word;

pub use autoplay::AutoPlayInput;
pub use board::{Board, BOARD_SIZE};
pub use cell::{Cell, Direction, LetterCell};
pub use player::{Player, PlayerTurn};
pub use rules::{check_word_allowed, RuleViolation};
pub use state::{GameOutcome, GameState, TurnStage};
pub use word::{Word, WordLetter};
