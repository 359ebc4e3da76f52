//! # Letter Path
//!
//! A two-player word game on a 5×5 grid. Each turn a player places one new
//! letter next to the existing ones, then traces a path of adjacent letters
//! through it that spells a dictionary noun nobody has played yet. The game
//! ends when the grid is full; the longer total of played words wins.
//!
//! ## Modules
//!
//! - [`game`]: Board, cells, words, players, game state and word rules
//! - [`dictionary`]: Frequency-ranked noun list behind the [`dictionary::WordDictionary`] gateway
//! - [`store`]: Observable whole-value state cells
//! - [`engine`]: Turn engine, auto-play replay and the threaded game session
//! - [`ai`]: Computer move search
//! - [`settings`]: Persisted settings, difficulty presets and key/value storage
//! - [`ui`]: Terminal UI shell
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod game;
pub mod settings;
pub mod store;
pub mod ui;
