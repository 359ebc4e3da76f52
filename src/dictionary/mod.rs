//! Frequency-ranked word lists the game validates words against.

mod nouns;

pub use nouns::NounDictionary;

use rand::RngCore;

use crate::error::DictionaryError;

/// Read-only word source ranked by commonness.
///
/// Every query takes a `fraction` of the list to use, counted from the most
/// common word: 0.1 is the most common tenth, 1.0 the whole list.
pub trait WordDictionary: Send + Sync {
    /// Load the list if it is not loaded yet. Later calls do nothing.
    fn load_once(&self) -> Result<(), DictionaryError>;

    /// A random word of `length` letters among the `pool_size` most common.
    fn random_word(
        &self,
        length: usize,
        pool_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<String, DictionaryError>;

    /// The most common words, in rank order.
    fn most_common(&self, fraction: f64) -> &[String];

    fn is_allowed(&self, word: &str, fraction: f64) -> bool;

    /// Whether any allowed word contains `substring`.
    fn has_substring_match(&self, substring: &str, fraction: f64) -> bool {
        self.most_common(fraction)
            .iter()
            .any(|word| word.contains(substring))
    }
}
