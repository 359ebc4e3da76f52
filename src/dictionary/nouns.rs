use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::OnceLock;

use rand::seq::IndexedRandom;
use rand::RngCore;
use tracing::{debug, info};

use super::WordDictionary;
use crate::error::DictionaryError;

const BUNDLED_NOUNS: &str = include_str!("../../data/common_nouns.txt");

#[derive(Debug, Clone)]
enum Source {
    Text(String),
    File(PathBuf),
}

#[derive(Debug)]
struct Ranked {
    words: Vec<String>,
    ranks: HashMap<String, usize>,
}

impl Ranked {
    fn from_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut words = Vec::new();
        let mut ranks = HashMap::new();
        for line in lines {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            let word = word.to_lowercase();
            if !ranks.contains_key(&word) {
                ranks.insert(word.clone(), words.len());
                words.push(word);
            }
        }
        Ranked { words, ranks }
    }

    fn cutoff(&self, fraction: f64) -> usize {
        let cutoff = (fraction.clamp(0.0, 1.0) * self.words.len() as f64).round();
        (cutoff as usize).min(self.words.len())
    }
}

/// Noun list ranked by frequency, one word per line, most common first.
///
/// Blank lines and `#` comments are skipped, words are lowercased and a
/// repeated word keeps its first rank. The list is parsed on first use.
#[derive(Debug)]
pub struct NounDictionary {
    source: Source,
    loaded: OnceLock<Ranked>,
}

impl NounDictionary {
    /// The list shipped with the game.
    pub fn bundled() -> Self {
        Self::from_text(BUNDLED_NOUNS)
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        NounDictionary {
            source: Source::Text(text.into()),
            loaded: OnceLock::new(),
        }
    }

    /// Reads the file on `load_once`.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        NounDictionary {
            source: Source::File(path.into()),
            loaded: OnceLock::new(),
        }
    }

    /// Already loaded from an in-memory list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<S> = words.into_iter().collect();
        let ranked = Ranked::from_lines(words.iter().map(AsRef::as_ref));
        let loaded = OnceLock::new();
        let _ = loaded.set(ranked);
        NounDictionary {
            source: Source::Text(String::new()),
            loaded,
        }
    }

    pub fn len(&self) -> usize {
        self.loaded.get().map_or(0, |ranked| ranked.words.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordDictionary for NounDictionary {
    fn load_once(&self) -> Result<(), DictionaryError> {
        if self.loaded.get().is_some() {
            return Ok(());
        }
        let ranked = match &self.source {
            Source::Text(text) => Ranked::from_lines(text.lines()),
            Source::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|e| DictionaryError::FileRead {
                    path: path.clone(),
                    source: e,
                })?;
                Ranked::from_lines(text.lines())
            }
        };
        if ranked.words.is_empty() {
            return Err(DictionaryError::Empty);
        }
        info!(words = ranked.words.len(), "dictionary loaded");
        // a concurrent loader may have won; both parsed the same source
        let _ = self.loaded.set(ranked);
        Ok(())
    }

    fn random_word(
        &self,
        length: usize,
        pool_size: usize,
        rng: &mut dyn RngCore,
    ) -> Result<String, DictionaryError> {
        let ranked = self.loaded.get().ok_or(DictionaryError::NotLoaded)?;
        let candidates: Vec<&String> = ranked
            .words
            .iter()
            .take(pool_size)
            .filter(|word| word.chars().count() == length)
            .collect();
        let word = candidates
            .choose(rng)
            .ok_or(DictionaryError::NoWordOfLength { length, pool_size })?;
        debug!(%word, "picked random word");
        Ok((*word).clone())
    }

    fn most_common(&self, fraction: f64) -> &[String] {
        match self.loaded.get() {
            Some(ranked) => &ranked.words[..ranked.cutoff(fraction)],
            None => &[],
        }
    }

    fn is_allowed(&self, word: &str, fraction: f64) -> bool {
        self.loaded.get().is_some_and(|ranked| {
            ranked
                .ranks
                .get(word)
                .is_some_and(|&rank| rank < ranked.cutoff(fraction))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;

    fn sample() -> NounDictionary {
        NounDictionary::from_words(["time", "house", "horse", "mouse", "zebra"])
    }

    #[test]
    fn test_most_common_rounds_cutoff() {
        let dictionary = sample();
        assert_eq!(dictionary.most_common(1.0).len(), 5);
        assert_eq!(dictionary.most_common(0.5), ["time", "house", "horse"]);
        assert_eq!(dictionary.most_common(0.1).len(), 1);
        assert!(dictionary.most_common(0.0).is_empty());
        assert_eq!(dictionary.most_common(7.0).len(), 5);
    }

    #[test]
    fn test_is_allowed_respects_rank() {
        let dictionary = sample();
        assert!(dictionary.is_allowed("house", 0.5));
        assert!(!dictionary.is_allowed("zebra", 0.5));
        assert!(dictionary.is_allowed("zebra", 1.0));
        assert!(!dictionary.is_allowed("zzqx", 1.0));
    }

    #[test]
    fn test_substring_match() {
        let dictionary = sample();
        assert!(dictionary.has_substring_match("ors", 1.0));
        assert!(dictionary.has_substring_match("", 1.0));
        assert!(!dictionary.has_substring_match("ebr", 0.5));
        assert!(dictionary.has_substring_match("ebr", 1.0));
    }

    #[test]
    fn test_text_parsing_skips_comments_and_duplicates() {
        let dictionary = NounDictionary::from_text("# header\nTime\n\nhouse\ntime\n");
        dictionary.load_once().unwrap();
        assert_eq!(dictionary.most_common(1.0), ["time", "house"]);
    }

    #[test]
    fn test_random_word_needs_load() {
        let dictionary = NounDictionary::from_text("house\n");
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(
            dictionary.random_word(5, 10, &mut rng),
            Err(DictionaryError::NotLoaded)
        ));
        dictionary.load_once().unwrap();
        dictionary.load_once().unwrap();
        assert_eq!(dictionary.random_word(5, 10, &mut rng).unwrap(), "house");
    }

    #[test]
    fn test_random_word_from_pool() {
        let dictionary = sample();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let word = dictionary.random_word(5, 3, &mut rng).unwrap();
            assert!(word == "house" || word == "horse");
        }
        assert!(matches!(
            dictionary.random_word(4, 1, &mut rng),
            Ok(ref w) if w == "time"
        ));
        assert!(matches!(
            dictionary.random_word(7, 5, &mut rng),
            Err(DictionaryError::NoWordOfLength { length: 7, pool_size: 5 })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "apple\nlemon").unwrap();
        let dictionary = NounDictionary::from_path(file.path());
        assert!(dictionary.is_empty());
        dictionary.load_once().unwrap();
        assert_eq!(dictionary.len(), 2);
        assert!(dictionary.is_allowed("lemon", 1.0));
    }

    #[test]
    fn test_missing_file_and_empty_list_fail() {
        let dir = tempfile::tempdir().unwrap();
        let missing = NounDictionary::from_path(dir.path().join("nope.txt"));
        assert!(matches!(missing.load_once(), Err(DictionaryError::FileRead { .. })));

        let empty = NounDictionary::from_text("# only a comment\n");
        assert!(matches!(empty.load_once(), Err(DictionaryError::Empty)));
    }

    #[test]
    fn test_bundled_list_has_seed_words() {
        let dictionary = NounDictionary::bundled();
        dictionary.load_once().unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let seed = dictionary.random_word(5, 1000, &mut rng).unwrap();
        assert_eq!(seed.len(), 5);
        assert!(seed.chars().all(|c| c.is_ascii_lowercase()));
    }
}
