use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::wordnet::WordNet;
use crate::config::AugmentConfig;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid synonym table {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{}:{line}: malformed WordNet entry", path.display())]
    Malformed { path: PathBuf, line: usize },
    #[error("no WordNet data files in {}", .0.display())]
    NoDataFiles(PathBuf),
}

/// Word-to-synonyms lookup used for substitution.
pub trait Lexicon {
    /// Every alternative the lexicon knows for `word`, unfiltered.
    fn synonyms_for(&self, word: &str) -> BTreeSet<String>;
}

impl<L: Lexicon + ?Sized> Lexicon for Box<L> {
    fn synonyms_for(&self, word: &str) -> BTreeSet<String> {
        (**self).synonyms_for(word)
    }
}

/// Knows no synonyms, so replacement keeps every token.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyLexicon;

impl Lexicon for EmptyLexicon {
    fn synonyms_for(&self, _word: &str) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

/// In-memory synonym table keyed by lowercase word.
#[derive(Debug, Clone, Default)]
pub struct MapLexicon {
    entries: HashMap<String, BTreeSet<String>>,
}

impl MapLexicon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry<I, S>(mut self, word: &str, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(word, synonyms);
        self
    }

    pub fn insert<I, S>(&mut self, word: &str, synonyms: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .entry(word.to_lowercase())
            .or_default()
            .extend(synonyms.into_iter().map(Into::into));
    }

    /// Load a JSON object of the form `{"word": ["synonym", ...]}`.
    pub fn from_json_file(path: &Path) -> Result<Self, LexiconError> {
        let contents = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table: HashMap<String, Vec<String>> =
            serde_json::from_str(&contents).map_err(|source| LexiconError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        let mut lexicon = Self::new();
        for (word, synonyms) in table {
            lexicon.insert(&word, synonyms);
        }
        Ok(lexicon)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Lexicon for MapLexicon {
    fn synonyms_for(&self, word: &str) -> BTreeSet<String> {
        self.entries
            .get(&word.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// Pick the synonym source for an augmentation run: the configured synonym
/// table, then the configured WordNet directory, then `$WORDNET_DIR`, then
/// the NLTK data directory under the home directory. Falls back to
/// [`EmptyLexicon`] when nothing loads.
pub fn resolve_lexicon(config: &AugmentConfig) -> Box<dyn Lexicon> {
    if let Some(path) = &config.synonyms_file {
        match MapLexicon::from_json_file(path) {
            Ok(lexicon) => {
                tracing::info!("Loaded {} synonym entries from {}", lexicon.len(), path.display());
                return Box::new(lexicon);
            }
            Err(e) => tracing::warn!("Ignoring synonym table: {}", e),
        }
    }

    if let Some(dir) = &config.wordnet_dir {
        match WordNet::load(dir) {
            Ok(wordnet) => return Box::new(wordnet),
            Err(e) => tracing::warn!("Ignoring WordNet directory: {}", e),
        }
    }

    let fallback_dirs = std::env::var_os("WORDNET_DIR")
        .map(PathBuf::from)
        .into_iter()
        .chain(dirs::home_dir().map(|home| home.join("nltk_data/corpora/wordnet")));
    for dir in fallback_dirs {
        if !dir.is_dir() {
            continue;
        }
        match WordNet::load(&dir) {
            Ok(wordnet) => return Box::new(wordnet),
            Err(e) => tracing::warn!("Ignoring WordNet directory: {}", e),
        }
    }

    tracing::warn!("No synonym source available; synonym replacement will keep tokens unchanged");
    Box::new(EmptyLexicon)
}
