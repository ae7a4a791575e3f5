mod augmenter;
mod driver;
mod lexicon;
mod protect;
mod tokenize;
mod wordnet;

pub use augmenter::Augmenter;
pub use driver::{rng_from_seed, run, AugmentStats, AugmentedRecord, AUGMENTATION_TYPE};
pub use lexicon::{resolve_lexicon, EmptyLexicon, Lexicon, LexiconError, MapLexicon};
pub use protect::{is_numeric_token, is_protected, is_protected_term, PROTECTED_TERMS};
pub use tokenize::{detokenize, is_punctuation, tokenize};
pub use wordnet::WordNet;
