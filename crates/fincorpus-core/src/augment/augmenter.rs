use std::borrow::Cow;

use rand::seq::IndexedRandom;
use rand::Rng;

use super::lexicon::Lexicon;
use super::protect::is_protected;
use super::tokenize::{detokenize, is_punctuation, tokenize};
use crate::ingest::markup::{looks_like_markup, strip_tags};

/// Rewrites text by random token deletion and synonym substitution while
/// leaving numeric and financial tokens untouched.
pub struct Augmenter<'a, L: Lexicon + ?Sized> {
    lexicon: &'a L,
}

impl<'a, L: Lexicon + ?Sized> Augmenter<'a, L> {
    pub const fn new(lexicon: &'a L) -> Self {
        Self { lexicon }
    }

    /// Each unprotected word is deleted with `delete_prob`, otherwise
    /// replaced with `replace_prob`, otherwise kept. Markup is reduced to its
    /// visible text first.
    pub fn augment<R: Rng + ?Sized>(
        &self,
        text: &str,
        replace_prob: f64,
        delete_prob: f64,
        rng: &mut R,
    ) -> String {
        let visible: Cow<'_, str> = if looks_like_markup(text) {
            Cow::Owned(strip_tags(text))
        } else {
            Cow::Borrowed(text)
        };

        let mut out: Vec<Cow<'_, str>> = Vec::new();
        for token in tokenize(&visible) {
            if is_protected(token) || is_punctuation(token) {
                out.push(Cow::Borrowed(token));
                continue;
            }
            if rng.random::<f64>() < delete_prob {
                continue;
            }
            if rng.random::<f64>() < replace_prob {
                out.push(Cow::Owned(self.synonym(token, rng)));
            } else {
                out.push(Cow::Borrowed(token));
            }
        }
        detokenize(&out)
    }

    /// A uniformly chosen eligible synonym, or `word` itself when there is
    /// none. Single-word candidates win over phrases.
    pub fn synonym<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
        if is_protected(word) {
            return word.to_string();
        }

        let candidates: Vec<String> = self
            .lexicon
            .synonyms_for(word)
            .into_iter()
            .filter(|candidate| is_eligible(candidate, word))
            .collect();
        let single: Vec<&String> = candidates.iter().filter(|c| !c.contains(' ')).collect();
        let pool: Vec<&String> = if single.is_empty() {
            candidates.iter().collect()
        } else {
            single
        };

        pool.choose(rng)
            .map_or_else(|| word.to_string(), |choice| (*choice).clone())
    }
}

/// Letters, hyphens and spaces only, at least three characters, and not the
/// original word in another case.
fn is_eligible(candidate: &str, original: &str) -> bool {
    candidate.chars().count() >= 3
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '-' || c == ' ')
        && candidate.to_lowercase() != original.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::lexicon::{EmptyLexicon, MapLexicon};
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn lexicon() -> MapLexicon {
        MapLexicon::new()
            .with_entry("grew", ["increased"])
            .with_entry("Acme", ["Zenith"])
            .with_entry("Corp", ["Corporation"])
            .with_entry("EPS", ["earnings"])
            .with_entry("percent", ["share"])
    }

    #[test]
    fn replacement_leaves_numbers_and_terms() {
        let lexicon = lexicon();
        let augmenter = Augmenter::new(&lexicon);
        let mut rng = StdRng::seed_from_u64(42);

        let out = augmenter.augment("EPS grew 12% at Acme Corp.", 1.0, 0.0, &mut rng);
        assert_eq!(out, "EPS increased 12% at Zenith Corporation.");
    }

    #[test]
    fn full_deletion_keeps_only_protected_and_punctuation() {
        let augmenter = Augmenter::new(&EmptyLexicon);
        let mut rng = StdRng::seed_from_u64(7);

        let out = augmenter.augment("Revenue of ₹500 crore, up 8 percent.", 0.0, 1.0, &mut rng);
        assert_eq!(out, "₹ 500 crore, 8 percent.");
    }

    #[test]
    fn zero_probabilities_only_retokenize() {
        let augmenter = Augmenter::new(&EmptyLexicon);
        let mut rng = StdRng::seed_from_u64(1);
        let out = augmenter.augment("Shares fell  sharply ( again ) .", 0.0, 0.0, &mut rng);
        assert_eq!(out, "Shares fell sharply( again).");
    }

    #[test]
    fn markup_is_reduced_to_visible_text() {
        let augmenter = Augmenter::new(&EmptyLexicon);
        let mut rng = StdRng::seed_from_u64(1);
        let out = augmenter.augment(
            "<?xml version=\"1.0\"?><doc><p>Profit &amp; loss</p></doc>",
            0.0,
            0.0,
            &mut rng,
        );
        assert_eq!(out, "Profit& loss");
    }

    #[test]
    fn synonym_filters_candidates() {
        let lexicon = MapLexicon::new().with_entry(
            "gain",
            ["GAIN", "up", "net_gain", "q3 gain", "win2", "profit margin"],
        );
        let augmenter = Augmenter::new(&lexicon);
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(augmenter.synonym("gain", &mut rng), "profit margin");
    }

    #[test]
    fn single_words_are_preferred() {
        let lexicon = MapLexicon::new().with_entry("rise", ["go up", "climb"]);
        let augmenter = Augmenter::new(&lexicon);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            assert_eq!(augmenter.synonym("rise", &mut rng), "climb");
        }
    }

    #[test]
    fn protected_word_is_never_substituted() {
        let lexicon = lexicon();
        let augmenter = Augmenter::new(&lexicon);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(augmenter.synonym("eps", &mut rng), "eps");
        assert_eq!(augmenter.synonym("Percent", &mut rng), "Percent");
    }

    #[test]
    fn same_seed_same_output() {
        let lexicon = lexicon();
        let augmenter = Augmenter::new(&lexicon);
        let text = "Acme Corp grew revenue while peers stalled";
        let a = augmenter.augment(text, 0.5, 0.3, &mut StdRng::seed_from_u64(99));
        let b = augmenter.augment(text, 0.5, 0.3, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    const WORDS: [&str; 14] = [
        "EPS", "12%", "$", "revenue", "grew", "USD", "crore", "strong", "₹", "NIFTY", "3.5",
        "Acme", "quarter", "billion",
    ];

    proptest! {
        #[test]
        fn protected_tokens_survive_in_order(
            picks in prop::collection::vec(0..WORDS.len(), 0..30),
            seed in any::<u64>(),
        ) {
            let text = picks.iter().map(|&i| WORDS[i]).collect::<Vec<_>>().join(" ");
            let lexicon = lexicon();
            let augmenter = Augmenter::new(&lexicon);
            let out = augmenter.augment(&text, 1.0, 1.0, &mut StdRng::seed_from_u64(seed));

            let expected: Vec<&str> = tokenize(&text)
                .into_iter()
                .filter(|t| is_protected(t) || is_punctuation(t))
                .collect();
            prop_assert_eq!(tokenize(&out), expected);
        }
    }
}
