use std::sync::LazyLock;

use regex::Regex;

static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+|[^\w\s]").expect("valid token regex"));

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\w\s]+$").expect("valid punctuation regex"));

/// Word runs and single punctuation characters, in order. Whitespace is dropped.
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn is_punctuation(token: &str) -> bool {
    PUNCTUATION.is_match(token)
}

/// Join tokens with single spaces, attaching punctuation to whatever precedes it.
pub fn detokenize<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    for token in tokens {
        let token = token.as_ref();
        if is_punctuation(token) {
            out.truncate(out.trim_end().len());
        }
        out.push_str(token);
        out.push(' ');
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_words_and_punctuation() {
        assert_eq!(
            tokenize("EPS grew 12% at Acme Corp."),
            vec!["EPS", "grew", "12", "%", "at", "Acme", "Corp", "."]
        );
        assert_eq!(tokenize("P/E: ₹500"), vec!["P", "/", "E", ":", "₹", "500"]);
        assert!(tokenize("  \n ").is_empty());
    }

    #[test]
    fn punctuation_attaches_to_previous_token() {
        let tokens = tokenize("Revenue rose 12 % , beating estimates .");
        assert_eq!(detokenize(&tokens), "Revenue rose 12%, beating estimates.");
    }

    #[test]
    fn leading_punctuation_keeps_following_space() {
        assert_eq!(detokenize(&["(", "Acme", ")"][..]), "( Acme)");
    }

    #[test]
    fn punctuation_classification() {
        assert!(is_punctuation("%"));
        assert!(is_punctuation("₹"));
        assert!(is_punctuation("..."));
        assert!(!is_punctuation("a."));
        assert!(!is_punctuation("_"));
        assert!(!is_punctuation(""));
    }
}
