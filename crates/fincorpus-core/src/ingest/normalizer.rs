use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};
use unicode_normalization::UnicodeNormalization;

/// Hex digits kept from the fingerprint digest
pub const FINGERPRINT_LEN: usize = 16;

/// Canonicalize text: NFKC, non-printable characters dropped, every
/// whitespace run collapsed to a single space, ends trimmed.
pub fn normalize(text: &str) -> String {
    let filtered: String = filter_printable(text.chars());
    let composed: String = filter_printable(filtered.nfkc());
    composed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn filter_printable(chars: impl Iterator<Item = char>) -> String {
    chars
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if is_printable(c) {
                Some(c)
            } else {
                None
            }
        })
        .collect()
}

/// Control, format, private-use and unassigned (noncharacter) code points
static NON_PRINTABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{Cc}\p{Cf}\p{Co}\p{Cn}]").expect("valid non-printable regex"));

/// False for control, format, private-use and noncharacter code points.
pub fn is_printable(c: char) -> bool {
    let mut buf = [0u8; 4];
    !NON_PRINTABLE.is_match(c.encode_utf8(&mut buf))
}

/// Approximate identity of a normalized text: only the first `chars`
/// characters are hashed, so texts sharing that prefix collide.
pub fn fingerprint(normalized: &str, chars: usize) -> String {
    let prefix: String = normalized.chars().take(chars).collect();
    let digest = Sha256::digest(prefix.as_bytes());
    let mut hex = hex::encode(digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn collapses_whitespace_and_newlines() {
        assert_eq!(normalize("  Q3\trevenue\n\n up  12% "), "Q3 revenue up 12%");
    }

    #[test]
    fn strips_invisible_characters() {
        assert_eq!(normalize("net\u{200B}income\u{FEFF}"), "netincome");
        assert_eq!(normalize("a\u{0007}b"), "ab");
    }

    #[test]
    fn strips_every_format_and_private_use_character() {
        let invisible = [
            '\u{08E2}', '\u{0890}', '\u{110BD}', '\u{110CD}', '\u{13430}', '\u{1BCA0}',
            '\u{E000}', '\u{FDD0}', '\u{FFFF}',
        ];
        for c in invisible {
            assert_eq!(normalize(&format!("a{c}b")), "ab", "U+{:04X}", u32::from(c));
        }
        assert!(is_printable('₹'));
        assert!(is_printable('\u{00E9}'));
    }

    #[test]
    fn applies_compatibility_composition() {
        assert_eq!(normalize("\u{FB01}nance"), "finance");
        assert_eq!(normalize("e\u{0301}quity"), "\u{00E9}quity");
        assert_eq!(normalize("10\u{00A0}000"), "10 000");
    }

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn fingerprint_covers_prefix_only() {
        let common = "x".repeat(400);
        let a = format!("{common} tail one");
        let b = format!("{common} tail two");

        assert_eq!(fingerprint(&a, 400), fingerprint(&b, 400));
        assert_ne!(fingerprint("alpha", 400), fingerprint("beta", 400));
        assert_eq!(fingerprint("alpha", 400).len(), FINGERPRINT_LEN);
    }

    #[test]
    fn fingerprint_counts_characters_not_bytes() {
        let a = format!("{}{}", "₹".repeat(3), "a");
        let b = format!("{}{}", "₹".repeat(3), "b");
        assert_eq!(fingerprint(&a, 3), fingerprint(&b, 3));
        assert_ne!(fingerprint(&a, 4), fingerprint(&b, 4));
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(s in "[a-zA-Z0-9 \t\n.,%$€₹\u{00E9}\u{00A0}\u{200B}\u{FB01}]{0,64}") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }
    }
}
