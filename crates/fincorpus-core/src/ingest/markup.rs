//! Tag stripping and entity decoding shared by the HTML extractor and the
//! augmenter's visible-text view.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

static INVISIBLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>")
        .expect("valid block regex")
});

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,31});")
        .expect("valid entity regex")
});

pub fn contains_tag(text: &str) -> bool {
    TAG.is_match(text)
}

/// True for an XML declaration or any tag-like substring
pub fn looks_like_markup(text: &str) -> bool {
    text.trim_start().to_ascii_lowercase().starts_with("<?xml") || contains_tag(text)
}

/// Replace every tag with a space and decode entities.
pub fn strip_tags(text: &str) -> String {
    unescape(&TAG.replace_all(text, " "))
}

/// Visible text of an HTML document: comments, scripts and styles dropped,
/// remaining tags act as word separators.
pub fn visible_text(html: &str) -> String {
    let without_blocks = INVISIBLE_BLOCK.replace_all(html, " ");
    strip_tags(&without_blocks)
}

/// Decode named and numeric character references; unknown ones stay as-is.
pub fn unescape(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let body = &caps[1];
            decode_entity(body).map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{00A0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "bull" => '\u{2022}',
        "middot" => '\u{00B7}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "trade" => '\u{2122}',
        "deg" => '\u{00B0}',
        "euro" => '\u{20AC}',
        "pound" => '\u{00A3}',
        "yen" => '\u{00A5}',
        "cent" => '\u{00A2}',
        "sect" => '\u{00A7}',
        "times" => '\u{00D7}',
        "divide" => '\u{00F7}',
        "plusmn" => '\u{00B1}',
        "frac12" => '\u{00BD}',
        "frac14" => '\u{00BC}',
        "frac34" => '\u{00BE}',
        _ => return None,
    };
    Some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_markup() {
        assert!(looks_like_markup("  <?XML version=\"1.0\"?>"));
        assert!(looks_like_markup("Revenue <b>rose</b>"));
        assert!(!looks_like_markup("EPS < 5 this quarter"));
    }

    #[test]
    fn strips_tags_and_entities() {
        assert_eq!(strip_tags("<p>Tom &amp; Jerry</p>"), " Tom & Jerry ");
    }

    #[test]
    fn decodes_numeric_references() {
        assert_eq!(unescape("&#8377;5 &#x20AC;3"), "\u{20B9}5 \u{20AC}3");
        assert_eq!(unescape("&bogus; &amp"), "&bogus; &amp");
    }

    #[test]
    fn visible_text_skips_scripts_and_comments() {
        let html = "<html><head><style>p{color:red}</style><script>var x = 1;</script></head>\
                    <body><!-- hidden --><p>Net profit</p><p>rose</p></body></html>";
        let text = visible_text(html);
        assert!(text.contains("Net profit"));
        assert!(text.contains("rose"));
        assert!(!text.contains("color"));
        assert!(!text.contains("var x"));
        assert!(!text.contains("hidden"));
    }
}
