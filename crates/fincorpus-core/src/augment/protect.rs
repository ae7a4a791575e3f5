use std::collections::HashSet;
use std::sync::LazyLock;

/// Financial vocabulary that augmentation never rewrites (case-insensitive)
pub const PROTECTED_TERMS: [&str; 26] = [
    "₹", "$", "INR", "USD", "EUR", "%", "percent", "percentage", "EBITDA", "EBIT", "P/E", "PE",
    "EPS", "EPS(TTM)", "BSE", "NSE", "NASDAQ", "NYSE", "SENSEX", "NIFTY", "₹crore", "crore",
    "lakh", "million", "billion", "trillion",
];

const NUMERIC_SYMBOLS: [&str; 5] = ["%", "$", "₹", "USD", "INR"];

static PROTECTED_UPPER: LazyLock<HashSet<String>> =
    LazyLock::new(|| PROTECTED_TERMS.iter().map(|t| t.to_uppercase()).collect());

/// Digits anywhere in the token (dates, amounts, `Q3`), or a bare numeric symbol.
pub fn is_numeric_token(token: &str) -> bool {
    let token = token.trim();
    token.chars().any(char::is_numeric) || NUMERIC_SYMBOLS.contains(&token)
}

pub fn is_protected_term(token: &str) -> bool {
    PROTECTED_UPPER.contains(&token.trim().to_uppercase())
}

pub fn is_protected(token: &str) -> bool {
    is_numeric_token(token) || is_protected_term(token)
}
