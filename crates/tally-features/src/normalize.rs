//! Label normalization: raw bank label → canonical merchant pattern.
//!
//! Steps, in order:
//! 1. lowercase and fold Latin accents
//! 2. drop decimal amounts and dates
//! 3. drop apostrophes, turn remaining punctuation into spaces
//! 4. drop numeric noise, currency and legal-form tokens
//! 5. strip leading payment-method prefixes
//! 6. collapse whitespace

use regex::Regex;
use std::sync::LazyLock;

use crate::payment::{self, PaymentMethod};

macro_rules! noise_pattern {
    ($name:ident, $regex_str:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Amounts: 12.99, 1 234,56, 8,5 ─────────────────────────────────────────
noise_pattern!(RE_AMOUNT, r"\d+(?:[ .]\d{3})*[.,]\d{1,2}\b");

// ── Dates: 12/03, 12/03/24, 2024-03-12 ────────────────────────────────────
noise_pattern!(
    RE_DATE,
    r"\b\d{1,4}[/\-]\d{1,2}(?:[/\-]\d{1,4})?\b"
);

/// Tokens that never identify a merchant.
const NOISE_TOKENS: &[&str] = &[
    // currencies
    "eur", "euro", "euros", "usd", "gbp", "chf",
    // legal forms
    "sa", "sas", "sasu", "sarl", "eurl", "gmbh", "ltd", "inc", "llc", "plc", "bv",
];

/// Normalize a raw label into its merchant pattern.
pub fn normalize(label: &str) -> String {
    normalize_with_marker(label).0
}

/// Normalize a raw label and report the payment method prefix it carried.
pub fn normalize_with_marker(label: &str) -> (String, Option<PaymentMethod>) {
    let mut text = fold_accents(&label.to_lowercase());

    for re in [&RE_AMOUNT, &RE_DATE] {
        if let Some(re) = re.as_ref() {
            text = re.replace_all(&text, " ").into_owned();
        }
    }

    let cleaned: String = text
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .map(|c| if c.is_alphanumeric() || c == '&' { c } else { ' ' })
        .collect();

    let tokens: Vec<&str> = cleaned
        .split_whitespace()
        .filter(|t| !is_numeric_noise(t) && !NOISE_TOKENS.contains(t))
        .collect();

    let (start, method) = payment::strip_prefixes(&tokens);
    (tokens[start..].join(" "), method)
}

/// A token that is mostly digits: references, card suffixes, store numbers.
fn is_numeric_noise(token: &str) -> bool {
    let total = token.chars().count();
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    digits * 2 > total
}

fn fold_accents(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
            'ç' => 'c',
            'è' | 'é' | 'ê' | 'ë' => 'e',
            'ì' | 'í' | 'î' | 'ï' => 'i',
            'ñ' => 'n',
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
            'ù' | 'ú' | 'û' | 'ü' => 'u',
            'ý' | 'ÿ' => 'y',
            other => other,
        })
        .collect()
}
