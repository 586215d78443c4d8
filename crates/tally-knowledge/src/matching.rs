//! Merchant rule matching against a normalized pattern.

use crate::rules::MerchantRule;

/// Minimum rule length for an in-token substring match.
const MIN_SUBSTRING_LEN: usize = 4;

/// How a merchant rule matched, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MatchKind {
    /// The whole merchant pattern equals the rule.
    Exact,
    /// The rule appears as a whole-word sequence.
    Token,
    /// The rule appears inside a token, e.g. `netflixcom`.
    Substring,
}

impl MatchKind {
    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exact | Self::Token)
    }
}

/// A merchant rule that matched, with how it matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MerchantMatch<'a> {
    pub rule: &'a MerchantRule,
    pub kind: MatchKind,
}

/// Classify how `rule_pattern` occurs in `merchant_pattern`, if at all.
pub(crate) fn match_kind(merchant_pattern: &str, rule_pattern: &str) -> Option<MatchKind> {
    if rule_pattern.is_empty() || merchant_pattern.is_empty() {
        return None;
    }
    if merchant_pattern == rule_pattern {
        return Some(MatchKind::Exact);
    }
    let padded = format!(" {merchant_pattern} ");
    if padded.contains(&format!(" {rule_pattern} ")) {
        return Some(MatchKind::Token);
    }
    if rule_pattern.len() >= MIN_SUBSTRING_LEN && merchant_pattern.contains(rule_pattern) {
        return Some(MatchKind::Substring);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_token_and_substring() {
        assert_eq!(match_kind("netflix", "netflix"), Some(MatchKind::Exact));
        assert_eq!(match_kind("mcdonalds paris", "mcdonalds"), Some(MatchKind::Token));
        assert_eq!(match_kind("www netflixcom", "netflix"), Some(MatchKind::Substring));
    }

    #[test]
    fn short_rules_need_word_boundaries() {
        assert_eq!(match_kind("fedfx", "edf"), None);
        assert_eq!(match_kind("edf clients", "edf"), Some(MatchKind::Token));
    }

    #[test]
    fn multiword_rules_match_whole_words() {
        assert_eq!(match_kind("la uber eats", "uber eats"), Some(MatchKind::Token));
        assert_eq!(match_kind("suber eatsy", "uber eats"), Some(MatchKind::Substring));
    }
}
