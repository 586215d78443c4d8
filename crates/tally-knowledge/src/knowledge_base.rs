//! [`KnowledgeBase`]: the compiled, read-only view of a rule file.

use std::collections::HashMap;
use std::path::Path;

use tally_core::config::KnowledgeConfig;
use tally_core::errors::ConfigError;
use tally_core::models::ExpenseType;
use tally_features::{normalize, MerchantFeatures};
use tracing::info;

use crate::matching::{self, MerchantMatch};
use crate::rules::{AmountBand, ContextTag, MerchantRule, RuleFile};

/// Embedded default rule set.
const DEFAULT_RULES: &str = include_str!("../rules/default_rules.toml");

/// Loaded-once dictionaries. Immutable after construction; share behind `Arc`.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    fixed_keywords: HashMap<String, f64>,
    variable_keywords: HashMap<String, f64>,
    merchants: Vec<MerchantRule>,
    fixed_phrases: Vec<String>,
    variable_phrases: Vec<String>,
    context_tags: Vec<ContextTag>,
    amount_bands: Vec<AmountBand>,
}

impl KnowledgeBase {
    /// The embedded default rule set.
    pub fn builtin() -> Result<Self, ConfigError> {
        Self::parse(DEFAULT_RULES, "<builtin>")
    }

    /// Build from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Self::parse(toml_str, "<string>")
    }

    /// Build from a TOML rule file on disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Built-ins unless the config points at a rule file.
    pub fn from_config(config: &KnowledgeConfig) -> Result<Self, ConfigError> {
        match &config.rules_path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    fn parse(toml_str: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: RuleFile = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: origin.to_string(),
            message: e.to_string(),
        })?;
        let kb = Self::compile(file, origin)?;
        info!(
            event = "knowledge_loaded",
            origin = %origin,
            fixed_keywords = kb.fixed_keywords.len(),
            variable_keywords = kb.variable_keywords.len(),
            merchants = kb.merchants.len(),
            "knowledge base loaded"
        );
        Ok(kb)
    }

    fn compile(file: RuleFile, origin: &str) -> Result<Self, ConfigError> {
        let fixed_keywords = compile_keywords(file.keywords.fixed, origin, "fixed")?;
        let variable_keywords = compile_keywords(file.keywords.variable, origin, "variable")?;

        let mut merchants: Vec<MerchantRule> = Vec::with_capacity(file.merchants.len());
        for mut rule in file.merchants {
            rule.pattern = normalize(&rule.pattern);
            if rule.pattern.is_empty() || rule.tag.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("{origin}: merchants"),
                    message: "merchant rules need a non-empty pattern and tag".to_string(),
                });
            }
            merchants.push(rule);
        }
        // Longest patterns first so "amazon prime" wins over "amazon".
        merchants.sort_by(|a, b| b.pattern.len().cmp(&a.pattern.len()));

        let context_tags = file
            .context_tags
            .into_iter()
            .map(|mut c| {
                c.keyword = normalize(&c.keyword);
                c
            })
            .filter(|c| !c.keyword.is_empty())
            .collect();

        Ok(Self {
            fixed_keywords,
            variable_keywords,
            merchants,
            fixed_phrases: compile_phrases(file.phrases.fixed),
            variable_phrases: compile_phrases(file.phrases.variable),
            context_tags,
            amount_bands: file.amount_bands,
        })
    }

    /// Weight and direction of a keyword (single token or n-gram).
    pub fn keyword(&self, term: &str) -> Option<(ExpenseType, f64)> {
        if let Some(w) = self.fixed_keywords.get(term) {
            return Some((ExpenseType::Fixed, *w));
        }
        self.variable_keywords
            .get(term)
            .map(|w| (ExpenseType::Variable, *w))
    }

    /// All merchant rules matching the pattern, strongest match first.
    pub fn merchant_matches(&self, merchant_pattern: &str) -> Vec<MerchantMatch<'_>> {
        let mut found: Vec<MerchantMatch<'_>> = self
            .merchants
            .iter()
            .filter_map(|rule| {
                matching::match_kind(merchant_pattern, &rule.pattern)
                    .map(|kind| MerchantMatch { rule, kind })
            })
            .collect();
        // Stable sort keeps the longest-pattern-first order within a kind.
        found.sort_by_key(|m| m.kind);
        found
    }

    /// The single best merchant rule for a pattern.
    pub fn best_merchant(&self, merchant_pattern: &str) -> Option<MerchantMatch<'_>> {
        self.merchant_matches(merchant_pattern).into_iter().next()
    }

    /// Direction of a contextual phrase, if curated.
    pub fn phrase(&self, ngram: &str) -> Option<ExpenseType> {
        if self.fixed_phrases.iter().any(|p| p == ngram) {
            Some(ExpenseType::Fixed)
        } else if self.variable_phrases.iter().any(|p| p == ngram) {
            Some(ExpenseType::Variable)
        } else {
            None
        }
    }

    /// First context tag whose keyword appears among the features' tokens.
    pub fn context_tag(&self, features: &MerchantFeatures) -> Option<&ContextTag> {
        self.context_tags
            .iter()
            .find(|c| features.has_token(&c.keyword) || features.ngrams.contains(&c.keyword))
    }

    /// First amount band containing the amount.
    pub fn amount_band(&self, amount: f64) -> Option<&AmountBand> {
        self.amount_bands.iter().find(|b| b.contains(amount))
    }

    pub fn merchant_count(&self) -> usize {
        self.merchants.len()
    }

    pub fn keyword_count(&self) -> usize {
        self.fixed_keywords.len() + self.variable_keywords.len()
    }
}

fn compile_keywords(
    table: impl IntoIterator<Item = (String, f64)>,
    origin: &str,
    direction: &str,
) -> Result<HashMap<String, f64>, ConfigError> {
    let mut out = HashMap::new();
    for (raw, weight) in table {
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(ConfigError::ValidationFailed {
                field: format!("{origin}: keywords.{direction}.{raw}"),
                message: "keyword weight must be within (0.0, 1.0]".to_string(),
            });
        }
        let key = normalize(&raw);
        if !key.is_empty() {
            out.insert(key, weight);
        }
    }
    Ok(out)
}

fn compile_phrases(phrases: Vec<String>) -> Vec<String> {
    phrases
        .iter()
        .map(|p| normalize(p))
        .filter(|p| p.contains(' '))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::MatchKind;

    #[test]
    fn builtin_rules_load() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert!(kb.merchant_count() > 30);
        assert!(kb.keyword_count() > 60);
    }

    #[test]
    fn keyword_lookup_has_direction() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.keyword("netflix"), Some((ExpenseType::Fixed, 1.0)));
        assert_eq!(kb.keyword("mcdonalds"), Some((ExpenseType::Variable, 1.0)));
        assert_eq!(kb.keyword("xyzcorp"), None);
    }

    #[test]
    fn longest_merchant_wins_within_kind() {
        let kb = KnowledgeBase::builtin().unwrap();
        let best = kb.best_merchant("amazon prime video").unwrap();
        assert_eq!(best.rule.tag, "subscription");
        assert_eq!(best.kind, MatchKind::Token);
    }

    #[test]
    fn exact_beats_token_match() {
        let kb = KnowledgeBase::from_toml(
            r#"
            [[merchants]]
            pattern = "uber"
            tag = "ride-hailing"
            expense_type = "VARIABLE"

            [[merchants]]
            pattern = "uber eats"
            tag = "food-delivery"
            expense_type = "VARIABLE"
            "#,
        )
        .unwrap();
        assert_eq!(kb.best_merchant("uber").unwrap().rule.tag, "ride-hailing");
        assert_eq!(kb.best_merchant("uber eats paris").unwrap().rule.tag, "food-delivery");
    }

    #[test]
    fn rule_keys_are_normalized_on_load() {
        let kb = KnowledgeBase::from_toml(
            r#"
            [keywords.fixed]
            "PRLV Électricité" = 0.9

            [[merchants]]
            pattern = "McDonald's"
            tag = "fast-food"
            expense_type = "VARIABLE"
            "#,
        )
        .unwrap();
        assert!(kb.keyword("electricite").is_some());
        assert_eq!(kb.best_merchant("mcdonalds").unwrap().kind, MatchKind::Exact);
    }

    #[test]
    fn invalid_keyword_weight_is_rejected() {
        let err = KnowledgeBase::from_toml("[keywords.fixed]\nnetflix = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    }

    #[test]
    fn amount_bands_use_absolute_amount() {
        let kb = KnowledgeBase::builtin().unwrap();
        assert_eq!(kb.amount_band(-750.0).unwrap().tag, "large-purchase");
        assert!(kb.amount_band(47.0).is_none());
    }
}
