//! On-disk shape of a rule file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tally_core::models::ExpenseType;

/// A whole rule file as deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleFile {
    pub version: u32,
    pub keywords: KeywordTables,
    pub merchants: Vec<MerchantRule>,
    pub phrases: PhraseTables,
    pub context_tags: Vec<ContextTag>,
    pub amount_bands: Vec<AmountBand>,
}

/// Keyword → weight tables, one per direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub fixed: BTreeMap<String, f64>,
    pub variable: BTreeMap<String, f64>,
}

/// Contextual bigram/trigram phrases, one list per direction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhraseTables {
    pub fixed: Vec<String>,
    pub variable: Vec<String>,
}

/// A curated merchant with its semantic tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantRule {
    pub pattern: String,
    pub tag: String,
    pub expense_type: ExpenseType,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// A token revealing a generic category, used by the heuristic fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextTag {
    pub keyword: String,
    pub tag: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// An absolute-amount range mapped to a generic tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountBand {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    pub tag: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

impl AmountBand {
    pub fn contains(&self, amount: f64) -> bool {
        let a = amount.abs();
        a >= self.min && self.max.map_or(true, |max| a < max)
    }
}
