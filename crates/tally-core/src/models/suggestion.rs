use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::constants::{GENERIC_TAG, MAX_ALTERNATIVE_TAGS};
use crate::models::ExpenseType;

/// Which resolver stage produced a tag suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionSource {
    KnownPattern,
    LearnedPattern,
    Research,
    Fallback,
}

impl SuggestionSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KnownPattern => "known_pattern",
            Self::LearnedPattern => "learned_pattern",
            Self::Research => "research",
            Self::Fallback => "fallback",
        }
    }
}

/// A semantic category tag for a transaction's merchant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagSuggestion {
    pub suggested_tag: String,
    pub confidence: Confidence,
    pub explanation: String,
    /// At most three, never containing `suggested_tag`.
    pub alternative_tags: Vec<String>,
    pub source: SuggestionSource,
    /// Expense type associated with the tag, when the stage knows one.
    pub expense_type: Option<ExpenseType>,
    pub processing_time: Duration,
    pub fallback_used: bool,
}

impl TagSuggestion {
    pub fn new(
        tag: impl Into<String>,
        confidence: f64,
        source: SuggestionSource,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            suggested_tag: tag.into(),
            confidence: Confidence::new(confidence),
            explanation: explanation.into(),
            alternative_tags: Vec::new(),
            source,
            expense_type: None,
            processing_time: Duration::ZERO,
            fallback_used: source == SuggestionSource::Fallback,
        }
    }

    /// Generic low-confidence suggestion returned instead of failing.
    pub fn fallback_default(reason: impl Into<String>) -> Self {
        Self::new(
            GENERIC_TAG,
            Confidence::FAILURE,
            SuggestionSource::Fallback,
            reason,
        )
    }

    /// Set alternatives, dropping duplicates and the suggested tag itself.
    pub fn with_alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for alt in alternatives {
            let alt = alt.into();
            if alt == self.suggested_tag || kept.contains(&alt) {
                continue;
            }
            kept.push(alt);
            if kept.len() == MAX_ALTERNATIVE_TAGS {
                break;
            }
        }
        self.alternative_tags = kept;
        self
    }

    pub fn with_expense_type(mut self, expense_type: Option<ExpenseType>) -> Self {
        self.expense_type = expense_type;
        self
    }

    /// Append a note to the explanation.
    pub fn annotate(&mut self, note: &str) {
        if self.explanation.is_empty() {
            self.explanation = note.to_string();
        } else {
            self.explanation = format!("{}; {}", self.explanation, note);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternatives_are_capped_and_deduplicated() {
        let s = TagSuggestion::new("streaming", 0.9, SuggestionSource::KnownPattern, "x")
            .with_alternatives(["streaming", "video", "video", "leisure", "subscription", "tv"]);
        assert_eq!(s.alternative_tags, vec!["video", "leisure", "subscription"]);
    }

    #[test]
    fn fallback_default_is_flagged() {
        let s = TagSuggestion::fallback_default("no data");
        assert!(s.fallback_used);
        assert_eq!(s.suggested_tag, GENERIC_TAG);
        assert!(s.confidence.value() < 0.5);
    }
}
