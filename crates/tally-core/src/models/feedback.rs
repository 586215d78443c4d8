use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::errors::InputError;
use crate::models::{ExpenseType, FeedbackStage, LearnedPattern};

/// Kind of user feedback event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    /// User replaced the suggestion.
    Correction,
    /// User kept the suggestion.
    Acceptance,
    /// User tagged the transaction without a suggestion.
    Manual,
}

impl FeedbackType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Correction => "correction",
            Self::Acceptance => "acceptance",
            Self::Manual => "manual",
        }
    }

    /// Where a suggestion stands once the user reacted to it.
    pub fn stage(self) -> FeedbackStage {
        match self {
            Self::Acceptance => FeedbackStage::Accepted,
            Self::Correction | Self::Manual => FeedbackStage::Corrected,
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "correction" => Some(Self::Correction),
            "acceptance" => Some(Self::Acceptance),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

/// One user correction or acceptance. Append-only: never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: String,
    pub transaction_id: String,
    pub original_tag: Option<String>,
    pub corrected_tag: Option<String>,
    pub original_type: Option<ExpenseType>,
    pub corrected_type: Option<ExpenseType>,
    pub merchant_pattern: String,
    pub feedback_type: FeedbackType,
    pub confidence_before: Confidence,
    pub created_at: DateTime<Utc>,
}

impl FeedbackRecord {
    fn base(
        transaction_id: impl Into<String>,
        merchant_pattern: impl Into<String>,
        feedback_type: FeedbackType,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            transaction_id: transaction_id.into(),
            original_tag: None,
            corrected_tag: None,
            original_type: None,
            corrected_type: None,
            merchant_pattern: merchant_pattern.into(),
            feedback_type,
            confidence_before: Confidence::zero(),
            created_at: Utc::now(),
        }
    }

    /// Start a correction record.
    pub fn correction(
        transaction_id: impl Into<String>,
        merchant_pattern: impl Into<String>,
    ) -> Self {
        Self::base(transaction_id, merchant_pattern, FeedbackType::Correction)
    }

    /// Start an acceptance record.
    pub fn acceptance(
        transaction_id: impl Into<String>,
        merchant_pattern: impl Into<String>,
    ) -> Self {
        Self::base(transaction_id, merchant_pattern, FeedbackType::Acceptance)
    }

    /// Start a manual tagging record.
    pub fn manual(transaction_id: impl Into<String>, merchant_pattern: impl Into<String>) -> Self {
        Self::base(transaction_id, merchant_pattern, FeedbackType::Manual)
    }

    pub fn tag(mut self, original: Option<&str>, corrected: Option<&str>) -> Self {
        self.original_tag = original.map(str::to_string);
        self.corrected_tag = corrected.map(str::to_string);
        self
    }

    pub fn expense_type(
        mut self,
        original: Option<ExpenseType>,
        corrected: Option<ExpenseType>,
    ) -> Self {
        self.original_type = original;
        self.corrected_type = corrected;
        self
    }

    pub fn confidence_before(mut self, confidence: f64) -> Self {
        self.confidence_before = Confidence::new(confidence);
        self
    }

    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether this record carries a user-chosen value (correction or manual).
    pub fn is_correction(&self) -> bool {
        self.feedback_type != FeedbackType::Acceptance
    }

    /// The tag the user ended up with.
    pub fn final_tag(&self) -> Option<&str> {
        match self.feedback_type {
            FeedbackType::Acceptance => self.original_tag.as_deref(),
            _ => self
                .corrected_tag
                .as_deref()
                .or(self.original_tag.as_deref()),
        }
    }

    /// The expense type the user ended up with.
    pub fn final_type(&self) -> Option<ExpenseType> {
        match self.feedback_type {
            FeedbackType::Acceptance => self.original_type,
            _ => self.corrected_type.or(self.original_type),
        }
    }

    /// Reject records that carry nothing to learn from.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.transaction_id.trim().is_empty() {
            return Err(InputError::MissingTransactionId);
        }
        if self.merchant_pattern.trim().is_empty() {
            return Err(InputError::MissingLabel {
                transaction_id: self.transaction_id.clone(),
            });
        }
        let empty = match self.feedback_type {
            FeedbackType::Acceptance => {
                self.original_tag.is_none() && self.original_type.is_none()
            }
            _ => self.corrected_tag.is_none() && self.corrected_type.is_none(),
        };
        if empty {
            return Err(InputError::EmptyFeedback {
                transaction_id: self.transaction_id.clone(),
            });
        }
        Ok(())
    }
}

/// Acknowledgement returned by `record_feedback`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub record_id: String,
    pub merchant_pattern: String,
    /// `Recorded`, or `PatternReevaluated` when a LearnedPattern was recomputed.
    pub stage: FeedbackStage,
    pub learned_pattern: Option<LearnedPattern>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_tag_follows_feedback_type() {
        let c = FeedbackRecord::correction("t1", "chez paul").tag(Some("divers"), Some("restaurant"));
        assert_eq!(c.final_tag(), Some("restaurant"));
        let a = FeedbackRecord::acceptance("t1", "chez paul").tag(Some("restaurant"), None);
        assert_eq!(a.final_tag(), Some("restaurant"));
        assert!(!a.is_correction());
    }

    #[test]
    fn correction_without_corrected_value_is_rejected() {
        let c = FeedbackRecord::correction("t1", "chez paul").tag(Some("divers"), None);
        assert!(matches!(c.validate(), Err(InputError::EmptyFeedback { .. })));
    }

    #[test]
    fn records_get_distinct_ids() {
        let a = FeedbackRecord::correction("t1", "x");
        let b = FeedbackRecord::correction("t1", "x");
        assert_ne!(a.id, b.id);
    }
}
