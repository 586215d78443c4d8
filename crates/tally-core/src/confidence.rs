use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Mul, Sub};

/// Confidence score clamped to [0.0, 1.0].
/// Represents how certain the engine is about a classification or tag.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Confidence(f64);

impl Confidence {
    /// High confidence threshold, used by batch summaries.
    pub const HIGH: f64 = crate::constants::HIGH_CONFIDENCE;
    /// Medium confidence threshold.
    pub const MEDIUM: f64 = 0.5;
    /// Confidence of the structured default returned on total failure.
    pub const FAILURE: f64 = crate::constants::FAILURE_CONFIDENCE;

    /// Create a new Confidence, clamping to [0.0, 1.0]. NaN maps to 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// The zero confidence.
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Check if confidence is strictly above the high threshold.
    pub fn is_high(self) -> bool {
        self.0 > Self::HIGH
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self(0.0)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl Sub<f64> for Confidence {
    type Output = Self;
    fn sub(self, rhs: f64) -> Self {
        Self::new(self.0 - rhs)
    }
}

impl Mul<f64> for Confidence {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}
