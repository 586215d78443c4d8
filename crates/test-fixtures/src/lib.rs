//! Shared fixtures for tally tests: golden label datasets, transaction
//! builders and doubles for the research and ledger collaborators.

pub mod builders;
pub mod research;
pub mod stores;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::PathBuf;

pub use builders::{day, known_merchant_transactions, monthly_history, tx};
pub use research::{FailingResearch, SlowResearch, StaticResearch};
pub use stores::FlakyStore;

/// Root of the golden datasets shipped with this crate.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// One row of `golden/labels.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenLabel {
    pub label: String,
    pub amount: f64,
    pub merchant_pattern: String,
    /// `None` when the label is not a curated merchant.
    pub tag: Option<String>,
    pub expense_type: Option<String>,
}

pub fn golden_labels() -> Vec<GoldenLabel> {
    load_fixture("labels.json")
}

/// Golden rows for curated merchants only.
pub fn known_merchant_labels() -> Vec<GoldenLabel> {
    golden_labels()
        .into_iter()
        .filter(|g| g.tag.is_some())
        .collect()
}
