//! [`LearnedPatternCache`]: snapshot-swapped index of learned patterns.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tally_core::models::LearnedPattern;

type Snapshot = Arc<HashMap<String, LearnedPattern>>;

/// Readers clone an `Arc` to the current map and never wait on a
/// recomputation. Writers build a new map and swap it in.
#[derive(Debug, Default)]
pub struct LearnedPatternCache {
    current: RwLock<Snapshot>,
}

impl LearnedPatternCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current consistent view.
    pub fn snapshot(&self) -> Snapshot {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    fn swap(&self, next: HashMap<String, LearnedPattern>) {
        let next = Arc::new(next);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }

    pub fn get(&self, merchant_pattern: &str) -> Option<LearnedPattern> {
        self.snapshot().get(merchant_pattern).cloned()
    }

    /// Copy-on-write insert or replace of one pattern.
    pub fn upsert(&self, pattern: LearnedPattern) {
        let mut next = (*self.snapshot()).clone();
        next.insert(pattern.merchant_pattern.clone(), pattern);
        self.swap(next);
    }

    pub fn remove(&self, merchant_pattern: &str) {
        let current = self.snapshot();
        if !current.contains_key(merchant_pattern) {
            return;
        }
        let mut next = (*current).clone();
        next.remove(merchant_pattern);
        self.swap(next);
    }

    /// Replace everything at once (startup rebuild).
    pub fn replace_all(&self, patterns: impl IntoIterator<Item = LearnedPattern>) {
        let next = patterns
            .into_iter()
            .map(|p| (p.merchant_pattern.clone(), p))
            .collect();
        self.swap(next);
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
