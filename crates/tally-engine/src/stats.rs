use serde::{Deserialize, Serialize};
use tally_learning::LearningStats;
use tally_observability::PerformanceSnapshot;

/// What `get_stats()` returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStats {
    pub performance: PerformanceSnapshot,
    pub learning: LearningStats,
}
