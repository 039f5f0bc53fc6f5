//! Running turn statistics.
//!
//! Only `turns_processed` and `average_latency_ms` carry meaning; the other
//! counters are decorative telemetry for the status panel.

use shared::{RandomSource, StatsSnapshot, ThreadRandom};
use std::sync::Arc;

pub struct StatsAggregator {
    snapshot: StatsSnapshot,
    random: Arc<dyn RandomSource>,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::with_random(Arc::new(ThreadRandom))
    }

    pub fn with_random(random: Arc<dyn RandomSource>) -> Self {
        Self {
            snapshot: StatsSnapshot::default(),
            random,
        }
    }

    /// Start from an existing snapshot, e.g. a pinned latency for tests.
    pub fn with_snapshot(mut self, snapshot: StatsSnapshot) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        self.snapshot
    }

    /// Fold one resolved turn into the counters.
    pub fn record(&mut self, latency_ms: u64) -> StatsSnapshot {
        let s = &mut self.snapshot;
        s.turns_processed += 1;
        // two-term blend, intentionally not a true mean
        s.average_latency_ms = (s.average_latency_ms + latency_ms as f64) / 2.0;
        s.knowledge_accessed += self.random.below(50) as u64;
        let bump = self.random.below(5) as u8;
        s.creativity_level = s.creativity_level.saturating_add(bump).min(100);
        *s
    }
}

impl Default for StatsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FixedRandom;

    #[test]
    fn test_latency_blend() {
        let mut stats = StatsAggregator::with_random(Arc::new(FixedRandom(0)));
        assert_eq!(stats.snapshot().average_latency_ms, 1200.0);

        let after = stats.record(800);
        assert_eq!(after.average_latency_ms, 1000.0);
        assert_eq!(after.turns_processed, 1);
    }

    #[test]
    fn test_blend_is_not_a_mean() {
        let mut stats = StatsAggregator::with_random(Arc::new(FixedRandom(0)))
            .with_snapshot(StatsSnapshot {
                average_latency_ms: 0.0,
                ..StatsSnapshot::default()
            });
        stats.record(100);
        stats.record(100);
        let s = stats.record(400);
        // true mean would be 200
        assert_eq!(s.average_latency_ms, 237.5);
        assert_eq!(s.turns_processed, 3);
    }

    #[test]
    fn test_decorative_counters_bounded() {
        let mut stats = StatsAggregator::with_random(Arc::new(FixedRandom(4)));
        for _ in 0..20 {
            stats.record(10);
        }
        let s = stats.snapshot();
        assert_eq!(s.creativity_level, 100);
        assert_eq!(s.knowledge_accessed, 80);
    }
}
