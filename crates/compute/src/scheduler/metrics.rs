use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::types::{BulkKind, BulkOutcome};

/// Bulk pass metrics, per pass kind.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SchedulerMetrics {
    /// Total passes executed.
    pub passes_executed: HashMap<BulkKind, u64>,
    /// Rolling average pass duration.
    pub avg_pass_duration: HashMap<BulkKind, Duration>,
    /// Completion time of the latest pass.
    pub last_run: HashMap<BulkKind, DateTime<Utc>>,
    /// Cumulative users whose unit of work completed.
    pub users_succeeded: HashMap<BulkKind, u64>,
    /// Cumulative users whose unit of work failed.
    pub users_failed: HashMap<BulkKind, u64>,
}

impl SchedulerMetrics {
    /// Record a finished pass.
    pub fn record_pass(&mut self, outcome: &BulkOutcome) {
        let kind = outcome.kind;
        *self.passes_executed.entry(kind).or_default() += 1;
        *self.users_succeeded.entry(kind).or_default() += outcome.succeeded as u64;
        *self.users_failed.entry(kind).or_default() += outcome.failed() as u64;
        self.last_run.insert(kind, Utc::now());

        let count = self.passes_executed[&kind];
        let prev_avg = self.avg_pass_duration.get(&kind).copied().unwrap_or_default();

        // Incremental mean: new_avg = prev_avg + (duration - prev_avg) / count
        let new_avg = if count == 1 {
            outcome.duration
        } else {
            let prev_nanos = prev_avg.as_nanos() as f64;
            let cur_nanos = outcome.duration.as_nanos() as f64;
            let avg_nanos = prev_nanos + (cur_nanos - prev_nanos) / count as f64;
            Duration::from_nanos(avg_nanos as u64)
        };

        self.avg_pass_duration.insert(kind, new_avg);
    }

    pub fn passes(&self, kind: BulkKind) -> u64 {
        self.passes_executed.get(&kind).copied().unwrap_or(0)
    }
}
