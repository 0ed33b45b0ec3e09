use std::sync::{Arc, RwLock};

use tourguide_core::config::SchedulerConfig;

use crate::rewards::RewardEngine;
use crate::scheduler::metrics::SchedulerMetrics;
use crate::scheduler::types::BulkKind;
use crate::tracking::LocationTracker;

/// Runs tracking and reward passes over many users on bounded worker pools.
pub struct BulkScheduler {
    pub(super) config: SchedulerConfig,
    /// Per-user tracking unit.
    pub(super) tracker: Arc<LocationTracker>,
    /// Per-user reward unit.
    pub(super) rewards: Arc<RewardEngine>,
    /// Pass metrics.
    pub(super) metrics: Arc<RwLock<SchedulerMetrics>>,
}

impl BulkScheduler {
    pub fn new(config: SchedulerConfig, tracker: Arc<LocationTracker>) -> Self {
        let rewards = Arc::clone(tracker.rewards());
        Self {
            config,
            tracker,
            rewards,
            metrics: Arc::new(RwLock::new(SchedulerMetrics::default())),
        }
    }

    /// Worker ceiling for a pass kind (never zero).
    pub fn pool_size(&self, kind: BulkKind) -> usize {
        let size = match kind {
            BulkKind::Track => self.config.track_pool_size,
            BulkKind::Rewards => self.config.reward_pool_size,
        };
        size.max(1)
    }

    /// Get a snapshot of the current pass metrics.
    pub fn metrics(&self) -> SchedulerMetrics {
        self.metrics
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Get an Arc to the metrics (for external reads without cloning).
    pub fn metrics_handle(&self) -> Arc<RwLock<SchedulerMetrics>> {
        Arc::clone(&self.metrics)
    }

    pub fn tracker(&self) -> &Arc<LocationTracker> {
        &self.tracker
    }
}
