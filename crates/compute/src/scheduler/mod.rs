//! Bounded-parallel bulk passes over the user population.
//!
//! Every call to [`BulkScheduler::track_all`] or
//! [`BulkScheduler::compute_rewards_all`] builds a dedicated worker pool,
//! runs one task per user on it, waits for all of them, and tears the pool
//! down. A failed user is reported in the [`BulkOutcome`] and never stops
//! the others.

pub mod metrics;
pub mod runner;
pub mod types;

pub use metrics::SchedulerMetrics;
pub use runner::BulkScheduler;
pub use types::{BulkKind, BulkOutcome, UserFailure};
