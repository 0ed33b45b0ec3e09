use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use tourguide_core::{TourGuideError, TourGuideResult, User};

use crate::scheduler::types::{BulkKind, BulkOutcome, UserFailure};

use super::BulkScheduler;

impl BulkScheduler {
    /// Track every user in parallel: fetch a location, append it, then
    /// recompute that user's rewards. Blocks until every user is done.
    pub fn track_all(&self, users: &[Arc<User>]) -> TourGuideResult<BulkOutcome> {
        let tracker = &self.tracker;
        self.fan_out(BulkKind::Track, users, |user| tracker.track_user(user).map(|_| ()))
    }

    /// Recompute rewards for every user in parallel. Blocks until every
    /// user is done.
    pub fn compute_rewards_all(&self, users: &[Arc<User>]) -> TourGuideResult<BulkOutcome> {
        let rewards = &self.rewards;
        self.fan_out(BulkKind::Rewards, users, |user| {
            rewards.calculate_rewards(user).map(|_| ())
        })
    }

    /// Track every user one after another on the calling thread.
    pub fn track_all_sequential(&self, users: &[Arc<User>]) -> BulkOutcome {
        let start = Instant::now();
        info!(kind = %BulkKind::Track, users = users.len(), "sequential pass starting");

        let failures: Vec<UserFailure> = users
            .iter()
            .filter_map(|user| {
                run_unit(BulkKind::Track, user, |u| self.tracker.track_user(u).map(|_| ()))
            })
            .collect();

        self.finish(BulkKind::Track, users.len(), failures, start)
    }

    /// Run `work` once per user on a fresh pool sized for `kind`, and join.
    fn fan_out<F>(&self, kind: BulkKind, users: &[Arc<User>], work: F) -> TourGuideResult<BulkOutcome>
    where
        F: Fn(&User) -> TourGuideResult<()> + Sync,
    {
        let start = Instant::now();
        let workers = self.pool_size(kind).min(users.len()).max(1);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{}-worker-{}", kind, i))
            .build()
            .map_err(|e| TourGuideError::Pool(format!("{} pool: {}", kind, e)))?;

        info!(kind = %kind, users = users.len(), workers, "bulk pass starting");

        let failures: Vec<UserFailure> = pool.install(|| {
            users
                .par_iter()
                .filter_map(|user| run_unit(kind, user, &work))
                .collect()
        });

        // The pool is per call; its threads exit once it is dropped.
        drop(pool);

        Ok(self.finish(kind, users.len(), failures, start))
    }

    fn finish(
        &self,
        kind: BulkKind,
        attempted: usize,
        failures: Vec<UserFailure>,
        start: Instant,
    ) -> BulkOutcome {
        let outcome = BulkOutcome {
            kind,
            attempted,
            succeeded: attempted - failures.len(),
            failures,
            duration: start.elapsed(),
        };

        if let Ok(mut m) = self.metrics.write() {
            m.record_pass(&outcome);
        }

        info!(
            kind = %kind,
            attempted = outcome.attempted,
            succeeded = outcome.succeeded,
            failed = outcome.failed(),
            elapsed_ms = outcome.duration.as_millis() as u64,
            "bulk pass finished"
        );
        outcome
    }
}

/// Run one user's unit of work, turning errors and panics into a failure
/// record so that sibling tasks are unaffected.
fn run_unit<F>(kind: BulkKind, user: &User, work: F) -> Option<UserFailure>
where
    F: Fn(&User) -> TourGuideResult<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| work(user))) {
        Ok(Ok(())) => {
            debug!(kind = %kind, user = %user.user_name, "unit of work done");
            None
        }
        Ok(Err(e)) => {
            warn!(kind = %kind, user = %user.user_name, error = %e, "unit of work failed");
            Some(UserFailure {
                user_name: user.user_name.clone(),
                error: e.to_string(),
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(kind = %kind, user = %user.user_name, panic = %message, "unit of work panicked");
            Some(UserFailure {
                user_name: user.user_name.clone(),
                error: format!("panicked: {}", message),
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
