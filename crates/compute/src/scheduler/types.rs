use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Kind of bulk pass. Each kind gets its own worker pool ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BulkKind {
    /// Fetch location, append, recompute rewards.
    Track,
    /// Recompute rewards only.
    Rewards,
}

impl std::fmt::Display for BulkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulkKind::Track => write!(f, "track"),
            BulkKind::Rewards => write!(f, "rewards"),
        }
    }
}

/// A single user's unit of work that did not complete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserFailure {
    pub user_name: String,
    pub error: String,
}

/// Best-effort result of a bulk pass.
#[derive(Debug, Clone, Serialize)]
pub struct BulkOutcome {
    pub kind: BulkKind,
    /// Number of users handed to the pass.
    pub attempted: usize,
    /// Users whose unit of work completed.
    pub succeeded: usize,
    pub failures: Vec<UserFailure>,
    pub duration: Duration,
}

impl BulkOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
