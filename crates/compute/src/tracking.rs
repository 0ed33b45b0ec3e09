use std::sync::Arc;

use tracing::debug;

use tourguide_core::{TourGuideResult, User, VisitedLocation};

use crate::providers::LocationProvider;
use crate::rewards::RewardEngine;

/// Single-user unit of tracking work.
pub struct LocationTracker {
    locations: Arc<dyn LocationProvider>,
    rewards: Arc<RewardEngine>,
}

impl LocationTracker {
    pub fn new(locations: Arc<dyn LocationProvider>, rewards: Arc<RewardEngine>) -> Self {
        Self { locations, rewards }
    }

    /// Fetch the user's current position, append it to their history, then
    /// recompute their rewards. The append always happens before the reward
    /// pass reads the history.
    pub fn track_user(&self, user: &User) -> TourGuideResult<VisitedLocation> {
        let visited = self.locations.current_location(user.user_id)?;
        user.add_visited_location(visited.clone());
        debug!(user = %user.user_name, location = %visited.location, "location tracked");

        self.rewards.calculate_rewards(user)?;
        Ok(visited)
    }

    pub fn rewards(&self) -> &Arc<RewardEngine> {
        &self.rewards
    }
}
