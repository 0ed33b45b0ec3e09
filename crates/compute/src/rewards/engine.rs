use std::sync::Arc;

use tracing::debug;

use tourguide_core::config::RewardsConfig;
use tourguide_core::geo;
use tourguide_core::{Attraction, Coordinate, TourGuideResult, User, UserReward, VisitedLocation};

use super::buffer::ProximityBuffer;
use crate::providers::{LocationProvider, ScoreProvider};

/// Assigns attraction rewards from a user's location history.
pub struct RewardEngine {
    locations: Arc<dyn LocationProvider>,
    scores: Arc<dyn ScoreProvider>,
    proximity_buffer: ProximityBuffer,
    /// Radius for "is this attraction nearby" queries. Independent of the
    /// reward buffer.
    attraction_proximity_range: f64,
}

impl RewardEngine {
    pub fn new(
        locations: Arc<dyn LocationProvider>,
        scores: Arc<dyn ScoreProvider>,
        config: &RewardsConfig,
    ) -> Self {
        Self {
            locations,
            scores,
            proximity_buffer: ProximityBuffer::new(config.default_proximity_buffer_miles),
            attraction_proximity_range: config.attraction_proximity_range_miles,
        }
    }

    /// Walk the user's history (oldest first) against the catalog and grant
    /// a reward for every attraction within the proximity buffer that the
    /// user has not been rewarded for yet. Returns the number of rewards
    /// added.
    ///
    /// A score lookup failure aborts the pass for this user; rewards granted
    /// before the failure are kept.
    pub fn calculate_rewards(&self, user: &User) -> TourGuideResult<usize> {
        let visits = user.visited_locations();
        let attractions = self.locations.attractions();
        let mut rewarded = user.rewarded_attractions();
        let mut added = 0;

        for visit in &visits {
            for attraction in &attractions {
                if rewarded.contains(&attraction.name) {
                    continue;
                }
                if !self.near_attraction(visit, attraction) {
                    continue;
                }

                let points = self.get_reward_points(attraction, user)?;
                if user.add_reward(UserReward::new(visit.clone(), attraction.clone(), points)) {
                    added += 1;
                }
                rewarded.insert(attraction.name.clone());
            }
        }

        debug!(
            user = %user.user_name,
            visits = visits.len(),
            added,
            "rewards calculated"
        );
        Ok(added)
    }

    /// Whether `location` lies within the fixed attraction proximity range.
    pub fn is_within_attraction_proximity(&self, attraction: &Attraction, location: &Coordinate) -> bool {
        geo::distance(&attraction.location, location) <= self.attraction_proximity_range
    }

    fn near_attraction(&self, visit: &VisitedLocation, attraction: &Attraction) -> bool {
        geo::distance(&attraction.location, &visit.location) <= self.proximity_buffer.get()
    }

    pub fn get_reward_points(&self, attraction: &Attraction, user: &User) -> TourGuideResult<u32> {
        self.scores
            .attraction_reward_points(attraction.id, user.user_id)
    }

    /// The attraction catalog this engine scores against.
    pub fn attractions(&self) -> Vec<Attraction> {
        self.locations.attractions()
    }

    // ── Proximity buffer ─────────────────────────────────────────

    pub fn proximity_buffer(&self) -> f64 {
        self.proximity_buffer.get()
    }

    pub fn set_proximity_buffer(&self, miles: f64) {
        self.proximity_buffer.set(miles);
    }

    pub fn reset_proximity_buffer(&self) {
        self.proximity_buffer.reset();
    }
}
