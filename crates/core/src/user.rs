use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::location::{Attraction, UserId, VisitedLocation};

/// Points granted to a user for coming within range of an attraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReward {
    pub visited_location: VisitedLocation,
    pub attraction: Attraction,
    reward_points: u32,
}

impl UserReward {
    pub fn new(visited_location: VisitedLocation, attraction: Attraction, reward_points: u32) -> Self {
        Self {
            visited_location,
            attraction,
            reward_points,
        }
    }

    pub fn reward_points(&self) -> u32 {
        self.reward_points
    }

    pub fn set_reward_points(&mut self, points: u32) {
        self.reward_points = points;
    }
}

/// Trip preferences forwarded to the trip pricer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub attraction_proximity: u32,
    pub currency: String,
    pub lower_price_point: u32,
    pub high_price_point: u32,
    pub trip_duration: u32,
    pub ticket_quantity: u32,
    pub number_of_adults: u32,
    pub number_of_children: u32,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            attraction_proximity: u32::MAX,
            currency: "USD".to_string(),
            lower_price_point: 0,
            high_price_point: u32::MAX,
            trip_duration: 1,
            ticket_quantity: 1,
            number_of_adults: 1,
            number_of_children: 0,
        }
    }
}

/// A priced trip offer from a trip provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripDeal {
    pub trip_id: Uuid,
    pub provider_name: String,
    pub price: f64,
}

/// A tracked user.
///
/// Identity is fixed at registration. History, rewards, preferences and
/// trip deals sit behind their own locks so that a tracking pass can append
/// while other threads read snapshots.
#[derive(Debug, Serialize)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub phone_number: String,
    pub email_address: String,
    visited_locations: RwLock<Vec<VisitedLocation>>,
    user_rewards: RwLock<Vec<UserReward>>,
    latest_location_timestamp: RwLock<Option<DateTime<Utc>>>,
    user_preferences: RwLock<UserPreferences>,
    trip_deals: RwLock<Vec<TripDeal>>,
}

// A panic inside a critical section never leaves these collections half
// written, so poisoned locks are recovered rather than propagated.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|e| e.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|e| e.into_inner())
}

impl User {
    pub fn new(user_id: UserId, user_name: &str, phone_number: &str, email_address: &str) -> Self {
        Self {
            user_id,
            user_name: user_name.to_string(),
            phone_number: phone_number.to_string(),
            email_address: email_address.to_string(),
            visited_locations: RwLock::new(Vec::new()),
            user_rewards: RwLock::new(Vec::new()),
            latest_location_timestamp: RwLock::new(None),
            user_preferences: RwLock::new(UserPreferences::default()),
            trip_deals: RwLock::new(Vec::new()),
        }
    }

    // ── Location history ─────────────────────────────────────────

    /// Append a fix to the end of the history.
    pub fn add_visited_location(&self, visited_location: VisitedLocation) {
        let time_visited = visited_location.time_visited;
        write(&self.visited_locations).push(visited_location);
        *write(&self.latest_location_timestamp) = Some(time_visited);
    }

    /// Snapshot of the history, oldest first.
    pub fn visited_locations(&self) -> Vec<VisitedLocation> {
        read(&self.visited_locations).clone()
    }

    pub fn visited_location_count(&self) -> usize {
        read(&self.visited_locations).len()
    }

    pub fn last_visited_location(&self) -> Option<VisitedLocation> {
        read(&self.visited_locations).last().cloned()
    }

    pub fn clear_visited_locations(&self) {
        write(&self.visited_locations).clear();
        *write(&self.latest_location_timestamp) = None;
    }

    pub fn latest_location_timestamp(&self) -> Option<DateTime<Utc>> {
        *read(&self.latest_location_timestamp)
    }

    // ── Rewards ──────────────────────────────────────────────────

    /// Record a reward unless one already exists for the same attraction
    /// name. Returns whether the reward was added.
    pub fn add_reward(&self, reward: UserReward) -> bool {
        let mut rewards = write(&self.user_rewards);
        if rewards
            .iter()
            .any(|r| r.attraction.name == reward.attraction.name)
        {
            return false;
        }
        rewards.push(reward);
        true
    }

    pub fn rewards(&self) -> Vec<UserReward> {
        read(&self.user_rewards).clone()
    }

    pub fn reward_count(&self) -> usize {
        read(&self.user_rewards).len()
    }

    /// Names of the attractions this user already holds a reward for.
    pub fn rewarded_attractions(&self) -> HashSet<String> {
        read(&self.user_rewards)
            .iter()
            .map(|r| r.attraction.name.clone())
            .collect()
    }

    pub fn total_reward_points(&self) -> u64 {
        read(&self.user_rewards)
            .iter()
            .map(|r| u64::from(r.reward_points()))
            .sum()
    }

    // ── Preferences and trip deals ───────────────────────────────

    pub fn preferences(&self) -> UserPreferences {
        read(&self.user_preferences).clone()
    }

    pub fn set_preferences(&self, preferences: UserPreferences) {
        *write(&self.user_preferences) = preferences;
    }

    pub fn trip_deals(&self) -> Vec<TripDeal> {
        read(&self.trip_deals).clone()
    }

    pub fn set_trip_deals(&self, deals: Vec<TripDeal>) {
        *write(&self.trip_deals) = deals;
    }
}
