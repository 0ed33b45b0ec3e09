//! Facade exposed to the surrounding application.

use std::sync::Arc;

use tracing::{debug, info};

use tourguide_core::geo;
use tourguide_core::{
    Config, NearbyAttraction, TourGuideError, TourGuideResult, TripDeal, User, UserId,
    UserReward, VisitedLocation,
};

use crate::directory::UserDirectory;
use crate::providers::{LocationProvider, ScoreProvider, TripDealProvider, TripRequest};
use crate::rewards::RewardEngine;
use crate::scheduler::{BulkOutcome, BulkScheduler};
use crate::seed;
use crate::supervisor::PollingSupervisor;
use crate::tracking::LocationTracker;

/// User lookups, single-user tracking and bulk passes behind one handle.
pub struct TourGuideService {
    config: Config,
    directory: Arc<UserDirectory>,
    rewards: Arc<RewardEngine>,
    tracker: Arc<LocationTracker>,
    scheduler: Arc<BulkScheduler>,
    trips: Arc<dyn TripDealProvider>,
}

impl TourGuideService {
    /// Wire the engine to its collaborators. In test mode the directory is
    /// seeded with generated users.
    pub fn new(
        config: Config,
        locations: Arc<dyn LocationProvider>,
        scores: Arc<dyn ScoreProvider>,
        trips: Arc<dyn TripDealProvider>,
    ) -> Self {
        let rewards = Arc::new(RewardEngine::new(
            Arc::clone(&locations),
            scores,
            &config.rewards,
        ));
        let tracker = Arc::new(LocationTracker::new(locations, Arc::clone(&rewards)));
        let scheduler = Arc::new(BulkScheduler::new(
            config.scheduler.clone(),
            Arc::clone(&tracker),
        ));
        let directory = Arc::new(UserDirectory::new());

        if config.internal.test_mode {
            info!("Test mode enabled");
            debug!("Initializing users");
            for user in seed::internal_users(config.internal.user_count) {
                directory.register(user);
            }
            debug!(users = directory.len(), "Created internal test users");
        }

        Self {
            config,
            directory,
            rewards,
            tracker,
            scheduler,
            trips,
        }
    }

    /// Start the background tracker over this service's users.
    pub fn start_tracker(&self) -> TourGuideResult<PollingSupervisor> {
        PollingSupervisor::start(
            Arc::clone(&self.directory),
            Arc::clone(&self.scheduler),
            &self.config.tracker,
        )
    }

    pub fn directory(&self) -> &Arc<UserDirectory> {
        &self.directory
    }

    pub fn rewards(&self) -> &Arc<RewardEngine> {
        &self.rewards
    }

    pub fn scheduler(&self) -> &Arc<BulkScheduler> {
        &self.scheduler
    }

    // ── Users ────────────────────────────────────────────────────

    pub fn get_user(&self, user_name: &str) -> TourGuideResult<Arc<User>> {
        self.directory
            .by_name(user_name)
            .ok_or_else(|| TourGuideError::user_not_found(user_name))
    }

    pub fn get_user_by_id(&self, user_id: UserId) -> TourGuideResult<Arc<User>> {
        self.directory
            .by_id(user_id)
            .ok_or_else(|| TourGuideError::NotFound(format!("user id {}", user_id)))
    }

    pub fn get_all_users(&self) -> Vec<Arc<User>> {
        self.directory.all()
    }

    /// Returns false if the name was already registered.
    pub fn add_user(&self, user: User) -> bool {
        self.directory.register(user)
    }

    // ── Locations and rewards ────────────────────────────────────

    pub fn get_user_rewards(&self, user: &User) -> Vec<UserReward> {
        user.rewards()
    }

    /// Last known location, or a fresh fix if the user has none yet.
    pub fn get_user_location(&self, user: &User) -> TourGuideResult<VisitedLocation> {
        match user.last_visited_location() {
            Some(visited) => Ok(visited),
            None => self.track_user_location(user),
        }
    }

    pub fn track_user_location(&self, user: &User) -> TourGuideResult<VisitedLocation> {
        self.tracker.track_user(user)
    }

    /// The closest attractions to `visited`, nearest first, with the points
    /// `user` would earn at each. Equal distances keep catalog order.
    pub fn get_nearby_attractions(
        &self,
        visited: &VisitedLocation,
        user: &User,
    ) -> TourGuideResult<Vec<NearbyAttraction>> {
        let mut ranked: Vec<_> = self
            .rewards
            .attractions()
            .into_iter()
            .map(|attraction| {
                let distance = geo::distance(&attraction.location, &visited.location);
                (attraction, distance)
            })
            .collect();
        ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
        ranked.truncate(self.config.rewards.nearby_attraction_count);

        ranked
            .into_iter()
            .map(|(attraction, distance_miles)| {
                Ok(NearbyAttraction {
                    reward_points: self.rewards.get_reward_points(&attraction, user)?,
                    attraction_name: attraction.name,
                    attraction_location: attraction.location,
                    user_location: visited.location,
                    distance_miles,
                })
            })
            .collect()
    }

    /// Quote trips for the user's preferences, discounted by their reward
    /// points. The quotes are cached on the user.
    pub fn get_trip_deals(&self, user: &User) -> TourGuideResult<Vec<TripDeal>> {
        let preferences = user.preferences();
        let request = TripRequest {
            api_key: &self.config.internal.trip_pricer_api_key,
            user_id: user.user_id,
            adults: preferences.number_of_adults,
            children: preferences.number_of_children,
            nights: preferences.trip_duration,
            reward_points: user.total_reward_points(),
        };
        let deals = self.trips.price(&request)?;
        user.set_trip_deals(deals.clone());
        Ok(deals)
    }

    // ── Bulk passes ──────────────────────────────────────────────

    pub fn parallel_track_all_users_location(
        &self,
        users: &[Arc<User>],
    ) -> TourGuideResult<BulkOutcome> {
        self.scheduler.track_all(users)
    }

    pub fn parallel_calculate_rewards(&self, users: &[Arc<User>]) -> TourGuideResult<BulkOutcome> {
        self.scheduler.compute_rewards_all(users)
    }
}
