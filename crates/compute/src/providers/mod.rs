//! External collaborators consumed by the engine.
//!
//! The engine only depends on these traits; [`simulated`] provides
//! in-process stand-ins used by the worker binary and the tests.

pub mod simulated;

use tourguide_core::{Attraction, AttractionId, TourGuideResult, TripDeal, UserId, VisitedLocation};

pub use simulated::{SimulatedGps, SimulatedRewardCentral, SimulatedTripPricer};

/// Source of the attraction catalog and live user positions.
pub trait LocationProvider: Send + Sync {
    /// The full attraction catalog, in catalog order.
    fn attractions(&self) -> Vec<Attraction>;

    /// Fetch a fresh position fix for the user. May block.
    fn current_location(&self, user_id: UserId) -> TourGuideResult<VisitedLocation>;
}

/// Source of reward points for an (attraction, user) pair.
pub trait ScoreProvider: Send + Sync {
    /// Deterministic per pair. May block.
    fn attraction_reward_points(
        &self,
        attraction_id: AttractionId,
        user_id: UserId,
    ) -> TourGuideResult<u32>;
}

/// Request for trip offers, built from a user's preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest<'a> {
    pub api_key: &'a str,
    pub user_id: UserId,
    pub adults: u32,
    pub children: u32,
    pub nights: u32,
    pub reward_points: u64,
}

/// Source of priced trip offers.
pub trait TripDealProvider: Send + Sync {
    fn price(&self, request: &TripRequest<'_>) -> TourGuideResult<Vec<TripDeal>>;
}
