use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tourguide_compute::providers::{SimulatedGps, SimulatedRewardCentral, SimulatedTripPricer};
use tourguide_compute::{LocationProvider, TourGuideService};
use tourguide_core::{
    Attraction, Config, Coordinate, TourGuideError, TourGuideResult, User, UserId, VisitedLocation,
};

pub const DISNEYLAND: Coordinate = Coordinate {
    latitude: 33.817595,
    longitude: -117.922008,
};

/// Simulated GPS that can pin everyone to one spot and fail for chosen users.
pub struct ScriptedGps {
    pub inner: SimulatedGps,
    pub pinned: Option<Coordinate>,
    pub failing: HashSet<UserId>,
}

impl ScriptedGps {
    pub fn random() -> Self {
        Self {
            inner: SimulatedGps::new(),
            pinned: None,
            failing: HashSet::new(),
        }
    }

    pub fn pinned(location: Coordinate) -> Self {
        Self {
            pinned: Some(location),
            ..Self::random()
        }
    }
}

impl LocationProvider for ScriptedGps {
    fn attractions(&self) -> Vec<Attraction> {
        self.inner.attractions()
    }

    fn current_location(&self, user_id: UserId) -> TourGuideResult<VisitedLocation> {
        if self.failing.contains(&user_id) {
            return Err(TourGuideError::Provider(format!("no fix for {}", user_id)));
        }
        match self.pinned {
            Some(location) => Ok(VisitedLocation::new(user_id, location, Utc::now())),
            None => self.inner.current_location(user_id),
        }
    }
}

/// Service over the given GPS with default config and simulated scoring.
pub fn make_service(gps: ScriptedGps) -> TourGuideService {
    make_service_with(Config::default(), Arc::new(gps))
}

pub fn make_service_with(config: Config, gps: Arc<dyn LocationProvider>) -> TourGuideService {
    TourGuideService::new(
        config,
        gps,
        Arc::new(SimulatedRewardCentral::new()),
        Arc::new(SimulatedTripPricer::new()),
    )
}

pub fn make_user(name: &str) -> User {
    User::new(Uuid::new_v4(), name, "000", &format!("{}@tourGuide.com", name))
}
