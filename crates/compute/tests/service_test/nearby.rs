use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use tourguide_compute::LocationProvider;
use tourguide_core::config::Config;
use tourguide_core::{Attraction, Coordinate, TourGuideResult, UserId, VisitedLocation};

use crate::helpers::{make_service, make_service_with, make_user, ScriptedGps, DISNEYLAND};

/// Catalog where two attractions share a location.
struct TiedCatalog {
    attractions: Vec<Attraction>,
}

impl TiedCatalog {
    fn new() -> Self {
        let attractions = vec![
            Attraction::new("Far", "X", "XX", 10.0, 10.0),
            Attraction::new("Second", "X", "XX", 1.0, 1.0),
            Attraction::new("First", "X", "XX", 1.0, 1.0),
            Attraction::new("Near", "X", "XX", 0.5, 0.5),
            Attraction::new("Farther", "X", "XX", 20.0, 20.0),
            Attraction::new("Farthest", "X", "XX", 30.0, 30.0),
            Attraction::new("Middle", "X", "XX", 5.0, 5.0),
        ];
        Self { attractions }
    }
}

impl LocationProvider for TiedCatalog {
    fn attractions(&self) -> Vec<Attraction> {
        self.attractions.clone()
    }

    fn current_location(&self, user_id: UserId) -> TourGuideResult<VisitedLocation> {
        Ok(VisitedLocation::new(user_id, Coordinate::new(0.0, 0.0), Utc::now()))
    }
}

#[test]
fn returns_five_closest_in_ascending_order() {
    let service = make_service(ScriptedGps::random());
    let user = make_user("testUser");
    let visited = VisitedLocation::new(user.user_id, DISNEYLAND, Utc::now());

    let nearby = service.get_nearby_attractions(&visited, &user).unwrap();

    assert_eq!(nearby.len(), 5);
    assert_eq!(nearby[0].attraction_name, "Disneyland");
    assert_eq!(nearby[0].distance_miles, 0.0);
    assert!(nearby
        .windows(2)
        .all(|w| w[0].distance_miles <= w[1].distance_miles));
    for entry in &nearby {
        assert_eq!(entry.user_location, DISNEYLAND);
        assert!((1..=1000).contains(&entry.reward_points));
    }
}

#[test]
fn equal_distances_keep_catalog_order() {
    let service = make_service_with(Config::default(), Arc::new(TiedCatalog::new()));
    let user = make_user("testUser");
    let visited = VisitedLocation::new(user.user_id, Coordinate::new(0.0, 0.0), Utc::now());

    let names: Vec<_> = service
        .get_nearby_attractions(&visited, &user)
        .unwrap()
        .into_iter()
        .map(|n| n.attraction_name)
        .collect();

    assert_eq!(names, vec!["Near", "Second", "First", "Middle", "Far"]);
}

#[test]
fn shorter_catalog_returns_everything() {
    let mut config = Config::default();
    config.rewards.nearby_attraction_count = 10;
    let service = make_service_with(config, Arc::new(TiedCatalog::new()));
    let user = make_user("testUser");
    let visited = VisitedLocation::new(Uuid::new_v4(), Coordinate::new(0.0, 0.0), Utc::now());

    let nearby = service.get_nearby_attractions(&visited, &user).unwrap();

    assert_eq!(nearby.len(), 7);
    assert_eq!(nearby[6].attraction_name, "Farthest");
}
