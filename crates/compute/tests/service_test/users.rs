use chrono::Utc;
use uuid::Uuid;

use tourguide_compute::providers::simulated::TRIP_DEAL_COUNT;
use tourguide_core::config::Config;
use tourguide_core::{TourGuideError, UserPreferences, VisitedLocation};

use crate::helpers::{make_service, make_service_with, make_user, ScriptedGps, DISNEYLAND};

#[test]
fn add_and_get_user() {
    let service = make_service(ScriptedGps::random());
    let user = make_user("testUser");
    let user_id = user.user_id;
    assert!(service.add_user(user));

    let by_name = service.get_user("testUser").unwrap();
    assert_eq!(by_name.user_id, user_id);
    let by_id = service.get_user_by_id(user_id).unwrap();
    assert_eq!(by_id.user_name, "testUser");
}

#[test]
fn duplicate_name_keeps_first_user() {
    let service = make_service(ScriptedGps::random());
    let first = make_user("testUser");
    let first_id = first.user_id;
    assert!(service.add_user(first));
    assert!(!service.add_user(make_user("testUser")));

    assert_eq!(service.get_all_users().len(), 1);
    assert_eq!(service.get_user("testUser").unwrap().user_id, first_id);
}

#[test]
fn unknown_user_is_not_found() {
    let service = make_service(ScriptedGps::random());
    assert!(matches!(service.get_user("nobody"), Err(TourGuideError::NotFound(_))));
    assert!(matches!(
        service.get_user_by_id(Uuid::new_v4()),
        Err(TourGuideError::NotFound(_))
    ));
}

#[test]
fn get_all_users() {
    let service = make_service(ScriptedGps::random());
    service.add_user(make_user("testUser1"));
    service.add_user(make_user("testUser2"));
    assert_eq!(service.get_all_users().len(), 2);
}

#[test]
fn test_mode_seeds_internal_users() {
    let mut config = Config::default();
    config.internal.test_mode = true;
    config.internal.user_count = 5;
    let service = make_service_with(config, std::sync::Arc::new(ScriptedGps::random()));

    let users = service.get_all_users();
    assert_eq!(users.len(), 5);
    assert!(service.get_user("internalUser4").is_ok());
    assert!(users.iter().all(|u| u.visited_location_count() == 3));
}

#[test]
fn user_location_returns_last_known_fix() {
    let service = make_service(ScriptedGps::pinned(DISNEYLAND));
    let user = make_user("testUser");
    let known = VisitedLocation::new(user.user_id, tourguide_core::Coordinate::new(0.0, 0.0), Utc::now());
    user.add_visited_location(known.clone());

    assert_eq!(service.get_user_location(&user).unwrap(), known);
    assert_eq!(user.visited_location_count(), 1);
}

#[test]
fn user_location_tracks_when_history_is_empty() {
    let service = make_service(ScriptedGps::pinned(DISNEYLAND));
    let user = make_user("testUser");

    let location = service.get_user_location(&user).unwrap();

    assert_eq!(location.location, DISNEYLAND);
    assert_eq!(user.visited_location_count(), 1);
    // The forced track also runs the reward pass.
    assert!(!service.get_user_rewards(&user).is_empty());
}

#[test]
fn track_user_location_appends_and_returns_fix() {
    let service = make_service(ScriptedGps::pinned(DISNEYLAND));
    let user = make_user("testUser");

    let first = service.track_user_location(&user).unwrap();
    let second = service.track_user_location(&user).unwrap();

    assert_eq!(user.visited_locations(), vec![first, second.clone()]);
    assert_eq!(user.last_visited_location(), Some(second));
    // Two visits at the same attraction still earn it once.
    let disneyland_rewards = service
        .get_user_rewards(&user)
        .iter()
        .filter(|r| r.attraction.name == "Disneyland")
        .count();
    assert_eq!(disneyland_rewards, 1);
}

#[test]
fn trip_deals_are_cached_on_the_user() {
    let service = make_service(ScriptedGps::random());
    let user = make_user("testUser");
    user.set_preferences(UserPreferences {
        number_of_adults: 2,
        number_of_children: 2,
        trip_duration: 4,
        ..UserPreferences::default()
    });

    let deals = service.get_trip_deals(&user).unwrap();

    assert_eq!(deals.len(), TRIP_DEAL_COUNT);
    assert_eq!(user.trip_deals(), deals);
}
