use std::sync::Arc;

use chrono::Utc;

use tourguide_compute::BulkKind;
use tourguide_core::geo;
use tourguide_core::VisitedLocation;

use crate::helpers::{make_service, make_user, ScriptedGps, DISNEYLAND};

#[test]
fn tracking_pass_gives_every_user_a_location() {
    let service = make_service(ScriptedGps::random());
    for i in 0..3 {
        service.add_user(make_user(&format!("user{}", i)));
    }
    let users = service.get_all_users();

    let outcome = service.parallel_track_all_users_location(&users).unwrap();

    assert_eq!(outcome.kind, BulkKind::Track);
    assert_eq!(outcome.attempted, 3);
    assert!(outcome.is_complete());
    let attractions = service.rewards().attractions();
    for user in &users {
        assert!(user.visited_location_count() >= 1);
        let near_something = user.visited_locations().iter().any(|v| {
            attractions
                .iter()
                .any(|a| geo::distance(&a.location, &v.location) <= 10.0)
        });
        if near_something {
            assert!(!user.rewards().is_empty());
        }
    }
}

#[test]
fn users_at_an_attraction_are_rewarded_by_a_tracking_pass() {
    let service = make_service(ScriptedGps::pinned(DISNEYLAND));
    for i in 0..3 {
        service.add_user(make_user(&format!("user{}", i)));
    }
    let users = service.get_all_users();

    service.parallel_track_all_users_location(&users).unwrap();

    for user in &users {
        assert!(user.rewards().iter().any(|r| r.attraction.name == "Disneyland"));
    }
}

#[test]
fn reward_pass_credits_visit_at_attraction() {
    let service = make_service(ScriptedGps::random());
    service.add_user(make_user("testUser"));
    let user = service.get_user("testUser").unwrap();
    user.add_visited_location(VisitedLocation::new(user.user_id, DISNEYLAND, Utc::now()));

    let outcome = service
        .parallel_calculate_rewards(&[Arc::clone(&user)])
        .unwrap();

    assert_eq!(outcome.kind, BulkKind::Rewards);
    assert_eq!(outcome.succeeded, 1);
    let rewards = service.get_user_rewards(&user);
    assert!(!rewards.is_empty());
    assert!(rewards.iter().all(|r| r.reward_points() >= 1));
    // No new fix is taken by a rewards-only pass.
    assert_eq!(user.visited_location_count(), 1);
}

#[test]
fn wide_buffer_rewards_every_attraction() {
    let service = make_service(ScriptedGps::random());
    service.add_user(make_user("testUser"));
    let user = service.get_user("testUser").unwrap();
    user.add_visited_location(VisitedLocation::new(user.user_id, DISNEYLAND, Utc::now()));

    service.rewards().set_proximity_buffer(f64::from(u32::MAX));
    service
        .parallel_calculate_rewards(&[Arc::clone(&user)])
        .unwrap();
    service.rewards().reset_proximity_buffer();

    assert_eq!(user.reward_count(), service.rewards().attractions().len());
    assert_eq!(service.rewards().proximity_buffer(), 10.0);
}

#[test]
fn failing_user_does_not_stop_the_pass() {
    let mut gps = ScriptedGps::pinned(DISNEYLAND);
    let users: Vec<_> = (0..4).map(|i| make_user(&format!("user{}", i))).collect();
    gps.failing.insert(users[2].user_id);
    let service = make_service(gps);
    for user in users {
        service.add_user(user);
    }
    let users = service.get_all_users();

    let outcome = service.parallel_track_all_users_location(&users).unwrap();

    assert_eq!(outcome.attempted, 4);
    assert_eq!(outcome.succeeded, 3);
    assert_eq!(outcome.failed(), 1);
    assert_eq!(outcome.failures[0].user_name, "user2");

    let broken = service.get_user("user2").unwrap();
    assert_eq!(broken.visited_location_count(), 0);
    for name in ["user0", "user1", "user3"] {
        assert_eq!(service.get_user(name).unwrap().visited_location_count(), 1);
    }
}

#[test]
fn empty_population_is_a_no_op() {
    let service = make_service(ScriptedGps::random());

    let outcome = service.parallel_track_all_users_location(&[]).unwrap();

    assert_eq!(outcome.attempted, 0);
    assert!(outcome.is_complete());
}

#[test]
fn passes_are_recorded_in_metrics() {
    let service = make_service(ScriptedGps::pinned(DISNEYLAND));
    service.add_user(make_user("testUser"));
    let users = service.get_all_users();

    service.parallel_track_all_users_location(&users).unwrap();
    service.parallel_track_all_users_location(&users).unwrap();
    service.parallel_calculate_rewards(&users).unwrap();

    let metrics = service.scheduler().metrics();
    assert_eq!(metrics.passes(BulkKind::Track), 2);
    assert_eq!(metrics.passes(BulkKind::Rewards), 1);
}
