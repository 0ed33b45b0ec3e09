//! Generated users for running without a user store.

use chrono::{Duration, Utc};
use rand::Rng;
use uuid::Uuid;

use tourguide_core::{User, VisitedLocation};

use crate::providers::simulated::random_coordinate;

/// Visits generated per internal user.
pub const HISTORY_LENGTH: usize = 3;

/// Build `count` users named `internalUser{i}`, each with a short random
/// history from the last 30 days.
pub fn internal_users(count: usize) -> Vec<User> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|i| {
            let name = format!("internalUser{}", i);
            let email = format!("{}@tourGuide.com", name);
            let user = User::new(Uuid::new_v4(), &name, "000", &email);
            for _ in 0..HISTORY_LENGTH {
                let days_ago = rng.gen_range(0..30);
                user.add_visited_location(VisitedLocation::new(
                    user.user_id,
                    random_coordinate(&mut rng),
                    Utc::now() - Duration::days(days_ago),
                ));
            }
            user
        })
        .collect()
}
