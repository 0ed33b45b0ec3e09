use std::sync::Arc;
use std::time::{Duration, Instant};

use tourguide_compute::SupervisorState;
use tourguide_core::config::Config;

use crate::helpers::{make_service_with, ScriptedGps};

#[test]
fn tracker_runs_first_pass_and_stops() {
    let mut config = Config::default();
    config.internal.test_mode = true;
    config.internal.user_count = 10;
    config.tracker.polling_interval_secs = 3600;
    let service = make_service_with(config, Arc::new(ScriptedGps::random()));

    let supervisor = service.start_tracker().unwrap();
    let deadline = Instant::now() + Duration::from_secs(10);
    while supervisor.passes_completed() == 0 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(supervisor.passes_completed(), 1);

    let started = Instant::now();
    supervisor.stop();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(supervisor.state(), SupervisorState::Stopped);

    // Three seeded visits plus the one from the pass.
    for user in service.get_all_users() {
        assert_eq!(user.visited_location_count(), 4);
    }
}
