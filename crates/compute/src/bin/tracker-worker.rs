//! tracker-worker — runs the background tracking loop against the
//! simulated GPS, reward and trip pricing services.
//!
//! Tracks every registered user on the polling interval until Ctrl-C, then
//! stops the tracker and prints the pass metrics.

use std::sync::Arc;

use clap::Parser;
use tracing::{info, warn};

use tourguide_compute::providers::{SimulatedGps, SimulatedRewardCentral, SimulatedTripPricer};
use tourguide_compute::TourGuideService;
use tourguide_core::config::{load_dotenv, TrackingMode};
use tourguide_core::Config;

// ── CLI ─────────────────────────────────────────────────────────────

/// Periodic location tracking and reward assignment.
#[derive(Parser, Debug)]
#[command(name = "tracker-worker", version, about)]
struct Cli {
    /// Polling interval in seconds (overrides TRACKER_INTERVAL_SECS).
    #[arg(long)]
    interval: Option<u64>,

    /// Seed this many generated users (enables test mode).
    #[arg(long)]
    users: Option<usize>,

    /// Track users one at a time instead of on the worker pool.
    #[arg(long, default_value_t = false)]
    sequential: bool,
}

// ── main ────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    load_dotenv();
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(interval) = cli.interval {
        config.tracker.polling_interval_secs = interval;
    }
    if let Some(users) = cli.users {
        config.internal.test_mode = true;
        config.internal.user_count = users;
    }
    if cli.sequential {
        config.tracker.mode = TrackingMode::Sequential;
    }
    config.log_summary();

    let service = TourGuideService::new(
        config,
        Arc::new(SimulatedGps::new()),
        Arc::new(SimulatedRewardCentral::new()),
        Arc::new(SimulatedTripPricer::new()),
    );
    if service.directory().is_empty() {
        warn!("no users registered; passes will be empty");
    }

    let supervisor = service.start_tracker()?;
    info!("tracker-worker running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");

    // Joining the tracker blocks until any in-flight pass completes.
    let supervisor = tokio::task::spawn_blocking(move || {
        supervisor.stop();
        supervisor
    })
    .await?;

    let metrics = service.scheduler().metrics();
    info!(
        passes = supervisor.passes_completed(),
        metrics = %serde_json::to_string(&metrics)?,
        "tracker-worker exited cleanly"
    );
    Ok(())
}
