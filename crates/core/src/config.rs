use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_parse<T: std::str::FromStr>(profile: &str, key: &str, default: T) -> T {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn profiled_env_bool(profile: &str, key: &str, default: bool) -> bool {
    match profiled_env_opt(profile, key) {
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes" | "on"),
        None => default,
    }
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub tracker: TrackerConfig,
    pub scheduler: SchedulerConfig,
    pub rewards: RewardsConfig,
    pub internal: InternalConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `TOURGUIDE_PROFILE`. When set (e.g. `PROD`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    pub fn from_env() -> Self {
        let profile = env_or("TOURGUIDE_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Self {
        let p = profile.to_uppercase();
        let p = p.as_str();
        Self {
            profile: p.to_string(),
            tracker: TrackerConfig::from_env_profiled(p),
            scheduler: SchedulerConfig::from_env_profiled(p),
            rewards: RewardsConfig::from_env_profiled(p),
            internal: InternalConfig::from_env_profiled(p),
        }
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!(
            "  tracker:    interval={}s, mode={:?}",
            self.tracker.polling_interval_secs,
            self.tracker.mode
        );
        tracing::info!(
            "  scheduler:  track_pool={}, reward_pool={}",
            self.scheduler.track_pool_size,
            self.scheduler.reward_pool_size
        );
        tracing::info!(
            "  rewards:    buffer={}mi, attraction_range={}mi, nearby={}",
            self.rewards.default_proximity_buffer_miles,
            self.rewards.attraction_proximity_range_miles,
            self.rewards.nearby_attraction_count
        );
        tracing::info!(
            "  internal:   test_mode={}, users={}",
            self.internal.test_mode,
            self.internal.user_count
        );
    }
}

// ── Tracker ───────────────────────────────────────────────────

/// How a tracking pass walks the user population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingMode {
    Parallel,
    Sequential,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub polling_interval_secs: u64,
    pub mode: TrackingMode,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            polling_interval_secs: 300,
            mode: TrackingMode::Parallel,
        }
    }
}

impl TrackerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        let parallel = profiled_env_bool(p, "TRACKER_PARALLEL", defaults.mode == TrackingMode::Parallel);
        Self {
            polling_interval_secs: profiled_env_parse(
                p,
                "TRACKER_INTERVAL_SECS",
                defaults.polling_interval_secs,
            ),
            mode: if parallel { TrackingMode::Parallel } else { TrackingMode::Sequential },
        }
    }

    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(self.polling_interval_secs)
    }
}

// ── Scheduler ─────────────────────────────────────────────────

/// Worker pool ceilings for bulk passes. Tracking waits on the location
/// provider, so it gets the larger pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub track_pool_size: usize,
    pub reward_pool_size: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            track_pool_size: 128,
            reward_pool_size: 64,
        }
    }
}

impl SchedulerConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            track_pool_size: profiled_env_parse(p, "TRACK_POOL_SIZE", defaults.track_pool_size),
            reward_pool_size: profiled_env_parse(p, "REWARD_POOL_SIZE", defaults.reward_pool_size),
        }
    }
}

// ── Rewards ───────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardsConfig {
    pub default_proximity_buffer_miles: f64,
    pub attraction_proximity_range_miles: f64,
    pub nearby_attraction_count: usize,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            default_proximity_buffer_miles: 10.0,
            attraction_proximity_range_miles: 200.0,
            nearby_attraction_count: 5,
        }
    }
}

impl RewardsConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            default_proximity_buffer_miles: profiled_env_parse(
                p,
                "PROXIMITY_BUFFER_MILES",
                defaults.default_proximity_buffer_miles,
            ),
            attraction_proximity_range_miles: profiled_env_parse(
                p,
                "ATTRACTION_PROXIMITY_RANGE_MILES",
                defaults.attraction_proximity_range_miles,
            ),
            nearby_attraction_count: profiled_env_parse(
                p,
                "NEARBY_ATTRACTION_COUNT",
                defaults.nearby_attraction_count,
            ),
        }
    }
}

// ── Internal test users ───────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalConfig {
    /// Seed the directory with generated users at startup.
    pub test_mode: bool,
    pub user_count: usize,
    pub trip_pricer_api_key: String,
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            user_count: 100,
            trip_pricer_api_key: "test-server-api-key".to_string(),
        }
    }
}

impl InternalConfig {
    fn from_env_profiled(p: &str) -> Self {
        let defaults = Self::default();
        Self {
            test_mode: profiled_env_bool(p, "TEST_MODE", defaults.test_mode),
            user_count: profiled_env_parse(p, "INTERNAL_USER_COUNT", defaults.user_count),
            trip_pricer_api_key: profiled_env_or(
                p,
                "TRIP_PRICER_API_KEY",
                &defaults.trip_pricer_api_key,
            ),
        }
    }
}
