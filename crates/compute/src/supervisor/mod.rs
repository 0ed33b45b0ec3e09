//! Background tracking loop.
//!
//! [`PollingSupervisor`] owns one dedicated thread that runs a tracking pass
//! over every registered user, sleeps for the polling interval, and repeats.
//! Stopping is cooperative: the stop flag is checked before each pass, and
//! the sleep wakes as soon as stop is requested. A pass that is already
//! running finishes first.

mod state;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use tourguide_core::config::{TrackerConfig, TrackingMode};
use tourguide_core::{TourGuideError, TourGuideResult};

use crate::directory::UserDirectory;
use crate::scheduler::BulkScheduler;

pub use state::{SharedState, SupervisorState};

pub struct PollingSupervisor {
    state: SharedState,
    /// Checked by the loop before every pass.
    stop: Arc<AtomicBool>,
    /// Dropping the sender wakes the loop out of its sleep.
    wake: Mutex<Option<Sender<()>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
    passes: Arc<AtomicU64>,
}

impl PollingSupervisor {
    /// Start tracking with the configured interval and mode.
    pub fn start(
        directory: Arc<UserDirectory>,
        scheduler: Arc<BulkScheduler>,
        config: &TrackerConfig,
    ) -> TourGuideResult<Self> {
        Self::start_with_interval(directory, scheduler, config.mode, config.polling_interval())
    }

    /// Spawn the tracking thread. The supervisor is `Running` on return.
    pub fn start_with_interval(
        directory: Arc<UserDirectory>,
        scheduler: Arc<BulkScheduler>,
        mode: TrackingMode,
        interval: Duration,
    ) -> TourGuideResult<Self> {
        let state = SharedState::new();
        let stop = Arc::new(AtomicBool::new(false));
        let passes = Arc::new(AtomicU64::new(0));
        let (wake_tx, wake_rx) = mpsc::channel();

        let tracking = TrackingLoop {
            directory,
            scheduler,
            mode,
            interval,
            state: state.clone(),
            stop: Arc::clone(&stop),
            passes: Arc::clone(&passes),
        };

        state.set(SupervisorState::Running);
        let handle = std::thread::Builder::new()
            .name("tracker".to_string())
            .spawn(move || tracking.run(wake_rx))
            .map_err(|e| {
                state.set(SupervisorState::Stopped);
                TourGuideError::Other(format!("failed to spawn tracker thread: {}", e))
            })?;

        info!(
            interval_secs = interval.as_secs_f64(),
            mode = ?mode,
            "tracker started"
        );

        Ok(Self {
            state,
            stop,
            wake: Mutex::new(Some(wake_tx)),
            handle: Mutex::new(Some(handle)),
            passes,
        })
    }

    /// Request shutdown and wait for the tracking thread to exit.
    ///
    /// Safe to call more than once. An in-flight pass is allowed to finish.
    pub fn stop(&self) {
        if self.state.transition(SupervisorState::Running, SupervisorState::Stopping) {
            info!("tracker stop requested");
        }
        self.stop.store(true, Ordering::SeqCst);
        drop(self.wake.lock().unwrap_or_else(|e| e.into_inner()).take());

        let handle = self.handle.lock().unwrap_or_else(|e| e.into_inner()).take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                error!("tracker thread panicked");
                self.state.set(SupervisorState::Stopped);
            }
            info!("tracker stopped");
        }
    }

    pub fn state(&self) -> SupervisorState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == SupervisorState::Running
    }

    /// Number of tracking passes completed so far.
    pub fn passes_completed(&self) -> u64 {
        self.passes.load(Ordering::Relaxed)
    }
}

impl Drop for PollingSupervisor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State moved onto the tracking thread.
struct TrackingLoop {
    directory: Arc<UserDirectory>,
    scheduler: Arc<BulkScheduler>,
    mode: TrackingMode,
    interval: Duration,
    state: SharedState,
    stop: Arc<AtomicBool>,
    passes: Arc<AtomicU64>,
}

impl TrackingLoop {
    fn run(self, wake: Receiver<()>) {
        loop {
            if self.stop.load(Ordering::SeqCst) {
                debug!("tracker stopping");
                break;
            }

            let users = self.directory.all();
            debug!(users = users.len(), mode = ?self.mode, "begin tracking pass");
            let start = Instant::now();

            match self.mode {
                TrackingMode::Parallel => {
                    if let Err(e) = self.scheduler.track_all(&users) {
                        error!(error = %e, "tracking pass failed");
                    }
                }
                TrackingMode::Sequential => {
                    self.scheduler.track_all_sequential(&users);
                }
            }

            self.passes.fetch_add(1, Ordering::Relaxed);
            info!(
                users = users.len(),
                elapsed_secs = start.elapsed().as_secs_f64(),
                "tracking pass complete"
            );

            debug!("tracker sleeping");
            match wake.recv_timeout(self.interval) {
                Err(RecvTimeoutError::Timeout) => continue,
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("tracker woken for shutdown");
                    break;
                }
            }
        }

        self.state.set(SupervisorState::Stopped);
    }
}
