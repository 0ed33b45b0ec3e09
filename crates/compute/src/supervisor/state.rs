use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::Serialize;

/// Supervisor lifecycle: `Idle → Running → Stopping → Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum SupervisorState {
    Idle = 0,
    Running = 1,
    Stopping = 2,
    Stopped = 3,
}

impl SupervisorState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => SupervisorState::Running,
            2 => SupervisorState::Stopping,
            3 => SupervisorState::Stopped,
            _ => SupervisorState::Idle,
        }
    }
}

/// Lifecycle cell shared between the supervisor handle and its thread.
#[derive(Debug, Clone)]
pub struct SharedState(Arc<AtomicU8>);

impl SharedState {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU8::new(SupervisorState::Idle as u8)))
    }

    pub fn get(&self) -> SupervisorState {
        SupervisorState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub fn set(&self, state: SupervisorState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    /// Move from `from` to `to`; returns false if the current state was not `from`.
    pub fn transition(&self, from: SupervisorState, to: SupervisorState) -> bool {
        self.0
            .compare_exchange(from as u8, to as u8, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new()
    }
}
