use std::sync::atomic::{AtomicU64, Ordering};

/// Reward radius in miles, shared by every pass of one engine.
///
/// Stored as the bit pattern of an `f64` so every reward pass can read it
/// without locking. A pass running concurrently with `set` may see either
/// value.
#[derive(Debug)]
pub struct ProximityBuffer {
    default_miles: f64,
    current: AtomicU64,
}

impl ProximityBuffer {
    pub fn new(default_miles: f64) -> Self {
        Self {
            default_miles,
            current: AtomicU64::new(default_miles.to_bits()),
        }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.current.load(Ordering::Acquire))
    }

    pub fn set(&self, miles: f64) {
        self.current.store(miles.to_bits(), Ordering::Release);
    }

    /// Restore the configured default.
    pub fn reset(&self) {
        self.set(self.default_miles);
    }

    pub fn default_miles(&self) -> f64 {
        self.default_miles
    }
}
