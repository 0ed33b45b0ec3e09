//! Proximity-based reward assignment.

pub mod buffer;
pub mod engine;

pub use buffer::ProximityBuffer;
pub use engine::RewardEngine;
