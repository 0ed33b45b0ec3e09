//! Bulk scheduler runner.
//!
//! Split into focused submodules:
//! - `core`: BulkScheduler struct, constructor, and accessor methods
//! - `execution`: pool construction, fan-out, and the join barrier

mod core;
mod execution;

pub use self::core::BulkScheduler;
