pub mod directory;
pub mod providers;
pub mod rewards;
pub mod scheduler;
pub mod seed;
pub mod service;
pub mod supervisor;
pub mod tracking;

pub use directory::UserDirectory;
pub use providers::{LocationProvider, ScoreProvider, TripDealProvider, TripRequest};
pub use rewards::{ProximityBuffer, RewardEngine};
pub use scheduler::{BulkKind, BulkOutcome, BulkScheduler, SchedulerMetrics, UserFailure};
pub use service::TourGuideService;
pub use supervisor::{PollingSupervisor, SupervisorState};
pub use tracking::LocationTracker;
