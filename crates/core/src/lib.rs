pub mod config;
pub mod error;
pub mod geo;
pub mod location;
pub mod user;

pub use config::Config;
pub use error::*;
pub use location::*;
pub use user::*;
