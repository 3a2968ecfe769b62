//! Contains domain models: deliveries, drivers and the assignment configuration.

mod config;
pub use self::config::*;

mod problem;
pub use self::problem::*;
