//! Module provides various helper functionality around the assignment engine.

pub mod config;
pub mod dispatch;
pub mod geocode;
pub mod import;
pub mod report;
