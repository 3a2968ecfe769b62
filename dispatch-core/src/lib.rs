//! Core crate contains building blocks to split a set of geocoded ***deliveries*** between ***drivers***.
//!
//! The main entry point is [`assignment::AssignmentEngine`] (or the [`assignment::assign`] shortcut):
//! it resolves pinned deliveries, clusters the rest geometrically, assigns clusters to drivers and
//! finally rebalances driver loads so that nobody exceeds the configured capacity.
//!

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/discovery/mod.rs"]
pub mod discovery;

pub mod algorithms;
pub mod assignment;
pub mod models;
pub mod prelude;
pub mod utils;
