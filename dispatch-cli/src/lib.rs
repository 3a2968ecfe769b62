//! A library behind the `dispatch` command line tool: it reads a roster of drivers and deliveries,
//! resolves addresses to coordinates, runs the assignment and writes route sheets and reports.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod extensions;
