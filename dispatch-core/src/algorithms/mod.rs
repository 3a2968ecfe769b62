//! A collection of reusable algorithms without dependencies on the domain model.

pub mod clustering;
pub mod geometry;
