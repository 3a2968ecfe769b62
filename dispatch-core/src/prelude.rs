//! This module reimports a common used types.

pub use crate::assignment::assign;
pub use crate::assignment::Assignment;
pub use crate::assignment::AssignmentEngine;
pub use crate::assignment::AssignmentError;

pub use crate::models::AssignmentConfig;
pub use crate::models::AssignmentPolicy;
pub use crate::models::Delivery;
pub use crate::models::Driver;

pub use crate::algorithms::geometry::Point;

pub use crate::utils::compare_floats;
pub use crate::utils::Environment;
pub use crate::utils::Float;
pub use crate::utils::GenericError;
pub use crate::utils::GenericResult;
pub use crate::utils::InfoLogger;
pub use crate::utils::{Random, SeededRandom};
