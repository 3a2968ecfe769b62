//! Contains the assignment engine which splits deliveries between drivers.
//!
//! The engine runs the following steps:
//! - resolves deliveries pinned to a driver by name and puts them into the driver's bucket directly
//! - fails fast when free deliveries cannot fit into drivers' total capacity
//! - groups free deliveries according to the `AssignmentPolicy` and appends groups to drivers
//! - moves single deliveries from drivers over capacity to drivers with room
//! - re-applies pins so that a pinned delivery always ends at its driver
//!
//! Two behaviors are kept intentionally: a pin which matches no driver is ignored without an error
//! (see [`find_unmatched_pins`] to report them), and deliveries are dropped when no driver has known
//! coordinates (they are reported in [`Assignment::unassigned`] and passed to the logger).

#[cfg(test)]
#[path = "../../tests/unit/assignment/assignment_test.rs"]
mod assignment_test;

mod clusters;
mod context;
mod overrides;
mod rebalance;

pub use self::overrides::{find_unmatched_pins, normalize_name, resolve_pins};

use self::clusters::assign_free_deliveries;
use self::context::AssignmentContext;
use self::overrides::{reapply_pins, route_pinned_deliveries};
use self::rebalance::{get_overloaded_drivers, rebalance};
use crate::models::{AssignmentConfig, Delivery, Driver};
use crate::utils::{Environment, SeededRandom};

/// Specifies assignment errors.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssignmentError {
    /// Free deliveries do not fit into total capacity of all drivers.
    #[error("deliveries ({deliveries}) exceed capacity: {drivers} drivers * {capacity} max = {total}")]
    CapacityExceeded {
        /// Amount of free deliveries.
        deliveries: usize,
        /// Amount of drivers.
        drivers: usize,
        /// Capacity per driver.
        capacity: usize,
        /// Total capacity.
        total: usize,
    },

    /// Rebalancing reached its move limit.
    #[error("rebalance did not converge after {moves} moves")]
    RebalanceDidNotConverge {
        /// Amount of done moves.
        moves: usize,
    },

    /// Configuration has unusable values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// An assignment result.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// Drivers in the input order with populated deliveries.
    pub drivers: Vec<Driver>,
    /// Deliveries which could not be given to any driver because no driver has known coordinates.
    pub unassigned: Vec<Delivery>,
}

/// Assigns deliveries to drivers. The result is fully determined by its input and configuration.
pub struct AssignmentEngine {
    config: AssignmentConfig,
    environment: Environment,
}

impl AssignmentEngine {
    /// Creates a new instance of `AssignmentEngine` with a default environment.
    pub fn new(config: AssignmentConfig) -> Self {
        Self { config, environment: Environment::default() }
    }

    /// Sets environment used to report progress and irregular events.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Returns configuration.
    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }

    /// Assigns deliveries to drivers returning drivers (in the same order) with populated deliveries.
    /// Empty input is returned as is before configuration is validated.
    pub fn run(&self, deliveries: Vec<Delivery>, drivers: Vec<Driver>) -> Result<Assignment, AssignmentError> {
        // without drivers nothing can be assigned, without deliveries drivers stay as they are
        if drivers.is_empty() || deliveries.is_empty() {
            return Ok(Assignment { drivers, unassigned: Vec::default() });
        }

        self.config.validate().map_err(AssignmentError::InvalidConfig)?;

        let (buckets, dropped) = self.create_buckets(deliveries.as_slice(), drivers.as_slice())?;

        Ok(materialize(deliveries, drivers, buckets, dropped))
    }

    fn create_buckets(
        &self,
        deliveries: &[Delivery],
        drivers: &[Driver],
    ) -> Result<(Vec<Vec<usize>>, Vec<usize>), AssignmentError> {
        let config = &self.config;
        let capacity = config.capacity_per_driver;

        let mut ctx = AssignmentContext::new(deliveries, drivers);
        let free = ctx.free_deliveries();

        check_capacity(free.len(), drivers.len(), capacity)?;

        route_pinned_deliveries(&mut ctx);
        let pinned = ctx.assigned_count();

        let random = SeededRandom::new(config.random_seed);
        let result = assign_free_deliveries(&mut ctx, free.as_slice(), config, &random);

        if !result.dropped.is_empty() {
            self.environment.log(
                format!("{} deliveries are not assigned: no driver has known coordinates", result.dropped.len()).as_str(),
            );
        }

        let moves = rebalance(&mut ctx, capacity, config.policy.balance_weight(config), config.max_rebalance_moves)?;

        get_overloaded_drivers(&ctx, capacity).into_iter().for_each(|driver| {
            self.environment.log(
                format!(
                    "driver '{}' keeps {} deliveries over capacity {}: no other driver has room",
                    drivers[driver].name(),
                    ctx.load(driver),
                    capacity
                )
                .as_str(),
            );
        });

        let repinned = reapply_pins(&mut ctx);
        if repinned > 0 {
            self.environment.log(format!("{repinned} pinned deliveries were moved back to their drivers").as_str());
        }

        self.environment.log(
            format!(
                "assigned {} deliveries to {} drivers: {} pinned, {} clusters, {} rebalance moves",
                ctx.assigned_count(),
                drivers.len(),
                pinned,
                result.clusters,
                moves
            )
            .as_str(),
        );

        Ok((ctx.buckets, result.dropped))
    }
}

/// Assigns deliveries to drivers using given configuration and a default environment.
pub fn assign(
    deliveries: Vec<Delivery>,
    drivers: Vec<Driver>,
    config: &AssignmentConfig,
) -> Result<Vec<Driver>, AssignmentError> {
    AssignmentEngine::new(config.clone()).run(deliveries, drivers).map(|assignment| assignment.drivers)
}

fn check_capacity(deliveries: usize, drivers: usize, capacity: usize) -> Result<(), AssignmentError> {
    let total = drivers.saturating_mul(capacity);

    if deliveries > total {
        Err(AssignmentError::CapacityExceeded { deliveries, drivers, capacity, total })
    } else {
        Ok(())
    }
}

fn materialize(
    deliveries: Vec<Delivery>,
    mut drivers: Vec<Driver>,
    buckets: Vec<Vec<usize>>,
    dropped: Vec<usize>,
) -> Assignment {
    let mut deliveries = deliveries.into_iter().map(Some).collect::<Vec<_>>();

    for (driver, bucket) in drivers.iter_mut().zip(buckets) {
        bucket.into_iter().filter_map(|delivery| deliveries[delivery].take()).for_each(|delivery| {
            driver.add_delivery(delivery);
        });
    }

    let unassigned = dropped.into_iter().filter_map(|delivery| deliveries[delivery].take()).collect();

    Assignment { drivers, unassigned }
}
