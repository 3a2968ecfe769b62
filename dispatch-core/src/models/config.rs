#[cfg(test)]
#[path = "../../tests/unit/models/config_test.rs"]
mod config_test;

use crate::utils::Float;

/// Default maximum amount of deliveries per driver.
pub const DEFAULT_CAPACITY_PER_DRIVER: usize = 14;
/// Default ratio of clusters to drivers.
pub const DEFAULT_CLUSTER_MULTIPLIER: Float = 1.5;
/// Default penalty factor for already loaded drivers.
pub const DEFAULT_BALANCE_WEIGHT: Float = 0.08;
/// Default seed used to initialize clustering.
pub const DEFAULT_RANDOM_SEED: u64 = 42;
/// Default limit of clustering iterations.
pub const DEFAULT_MAX_CLUSTER_ITERATIONS: usize = 200;
/// Default limit of single delivery moves done by rebalancing.
pub const DEFAULT_MAX_REBALANCE_MOVES: usize = 10_000;

/// Specifies how free deliveries are grouped and mapped to drivers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssignmentPolicy {
    /// Deliveries are split into `ceil(cluster_multiplier * drivers)` clusters; a driver can take
    /// many clusters, candidates are scored by distance weighted with their current load.
    #[default]
    BalancedClusters,
    /// Deliveries are split into as many clusters as there are drivers; each cluster goes to the
    /// nearest driver without a cluster.
    ExclusiveClusters,
    /// No clustering: each delivery goes to the nearest driver.
    NearestDriver,
}

impl AssignmentPolicy {
    /// Returns a weight of the load penalty used to score drivers.
    pub fn balance_weight(&self, config: &AssignmentConfig) -> Float {
        match self {
            Self::BalancedClusters => config.balance_weight,
            Self::ExclusiveClusters | Self::NearestDriver => 0.,
        }
    }

    /// Returns amount of clusters to create for given amount of drivers and free deliveries or
    /// `None` if the policy does not use clustering. For exclusive clusters, `drivers` is expected
    /// to count only drivers with known location.
    pub fn cluster_count(&self, config: &AssignmentConfig, drivers: usize, deliveries: usize) -> Option<usize> {
        match self {
            Self::BalancedClusters => {
                let desired = (config.cluster_multiplier * drivers as Float).ceil() as usize;
                Some(desired.min(deliveries).max(1))
            }
            Self::ExclusiveClusters => Some(drivers.min(deliveries).max(1)),
            Self::NearestDriver => None,
        }
    }
}

/// An assignment configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentConfig {
    /// Maximum amount of deliveries per driver. Pinned deliveries can exceed it.
    pub capacity_per_driver: usize,
    /// A ratio of clusters to drivers used by the balanced policy.
    pub cluster_multiplier: Float,
    /// A penalty factor for already loaded drivers: distance is multiplied by `1 + weight * load`.
    pub balance_weight: Float,
    /// A seed of the random generator used by clustering.
    pub random_seed: u64,
    /// An assignment policy.
    pub policy: AssignmentPolicy,
    /// Maximum amount of clustering iterations.
    pub max_cluster_iterations: usize,
    /// Maximum amount of moves done by rebalancing before it is considered as not converging.
    pub max_rebalance_moves: usize,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            capacity_per_driver: DEFAULT_CAPACITY_PER_DRIVER,
            cluster_multiplier: DEFAULT_CLUSTER_MULTIPLIER,
            balance_weight: DEFAULT_BALANCE_WEIGHT,
            random_seed: DEFAULT_RANDOM_SEED,
            policy: AssignmentPolicy::default(),
            max_cluster_iterations: DEFAULT_MAX_CLUSTER_ITERATIONS,
            max_rebalance_moves: DEFAULT_MAX_REBALANCE_MOVES,
        }
    }
}

impl AssignmentConfig {
    /// Checks that configuration values are usable, returns a reason otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.capacity_per_driver == 0 {
            return Err("capacity per driver must be positive".to_string());
        }

        if !self.cluster_multiplier.is_finite() || self.cluster_multiplier <= 0. {
            return Err(format!("cluster multiplier must be positive, got '{}'", self.cluster_multiplier));
        }

        if !self.balance_weight.is_finite() || self.balance_weight < 0. {
            return Err(format!("balance weight must be non-negative, got '{}'", self.balance_weight));
        }

        if self.max_cluster_iterations == 0 {
            return Err("max cluster iterations must be positive".to_string());
        }

        Ok(())
    }
}
