//! Groups free deliveries and maps the groups to drivers.

#[cfg(test)]
#[path = "../../tests/unit/assignment/clusters_test.rs"]
mod clusters_test;

use super::context::AssignmentContext;
use crate::algorithms::clustering::{Cluster, create_kmeans};
use crate::algorithms::geometry::Point;
use crate::models::{AssignmentConfig, AssignmentPolicy};
use crate::utils::{Float, Random, compare_floats};

/// Describes how free deliveries were distributed between drivers.
pub(crate) struct ClusterAssignment {
    /// Amount of created clusters.
    pub clusters: usize,
    /// Deliveries which no driver could take.
    pub dropped: Vec<usize>,
}

/// Returns a score of a driver candidate: distance penalized by the load already assigned to it.
pub(crate) fn get_balance_score(distance: Float, load: usize, balance_weight: Float) -> Float {
    distance * (1. + balance_weight * load as Float)
}

/// Groups free deliveries according to the policy and appends each group to the bucket of the
/// selected driver. Clusters are processed in their enumeration order and every assignment
/// changes the load seen by the next one.
pub(crate) fn assign_free_deliveries(
    ctx: &mut AssignmentContext,
    free: &[usize],
    config: &AssignmentConfig,
    random: &dyn Random,
) -> ClusterAssignment {
    let clusters = create_clusters(ctx, free, config, random);
    let balance_weight = config.policy.balance_weight(config);
    let is_exclusive = config.policy == AssignmentPolicy::ExclusiveClusters;

    let mut taken = vec![false; ctx.drivers.len()];
    let mut dropped = Vec::new();

    for cluster in clusters.iter() {
        let driver = if is_exclusive {
            select_driver(ctx, &cluster.centroid, 0., |driver| !taken[driver])
        } else {
            select_driver(ctx, &cluster.centroid, balance_weight, |_| true)
        };

        match driver {
            Some(driver) => {
                taken[driver] = true;
                ctx.buckets[driver].extend(cluster.members.iter().copied());
            }
            None => dropped.extend(cluster.members.iter().copied()),
        }
    }

    ClusterAssignment { clusters: clusters.len(), dropped }
}

/// Creates clusters with members referring to delivery indices.
fn create_clusters(
    ctx: &AssignmentContext,
    free: &[usize],
    config: &AssignmentConfig,
    random: &dyn Random,
) -> Vec<Cluster> {
    if free.is_empty() {
        return Vec::default();
    }

    // an exclusive cluster needs its own driver with known location
    let drivers = match config.policy {
        AssignmentPolicy::ExclusiveClusters => ctx.located_drivers_count(),
        _ => ctx.drivers.len(),
    };

    match config.policy.cluster_count(config, drivers, free.len()) {
        Some(k) => {
            let points = free.iter().map(|&delivery| *ctx.delivery_location(delivery)).collect::<Vec<_>>();

            create_kmeans(points.as_slice(), k, config.max_cluster_iterations, random)
                .into_iter()
                .map(|cluster| Cluster {
                    centroid: cluster.centroid,
                    members: cluster.members.into_iter().map(|index| free[index]).collect(),
                })
                .collect()
        }
        None => free
            .iter()
            .map(|&delivery| Cluster { centroid: *ctx.delivery_location(delivery), members: vec![delivery] })
            .collect(),
    }
}

/// Selects a driver with known location and minimum balance score among accepted ones. Ties are
/// resolved in favor of the driver which comes first in the input.
pub(crate) fn select_driver<F>(ctx: &AssignmentContext, target: &Point, balance_weight: Float, accept: F) -> Option<usize>
where
    F: Fn(usize) -> bool,
{
    (0..ctx.drivers.len())
        .filter(|&driver| accept(driver))
        .filter_map(|driver| {
            ctx.driver_location(driver).map(|location| {
                (driver, get_balance_score(target.distance_to_point(location), ctx.load(driver), balance_weight))
            })
        })
        .min_by(|(_, a), (_, b)| compare_floats(*a, *b))
        .map(|(driver, _)| driver)
}
