//! Enforces driver capacity by moving single deliveries from overloaded drivers to drivers with room.

#[cfg(test)]
#[path = "../../tests/unit/assignment/rebalance_test.rs"]
mod rebalance_test;

use super::AssignmentError;
use super::clusters::select_driver;
use super::context::AssignmentContext;
use crate::utils::Float;

/// A single delivery move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Move {
    pub donor: usize,
    /// Position of the delivery within donor's bucket.
    pub position: usize,
    pub recipient: usize,
}

/// Moves deliveries until no driver with known location exceeds the capacity or no move is possible.
///
/// Each move takes the donor's movable delivery which is the farthest from the donor and gives it
/// to the recipient with the lowest balance score, after that the scan restarts from the first
/// driver. As every move decreases the total excess over capacity by one and never pushes the
/// recipient over capacity, the loop ends after at most that many moves; `max_moves` still guards
/// against endless looping. Returns the amount of done moves.
pub(crate) fn rebalance(
    ctx: &mut AssignmentContext,
    capacity: usize,
    balance_weight: Float,
    max_moves: usize,
) -> Result<usize, AssignmentError> {
    let mut moves = 0;

    while let Some(Move { donor, position, recipient }) = find_move(ctx, capacity, balance_weight) {
        if moves >= max_moves {
            return Err(AssignmentError::RebalanceDidNotConverge { moves });
        }

        let delivery = ctx.buckets[donor].remove(position);
        ctx.buckets[recipient].push(delivery);
        moves += 1;
    }

    Ok(moves)
}

/// Finds the next move scanning drivers in input order.
pub(crate) fn find_move(ctx: &AssignmentContext, capacity: usize, balance_weight: Float) -> Option<Move> {
    (0..ctx.drivers.len()).filter(|&donor| ctx.load(donor) > capacity).find_map(|donor| {
        let position = find_farthest_movable(ctx, donor)?;
        let delivery = ctx.buckets[donor][position];

        let recipient = select_driver(ctx, ctx.delivery_location(delivery), balance_weight, |driver| {
            driver != donor && ctx.load(driver) < capacity
        })?;

        Some(Move { donor, position, recipient })
    })
}

/// Returns position of the non-pinned delivery which is the farthest from the donor, first one on
/// ties. Returns `None` if the donor has no location or no movable delivery.
fn find_farthest_movable(ctx: &AssignmentContext, donor: usize) -> Option<usize> {
    let donor_location = ctx.driver_location(donor)?;

    ctx.buckets[donor]
        .iter()
        .enumerate()
        .filter(|(_, delivery)| !ctx.is_pinned(**delivery))
        .map(|(position, &delivery)| (position, ctx.delivery_location(delivery).distance_to_point(donor_location)))
        .fold(None, |farthest: Option<(usize, Float)>, (position, distance)| match farthest {
            Some((_, max_distance)) if max_distance >= distance => farthest,
            _ => Some((position, distance)),
        })
        .map(|(position, _)| position)
}

/// Returns drivers with known location which stay over capacity because of movable deliveries.
pub(crate) fn get_overloaded_drivers(ctx: &AssignmentContext, capacity: usize) -> Vec<usize> {
    (0..ctx.drivers.len())
        .filter(|&driver| ctx.driver_location(driver).is_some() && ctx.load(driver) > capacity)
        .filter(|&driver| ctx.buckets[driver].iter().any(|&delivery| !ctx.is_pinned(delivery)))
        .collect()
}
