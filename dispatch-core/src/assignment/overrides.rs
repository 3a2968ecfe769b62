//! Resolves deliveries pinned to a named driver.
//!
//! A pin matches a driver when both names are equal after trimming and lowercasing; when several
//! drivers share a name, the first one in input order wins. Pins which match no driver are ignored
//! and such deliveries are assigned as any other free delivery.

#[cfg(test)]
#[path = "../../tests/unit/assignment/overrides_test.rs"]
mod overrides_test;

use super::context::AssignmentContext;
use crate::models::{Delivery, Driver};
use rustc_hash::FxHashMap;

/// Normalizes a driver name for comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Returns for each delivery an index of the driver it is pinned to, if the pin matches any driver.
pub fn resolve_pins(deliveries: &[Delivery], drivers: &[Driver]) -> Vec<Option<usize>> {
    let index = create_name_index(drivers);

    deliveries.iter().map(|delivery| delivery.pin().and_then(|pin| index.get(&normalize_name(pin)).copied())).collect()
}

/// Returns deliveries which have a pin not matching any driver name. Such pins are silently ignored
/// by the assignment, so callers can use this function to report them.
pub fn find_unmatched_pins<'a>(deliveries: &'a [Delivery], drivers: &[Driver]) -> Vec<&'a Delivery> {
    deliveries
        .iter()
        .zip(resolve_pins(deliveries, drivers))
        .filter(|(delivery, pin)| delivery.pin().is_some() && pin.is_none())
        .map(|(delivery, _)| delivery)
        .collect()
}

fn create_name_index(drivers: &[Driver]) -> FxHashMap<String, usize> {
    drivers.iter().enumerate().fold(FxHashMap::default(), |mut index, (idx, driver)| {
        index.entry(normalize_name(driver.name())).or_insert(idx);
        index
    })
}

/// Appends pinned deliveries to their drivers' buckets in input order.
pub(crate) fn route_pinned_deliveries(ctx: &mut AssignmentContext) {
    for (delivery, pin) in ctx.pins.iter().enumerate() {
        if let Some(driver) = pin {
            ctx.buckets[*driver].push(delivery);
        }
    }
}

/// Moves every pinned delivery which is found in a wrong bucket to its driver, ignoring capacity.
/// Returns the amount of moved deliveries.
pub(crate) fn reapply_pins(ctx: &mut AssignmentContext) -> usize {
    let pins = &ctx.pins;
    let mut misplaced = Vec::new();

    for (driver, bucket) in ctx.buckets.iter_mut().enumerate() {
        bucket.retain(|&delivery| match pins[delivery] {
            Some(pinned) if pinned != driver => {
                misplaced.push((pinned, delivery));
                false
            }
            _ => true,
        });
    }

    let moved = misplaced.len();
    misplaced.into_iter().for_each(|(driver, delivery)| ctx.buckets[driver].push(delivery));

    moved
}
