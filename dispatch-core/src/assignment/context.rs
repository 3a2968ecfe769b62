use super::overrides::resolve_pins;
use crate::algorithms::geometry::Point;
use crate::models::{Delivery, Driver};

/// Keeps intermediate assignment state: driver buckets hold indices of deliveries, so that deliveries
/// are moved around only once the assignment is final.
pub(crate) struct AssignmentContext<'a> {
    pub deliveries: &'a [Delivery],
    pub drivers: &'a [Driver],
    /// Index of the driver each delivery is pinned to, if the pin matches a driver.
    pub pins: Vec<Option<usize>>,
    /// Delivery indices per driver, in append order.
    pub buckets: Vec<Vec<usize>>,
}

impl<'a> AssignmentContext<'a> {
    pub fn new(deliveries: &'a [Delivery], drivers: &'a [Driver]) -> Self {
        Self { deliveries, drivers, pins: resolve_pins(deliveries, drivers), buckets: vec![Vec::new(); drivers.len()] }
    }

    pub fn is_pinned(&self, delivery: usize) -> bool {
        self.pins[delivery].is_some()
    }

    /// Returns indices of deliveries which are not pinned to any existing driver.
    pub fn free_deliveries(&self) -> Vec<usize> {
        (0..self.deliveries.len()).filter(|&delivery| !self.is_pinned(delivery)).collect()
    }

    pub fn delivery_location(&self, delivery: usize) -> &Point {
        self.deliveries[delivery].location()
    }

    pub fn driver_location(&self, driver: usize) -> Option<&Point> {
        self.drivers[driver].location()
    }

    pub fn located_drivers_count(&self) -> usize {
        self.drivers.iter().filter(|driver| driver.has_location()).count()
    }

    pub fn load(&self, driver: usize) -> usize {
        self.buckets[driver].len()
    }

    pub fn assigned_count(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.len()).sum()
    }
}
