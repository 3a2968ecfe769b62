#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::algorithms::geometry::Point;
use crate::utils::Float;

/// Represents a delivery stop with already resolved coordinates. Once created, it is not changed.
#[derive(Clone, Debug, PartialEq)]
pub struct Delivery {
    id: String,
    location: Point,
    address: String,
    name: String,
    apt: Option<String>,
    assign_to: Option<String>,
}

impl Delivery {
    /// Creates a new instance of `Delivery`.
    pub fn new(id: &str, latitude: Float, longitude: Float, address: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            location: Point::new(latitude, longitude),
            address: address.to_string(),
            name: name.to_string(),
            apt: None,
            assign_to: None,
        }
    }

    /// Sets an apartment or unit which is used only for display.
    pub fn with_apt(mut self, apt: &str) -> Self {
        self.apt = Some(apt.to_string());
        self
    }

    /// Pins the delivery to a driver with given name.
    pub fn with_pin(mut self, driver_name: &str) -> Self {
        self.assign_to = Some(driver_name.to_string());
        self
    }

    /// Returns delivery id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns latitude.
    pub fn latitude(&self) -> Float {
        self.location.x
    }

    /// Returns longitude.
    pub fn longitude(&self) -> Float {
        self.location.y
    }

    /// Returns location as a 2D point.
    pub fn location(&self) -> &Point {
        &self.location
    }

    /// Returns the address used for geocoding.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns recipient name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns apartment or unit, if specified.
    pub fn apt(&self) -> Option<&str> {
        self.apt.as_deref()
    }

    /// Returns the name of the driver this delivery is pinned to. Blank pins are ignored.
    pub fn pin(&self) -> Option<&str> {
        self.assign_to.as_deref().map(str::trim).filter(|pin| !pin.is_empty())
    }

    /// Returns the address for display, including apartment when present.
    pub fn address_for_display(&self) -> String {
        match self.apt().map(str::trim).filter(|apt| !apt.is_empty()) {
            Some(apt) => format!("{} {apt}", self.address),
            None => self.address.clone(),
        }
    }

    /// Returns the first word of recipient name without commas or `None` if the name is blank.
    pub fn display_name(&self) -> Option<String> {
        self.name.split_whitespace().next().map(|word| word.replace(',', "")).filter(|word| !word.is_empty())
    }
}

/// Represents a driver who receives a bucket of deliveries.
#[derive(Clone, Debug, PartialEq)]
pub struct Driver {
    id: String,
    name: String,
    address: Option<String>,
    location: Option<Point>,
    deliveries: Vec<Delivery>,
}

impl Driver {
    /// Creates a new instance of `Driver` without known location.
    pub fn new(id: &str, name: &str) -> Self {
        Self { id: id.to_string(), name: name.to_string(), address: None, location: None, deliveries: Vec::new() }
    }

    /// Sets driver's home address.
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    /// Sets driver's home coordinates.
    pub fn with_location(mut self, latitude: Float, longitude: Float) -> Self {
        self.location = Some(Point::new(latitude, longitude));
        self
    }

    /// Returns driver id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns driver name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns driver's home address, if known.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Returns driver's home coordinates, if they were resolved.
    pub fn location(&self) -> Option<&Point> {
        self.location.as_ref()
    }

    /// Returns true if driver's coordinates are known.
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// Returns assigned deliveries in the order they were added.
    pub fn deliveries(&self) -> &[Delivery] {
        self.deliveries.as_slice()
    }

    pub(crate) fn add_delivery(&mut self, delivery: Delivery) {
        self.deliveries.push(delivery);
    }
}
