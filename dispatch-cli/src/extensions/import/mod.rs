//! Import helpers.

mod csv;
pub use self::csv::*;

/// A roster row which passed filtering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RosterEntry {
    /// Person name.
    pub name: String,
    /// Address, possibly blank.
    pub address: String,
    /// Apartment or unit used for display.
    pub apt: Option<String>,
    /// Name of the driver the delivery is pinned to.
    pub assign_to: Option<String>,
}

/// A roster split into drivers and deliveries, both in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    /// Driver rows.
    pub drivers: Vec<RosterEntry>,
    /// Delivery rows.
    pub deliveries: Vec<RosterEntry>,
}
