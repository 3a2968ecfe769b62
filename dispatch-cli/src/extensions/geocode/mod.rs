//! Resolves roster addresses to coordinates.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/geocode/geocode_test.rs"]
mod geocode_test;

mod cache;
pub use self::cache::CachedGeocoder;

mod nominatim;
pub use self::nominatim::{NominatimGeocoder, NominatimSettings};

use crate::extensions::import::{Roster, RosterEntry};
use dispatch_core::prelude::{Delivery, Driver, GenericResult};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Geographic coordinates in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Coordinates {
    /// Creates a new instance of `Coordinates`.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A result of a single address lookup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeocodeResult {
    /// Coordinates if the address was found.
    pub coordinates: Option<Coordinates>,
    /// True if no network request was done to get the result.
    pub from_cache: bool,
}

/// Resolves an address to coordinates. Not finding an address is not an error: the result then
/// has no coordinates. Errors are reserved for failures of the lookup itself.
pub trait Geocoder {
    /// Looks up the address.
    fn geocode(&self, address: &str) -> GenericResult<GeocodeResult>;
}

/// A geocoder with predefined coordinates: unknown addresses are not found.
#[derive(Clone, Debug, Default)]
pub struct StaticGeocoder {
    entries: FxHashMap<String, Coordinates>,
}

impl StaticGeocoder {
    /// Creates a new instance of `StaticGeocoder` from address and coordinates pairs.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Coordinates)>,
    {
        Self { entries: entries.into_iter().collect() }
    }
}

impl Geocoder for StaticGeocoder {
    fn geocode(&self, address: &str) -> GenericResult<GeocodeResult> {
        Ok(GeocodeResult { coordinates: self.entries.get(address).copied(), from_cache: true })
    }
}

/// A geocoder which never goes to network: used behind a cache for offline runs, so that addresses
/// missing in the cache fail without being cached as not found.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    fn geocode(&self, address: &str) -> GenericResult<GeocodeResult> {
        Err(format!("address '{address}' is not in cache and network lookups are disabled").into())
    }
}

/// A roster with resolved coordinates.
#[derive(Clone, Debug, Default)]
pub struct ResolvedRoster {
    /// Drivers in roster order, with coordinates when their address was resolved.
    pub drivers: Vec<Driver>,
    /// Deliveries which address was resolved.
    pub deliveries: Vec<Delivery>,
    /// Entries in `<name> | <address> (driver|delivery)` form for each address which was not resolved.
    pub unresolved: Vec<String>,
}

/// Resolves addresses of all roster entries. Lookup failures are logged and handled as addresses
/// which were not found.
pub fn resolve_roster(roster: &Roster, geocoder: &dyn Geocoder) -> ResolvedRoster {
    let mut resolved = ResolvedRoster::default();

    for (idx, entry) in roster.drivers.iter().enumerate() {
        let driver = Driver::new(format!("DRV{}", idx + 1).as_str(), entry.name.as_str());

        let driver = if entry.address.is_empty() {
            driver
        } else {
            let driver = driver.with_address(entry.address.as_str());
            match lookup(geocoder, entry) {
                Some(coordinates) => driver.with_location(coordinates.latitude, coordinates.longitude),
                None => {
                    resolved.unresolved.push(format_unresolved(entry, "driver"));
                    driver
                }
            }
        };

        resolved.drivers.push(driver);
    }

    for (idx, entry) in roster.deliveries.iter().enumerate() {
        if entry.address.is_empty() {
            continue;
        }

        match lookup(geocoder, entry) {
            Some(coordinates) => resolved.deliveries.push(create_delivery(format!("D{}", idx + 1), entry, coordinates)),
            None => resolved.unresolved.push(format_unresolved(entry, "delivery")),
        }
    }

    resolved
}

fn lookup(geocoder: &dyn Geocoder, entry: &RosterEntry) -> Option<Coordinates> {
    match geocoder.geocode(entry.address.as_str()) {
        Ok(result) => {
            if !result.from_cache {
                debug!(address = entry.address.as_str(), found = result.coordinates.is_some(), "geocoded address");
            }
            result.coordinates
        }
        Err(err) => {
            warn!("cannot geocode '{}': {err}", entry.address);
            None
        }
    }
}

fn create_delivery(id: String, entry: &RosterEntry, coordinates: Coordinates) -> Delivery {
    let delivery =
        Delivery::new(id.as_str(), coordinates.latitude, coordinates.longitude, entry.address.as_str(), entry.name.as_str());
    let delivery = match entry.apt.as_deref() {
        Some(apt) => delivery.with_apt(apt),
        None => delivery,
    };

    match entry.assign_to.as_deref() {
        Some(driver) => delivery.with_pin(driver),
        None => delivery,
    }
}

fn format_unresolved(entry: &RosterEntry, kind: &str) -> String {
    format!("{} | {} ({kind})", entry.name, entry.address)
}
