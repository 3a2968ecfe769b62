//! A geocoder backed by an OpenStreetMap Nominatim compatible search service.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/geocode/nominatim_test.rs"]
mod nominatim_test;

use super::{Coordinates, GeocodeResult, Geocoder};
use dispatch_core::prelude::{GenericError, GenericResult};
use serde::Deserialize;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

/// Default service url.
pub const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
/// Default value of `User-Agent` header: the public service rejects anonymous clients.
pub const DEFAULT_USER_AGENT: &str = "dispatch/0.1 (delivery assignment tool)";
/// Default minimum interval between two requests in milliseconds.
pub const DEFAULT_MIN_REQUEST_INTERVAL_MS: u64 = 1100;
/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Specifies how the service is accessed.
#[derive(Clone, Debug, PartialEq)]
pub struct NominatimSettings {
    /// Service url without the `search` path.
    pub base_url: String,
    /// A value of `User-Agent` header.
    pub user_agent: String,
    /// A minimum interval between two requests.
    pub min_request_interval: Duration,
    /// A request timeout.
    pub timeout: Duration,
}

impl Default for NominatimSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_request_interval: Duration::from_millis(DEFAULT_MIN_REQUEST_INTERVAL_MS),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Sends one blocking search request per address, never more often than the configured interval.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    search_url: String,
    min_request_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl NominatimGeocoder {
    /// Creates a new instance of `NominatimGeocoder`.
    pub fn new(settings: &NominatimSettings) -> GenericResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .timeout(settings.timeout)
            .build()
            .map_err(|err| GenericError::with_context("cannot create http client", err))?;

        Ok(Self {
            client,
            search_url: get_search_url(settings.base_url.as_str()),
            min_request_interval: settings.min_request_interval,
            last_request: Mutex::new(None),
        })
    }

    fn wait_for_turn(&self) {
        let mut last_request = self.last_request.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(elapsed) = last_request.map(|last| last.elapsed()) {
            if elapsed < self.min_request_interval {
                thread::sleep(self.min_request_interval - elapsed);
            }
        }

        *last_request = Some(Instant::now());
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> GenericResult<GeocodeResult> {
        self.wait_for_turn();

        let body = self
            .client
            .get(self.search_url.as_str())
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|err| GenericError::with_context(format!("search request for '{address}' failed"), err))?;

        let coordinates = parse_search_response(body.as_str())?;

        Ok(GeocodeResult { coordinates, from_cache: false })
    }
}

#[derive(Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn get_search_url(base_url: &str) -> String {
    format!("{}/search", base_url.trim_end_matches('/'))
}

/// Returns coordinates of the first place in the response or `None` when nothing was found.
fn parse_search_response(body: &str) -> GenericResult<Option<Coordinates>> {
    let places: Vec<Place> =
        serde_json::from_str(body).map_err(|err| GenericError::with_context("cannot parse search response", err))?;

    places
        .first()
        .map(|place| -> GenericResult<Coordinates> {
            let latitude = place.lat.trim().parse::<f64>();
            let longitude = place.lon.trim().parse::<f64>();

            match (latitude, longitude) {
                (Ok(latitude), Ok(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                    Ok(Coordinates::new(latitude, longitude))
                }
                _ => Err(format!("malformed coordinates in search response: '{}', '{}'", place.lat, place.lon).into()),
            }
        })
        .transpose()
}
