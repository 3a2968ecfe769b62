use super::*;
use crate::extensions::geocode::{OfflineGeocoder, StaticGeocoder};
use std::cell::Cell;

/// Counts lookups and fails for addresses starting with `!`.
struct CountingGeocoder {
    inner: StaticGeocoder,
    calls: Cell<usize>,
}

impl CountingGeocoder {
    fn new() -> Self {
        Self {
            inner: StaticGeocoder::new(vec![("1 Main St".to_string(), Coordinates::new(1., 2.))]),
            calls: Cell::new(0),
        }
    }
}

impl Geocoder for CountingGeocoder {
    fn geocode(&self, address: &str) -> GenericResult<GeocodeResult> {
        self.calls.set(self.calls.get() + 1);

        if address.starts_with('!') {
            return Err("lookup failed".into());
        }

        self.inner.geocode(address).map(|result| GeocodeResult { from_cache: false, ..result })
    }
}

#[test]
fn can_return_cached_result_without_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = CachedGeocoder::new(CountingGeocoder::new(), dir.path().join("cache.json").as_path()).unwrap();

    let first = geocoder.geocode("1 Main St").unwrap();
    let second = geocoder.geocode("1 Main St").unwrap();

    assert_eq!(first, GeocodeResult { coordinates: Some(Coordinates::new(1., 2.)), from_cache: false });
    assert_eq!(second, GeocodeResult { coordinates: Some(Coordinates::new(1., 2.)), from_cache: true });
    assert_eq!(geocoder.inner.calls.get(), 1);
}

#[test]
fn can_cache_not_found_addresses() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = CachedGeocoder::new(CountingGeocoder::new(), dir.path().join("cache.json").as_path()).unwrap();

    geocoder.geocode("Nowhere").unwrap();
    let result = geocoder.geocode("Nowhere").unwrap();

    assert_eq!(result, GeocodeResult { coordinates: None, from_cache: true });
    assert_eq!(geocoder.inner.calls.get(), 1);
}

#[test]
fn can_retry_failed_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let geocoder = CachedGeocoder::new(CountingGeocoder::new(), dir.path().join("cache.json").as_path()).unwrap();

    assert!(geocoder.geocode("!broken").is_err());
    assert!(geocoder.geocode("!broken").is_err());

    assert_eq!(geocoder.inner.calls.get(), 2);
    assert_eq!(geocoder.size(), 0);
}

#[test]
fn can_persist_entries_between_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache.json");

    {
        let geocoder = CachedGeocoder::new(CountingGeocoder::new(), path.as_path()).unwrap();
        geocoder.geocode("1 Main St").unwrap();
        geocoder.geocode("Nowhere").unwrap();
    }

    let geocoder = CachedGeocoder::new(OfflineGeocoder, path.as_path()).unwrap();

    assert_eq!(geocoder.size(), 2);
    assert_eq!(geocoder.geocode("1 Main St").unwrap().coordinates, Some(Coordinates::new(1., 2.)));
    assert_eq!(geocoder.geocode("Nowhere").unwrap().coordinates, None);
    assert!(geocoder.geocode("2 Main St").is_err());
}

#[test]
fn can_fail_on_malformed_cache_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "not a json").unwrap();

    let result = CachedGeocoder::new(OfflineGeocoder, file.path());

    assert!(result.is_err());
}
