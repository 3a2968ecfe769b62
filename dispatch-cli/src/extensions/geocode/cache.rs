#[cfg(test)]
#[path = "../../../tests/unit/extensions/geocode/cache_test.rs"]
mod cache_test;

use super::{Coordinates, GeocodeResult, Geocoder};
use dispatch_core::prelude::{GenericError, GenericResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

type CacheEntries = BTreeMap<String, Option<Coordinates>>;

/// Keeps results of another geocoder in a json file: an address maps either to coordinates or to
/// `null` when it was not found. Failed lookups are not stored, so they are retried next time.
pub struct CachedGeocoder<G: Geocoder> {
    inner: G,
    path: PathBuf,
    entries: RefCell<CacheEntries>,
}

impl<G: Geocoder> CachedGeocoder<G> {
    /// Creates a new instance of `CachedGeocoder` loading entries from the file, if it exists.
    pub fn new(inner: G, path: &Path) -> GenericResult<Self> {
        let entries = if path.exists() {
            let file = File::open(path).map_err(|err| GenericError::with_context(path.display(), err))?;
            serde_json::from_reader(BufReader::new(file))
                .map_err(|err| GenericError::with_context(format!("cannot read geocoder cache '{}'", path.display()), err))?
        } else {
            CacheEntries::default()
        };

        Ok(Self { inner, path: path.to_path_buf(), entries: RefCell::new(entries) })
    }

    /// Returns amount of cached addresses.
    pub fn size(&self) -> usize {
        self.entries.borrow().len()
    }

    fn save(&self) -> GenericResult<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut writer = BufWriter::new(File::create(self.path.as_path())?);
        serde_json::to_writer_pretty(&mut writer, &*self.entries.borrow())
            .map_err(|err| GenericError::with_context(self.path.display(), err))?;

        writer.flush().map_err(GenericError::from)
    }
}

impl<G: Geocoder> Geocoder for CachedGeocoder<G> {
    fn geocode(&self, address: &str) -> GenericResult<GeocodeResult> {
        if let Some(coordinates) = self.entries.borrow().get(address) {
            return Ok(GeocodeResult { coordinates: *coordinates, from_cache: true });
        }

        let result = self.inner.geocode(address)?;
        self.entries.borrow_mut().insert(address.to_string(), result.coordinates);

        if let Err(err) = self.save() {
            warn!("cannot save geocoder cache '{}': {err}", self.path.display());
        }

        Ok(result)
    }
}
