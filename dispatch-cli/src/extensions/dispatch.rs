//! Runs the whole flow for a roster: import, geocoding, assignment and reports.

use crate::extensions::geocode::{Geocoder, resolve_roster};
use crate::extensions::import::read_roster;
use crate::extensions::report::write_reports;
use dispatch_core::assignment::find_unmatched_pins;
use dispatch_core::prelude::*;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// A result of a dispatch run.
#[derive(Clone, Debug)]
pub struct DispatchOutcome {
    /// Drivers with their deliveries and deliveries which no driver could take.
    pub assignment: Assignment,
    /// Addresses which were not resolved.
    pub unresolved: Vec<String>,
    /// Written report files.
    pub files: Vec<PathBuf>,
}

/// Reads the roster, resolves addresses, assigns deliveries and writes reports into `out_dir`.
pub fn dispatch_roster<R: Read>(
    reader: BufReader<R>,
    geocoder: &dyn Geocoder,
    config: AssignmentConfig,
    out_dir: &Path,
) -> GenericResult<DispatchOutcome> {
    let roster = read_roster(reader)?;
    info!("roster has {} drivers and {} deliveries", roster.drivers.len(), roster.deliveries.len());

    let resolved = resolve_roster(&roster, geocoder);
    if !resolved.unresolved.is_empty() {
        warn!("{} addresses could not be resolved", resolved.unresolved.len());
    }

    find_unmatched_pins(resolved.deliveries.as_slice(), resolved.drivers.as_slice()).into_iter().for_each(|delivery| {
        warn!(
            "delivery '{}' at '{}' is assigned to unknown driver '{}', it is handled as a free one",
            delivery.name(),
            delivery.address(),
            delivery.pin().unwrap_or_default()
        );
    });

    let environment = Environment::new(Arc::new(|msg: &str| info!("{msg}")));
    let assignment = AssignmentEngine::new(config)
        .with_environment(environment)
        .run(resolved.deliveries, resolved.drivers)
        .map_err(|err| GenericError::with_context("cannot assign deliveries", err))?;

    let files =
        write_reports(out_dir, assignment.drivers.as_slice(), resolved.unresolved.as_slice(), assignment.unassigned.as_slice())?;

    Ok(DispatchOutcome { assignment, unresolved: resolved.unresolved, files })
}
