//! Writes assignment results as plain text files.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/report/report_test.rs"]
mod report_test;

mod route_sheet;
pub use self::route_sheet::format_route_sheet;

mod summary;
pub use self::summary::{format_assignment_summary, format_console_summary};

use dispatch_core::prelude::{Delivery, Driver, GenericError, GenericResult};
use rustc_hash::FxHashSet;
use std::fs;
use std::iter::once;
use std::path::{Path, PathBuf};

/// A name of the file with all drivers and their deliveries.
pub const SUMMARY_FILE_NAME: &str = "driver-assignments.txt";
/// A name of the file with addresses which were not resolved or deliveries which were not assigned.
pub const UNRESOLVED_FILE_NAME: &str = "unresolved-addresses.txt";

/// A name of the file which lists files written by the last run.
pub const MANIFEST_FILE_NAME: &str = ".dispatch-reports";

const REPORT_EXTENSION: &str = "txt";

/// Replaces every character except ascii letters, digits, dots and dashes with underscore.
pub fn sanitize_filename(name: &str) -> String {
    name.chars().map(|ch| if ch.is_ascii_alphanumeric() || ch == '.' || ch == '-' { ch } else { '_' }).collect()
}

/// Formats a report about addresses which were not resolved and deliveries which were not assigned.
/// Returns `None` when there is nothing to report.
pub fn format_unresolved_report(unresolved: &[String], unassigned: &[Delivery]) -> Option<String> {
    let mut sections = Vec::new();

    if !unresolved.is_empty() {
        sections.push(format!("Addresses that could not be geocoded:\n\n{}\n", unresolved.join("\n")));
    }

    if !unassigned.is_empty() {
        let lines = unassigned
            .iter()
            .map(|delivery| format!("{} | {} ({})", delivery.name(), delivery.address_for_display(), delivery.id()))
            .collect::<Vec<_>>();
        sections.push(format!("Deliveries not assigned to any driver (no driver location is known):\n\n{}\n", lines.join("\n")));
    }

    if sections.is_empty() { None } else { Some(sections.join("\n")) }
}

/// Writes route sheets per driver, the assignment summary and, if needed, the unresolved report into
/// the output directory. Files written by the previous run into the same directory are removed
/// first, any other file is left untouched. Returns paths of written files.
pub fn write_reports(
    out_dir: &Path,
    drivers: &[Driver],
    unresolved: &[String],
    unassigned: &[Delivery],
) -> GenericResult<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|err| GenericError::with_context(out_dir.display(), err))?;
    remove_stale_reports(out_dir)?;

    let mut files = drivers
        .iter()
        .zip(get_route_sheet_names(drivers))
        .map(|(driver, name)| write_file(out_dir.join(name), format_route_sheet(driver)))
        .collect::<GenericResult<Vec<_>>>()?;

    files.push(write_file(out_dir.join(SUMMARY_FILE_NAME), format_assignment_summary(drivers))?);

    if let Some(report) = format_unresolved_report(unresolved, unassigned) {
        files.push(write_file(out_dir.join(UNRESOLVED_FILE_NAME), report)?);
    }

    let manifest = files.iter().filter_map(|path| path.file_name()).map(|name| name.to_string_lossy()).collect::<Vec<_>>();
    write_file(out_dir.join(MANIFEST_FILE_NAME), format!("{}\n", manifest.join("\n")))?;

    Ok(files)
}

/// Returns a unique route sheet file name per driver: the sanitized driver name, extended with the
/// driver id when it clashes with another sheet or report (ignoring case).
pub fn get_route_sheet_names(drivers: &[Driver]) -> Vec<String> {
    let mut taken =
        [SUMMARY_FILE_NAME, UNRESOLVED_FILE_NAME].iter().map(|name| name.to_lowercase()).collect::<FxHashSet<_>>();

    drivers
        .iter()
        .map(|driver| {
            let id = sanitize_filename(driver.id());
            let base = Some(sanitize_filename(driver.name())).filter(|name| !name.is_empty()).unwrap_or_else(|| id.clone());

            once(base.clone())
                .chain(once(format!("{base}-{id}")))
                .chain((2_usize..).map(|suffix| format!("{base}-{id}-{suffix}")))
                .map(|stem| format!("{stem}.{REPORT_EXTENSION}"))
                .find(|name| taken.insert(name.to_lowercase()))
                .unwrap_or_default()
        })
        .collect()
}

fn write_file(path: PathBuf, content: String) -> GenericResult<PathBuf> {
    fs::write(path.as_path(), content).map_err(|err| GenericError::with_context(path.display(), err))?;

    Ok(path)
}

/// Removes files listed in the manifest of the previous run. Only plain file names are accepted.
fn remove_stale_reports(out_dir: &Path) -> GenericResult<()> {
    let manifest = out_dir.join(MANIFEST_FILE_NAME);
    if !manifest.is_file() {
        return Ok(());
    }

    let content = fs::read_to_string(manifest.as_path()).map_err(|err| GenericError::with_context(manifest.display(), err))?;

    let errors = content
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty() && Path::new(name).file_name().is_some_and(|file_name| file_name == *name))
        .map(|name| out_dir.join(name))
        .filter(|path| path.is_file())
        .filter_map(|path| fs::remove_file(path.as_path()).err().map(|err| GenericError::with_context(path.display(), err)))
        .collect::<Vec<_>>();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("cannot remove old reports: {}", GenericError::join_many(errors.as_slice(), ", ")).into())
    }
}
