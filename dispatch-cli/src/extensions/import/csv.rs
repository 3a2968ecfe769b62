//! Import from a roster csv format logic.

#[cfg(test)]
#[path = "../../../tests/unit/extensions/import/csv_test.rs"]
mod csv_test;

use super::{Roster, RosterEntry};
use dispatch_core::prelude::GenericError;
use serde::Deserialize;
use std::io::{BufReader, Read};

/// A value in the `driver` column which marks a driver row.
const DRIVER_MARKER: &str = "driver";

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    driver: String,
    #[serde(default)]
    ignore: String,
    #[serde(default)]
    apt: Option<String>,
    #[serde(default, alias = "assignTo")]
    assign_to: Option<String>,
}

impl CsvRow {
    fn is_driver(&self) -> bool {
        self.driver.to_lowercase().contains(DRIVER_MARKER)
    }
}

/// Reads a roster from csv with a header row. Rows with blank name or any value in `ignore` column
/// are skipped. Fails when the roster contains no driver.
pub fn read_roster<R: Read>(reader: BufReader<R>) -> Result<Roster, GenericError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).flexible(true).from_reader(reader);
    let mut roster = Roster::default();

    for (idx, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(|err| format!("cannot read roster row {}: '{err}'", idx + 1))?;

        if row.name.is_empty() || !row.ignore.is_empty() {
            continue;
        }

        let is_driver = row.is_driver();
        let entry = RosterEntry {
            name: row.name,
            address: row.address,
            apt: non_blank(row.apt),
            assign_to: non_blank(row.assign_to),
        };

        if is_driver {
            roster.drivers.push(entry);
        } else {
            roster.deliveries.push(entry);
        }
    }

    if roster.drivers.is_empty() {
        return Err("roster must contain at least one driver (driver column contains 'Driver')".into());
    }

    Ok(roster)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}
