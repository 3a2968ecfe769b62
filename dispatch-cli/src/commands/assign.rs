#[cfg(test)]
#[path = "../../tests/unit/commands/assign_test.rs"]
mod assign_test;

use super::*;
use clap::{Arg, ArgAction, Command};
use dispatch_cli::extensions::config::{AssignmentSettings, Config, PolicyType, read_config};
use dispatch_cli::extensions::dispatch::{DispatchOutcome, dispatch_roster};
use dispatch_cli::extensions::geocode::{CachedGeocoder, NominatimGeocoder, OfflineGeocoder};
use dispatch_cli::extensions::report::format_console_summary;
use std::path::Path;
use tracing::info;

pub const ROSTER_ARG_NAME: &str = "ROSTER";
pub const CONFIG_ARG_NAME: &str = "config";
pub const CAPACITY_ARG_NAME: &str = "capacity";
pub const MULTIPLIER_ARG_NAME: &str = "multiplier";
pub const BALANCE_WEIGHT_ARG_NAME: &str = "balance-weight";
pub const SEED_ARG_NAME: &str = "seed";
pub const POLICY_ARG_NAME: &str = "policy";
pub const OUT_DIR_ARG_NAME: &str = "out-dir";
pub const CACHE_FILE_ARG_NAME: &str = "cache-file";
pub const GEOCODER_URL_ARG_NAME: &str = "geocoder-url";
pub const OFFLINE_ARG_NAME: &str = "offline";

pub fn get_assign_app() -> Command {
    Command::new("assign")
        .about("Assigns deliveries from a roster csv file to drivers and writes route sheets")
        .arg(Arg::new(ROSTER_ARG_NAME).help("Sets the roster csv file").required(true).index(1))
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to a json configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(CAPACITY_ARG_NAME)
                .help("Maximum amount of deliveries per driver, pinned deliveries can exceed it")
                .long(CAPACITY_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(MULTIPLIER_ARG_NAME)
                .help("A ratio of clusters to drivers used by the balanced policy")
                .long(MULTIPLIER_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(BALANCE_WEIGHT_ARG_NAME)
                .help("A penalty factor for already loaded drivers")
                .long(BALANCE_WEIGHT_ARG_NAME)
                .required(false),
        )
        .arg(Arg::new(SEED_ARG_NAME).help("A random seed used by clustering").long(SEED_ARG_NAME).required(false))
        .arg(
            Arg::new(POLICY_ARG_NAME)
                .help("Specifies how deliveries are grouped and mapped to drivers")
                .short('p')
                .long(POLICY_ARG_NAME)
                .required(false)
                .value_parser(["balanced", "exclusive", "nearest"]),
        )
        .arg(
            Arg::new(OUT_DIR_ARG_NAME)
                .help("Specifies directory for route sheets and reports")
                .short('o')
                .long(OUT_DIR_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(CACHE_FILE_ARG_NAME)
                .help("Specifies path to the geocoder cache file")
                .long(CACHE_FILE_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(GEOCODER_URL_ARG_NAME)
                .help("Specifies url of a Nominatim compatible search service")
                .long(GEOCODER_URL_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OFFLINE_ARG_NAME)
                .help("Disables network lookups: only cached addresses are resolved")
                .long(OFFLINE_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

pub fn run_assign(matches: &ArgMatches) -> GenericResult<()> {
    let config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => read_config(open_file(path, "config")?)?,
        None => Config::default(),
    };

    let assignment_config = config.create_assignment_config(&get_assignment_overrides(matches)?)?;
    let out_dir = config.get_output_directory(matches.get_one::<String>(OUT_DIR_ARG_NAME).map(String::as_str));
    let cache_file = config.get_cache_file(matches.get_one::<String>(CACHE_FILE_ARG_NAME).map(String::as_str));

    let roster_path = matches
        .get_one::<String>(ROSTER_ARG_NAME)
        .ok_or_else(|| GenericError::from(format!("{ROSTER_ARG_NAME} must be set")))?;
    let roster = open_file(roster_path, "roster")?;

    let outcome = if matches.get_flag(OFFLINE_ARG_NAME) {
        let geocoder = CachedGeocoder::new(OfflineGeocoder, cache_file.as_path())?;
        dispatch_roster(roster, &geocoder, assignment_config, out_dir.as_path())?
    } else {
        let settings =
            config.create_nominatim_settings(matches.get_one::<String>(GEOCODER_URL_ARG_NAME).map(String::as_str));
        let geocoder = CachedGeocoder::new(NominatimGeocoder::new(&settings)?, cache_file.as_path())?;
        dispatch_roster(roster, &geocoder, assignment_config, out_dir.as_path())?
    };

    print_outcome(&outcome, out_dir.as_path());

    Ok(())
}

fn get_assignment_overrides(matches: &ArgMatches) -> GenericResult<AssignmentSettings> {
    Ok(AssignmentSettings {
        capacity_per_driver: parse_value(matches, CAPACITY_ARG_NAME, "capacity")?,
        cluster_multiplier: parse_value(matches, MULTIPLIER_ARG_NAME, "cluster multiplier")?,
        balance_weight: parse_value(matches, BALANCE_WEIGHT_ARG_NAME, "balance weight")?,
        random_seed: parse_value(matches, SEED_ARG_NAME, "random seed")?,
        policy: parse_value::<PolicyType>(matches, POLICY_ARG_NAME, "policy")?,
        ..AssignmentSettings::default()
    })
}

fn print_outcome(outcome: &DispatchOutcome, out_dir: &Path) {
    println!("{}", format_console_summary(outcome.assignment.drivers.as_slice()));

    outcome.files.iter().for_each(|path| info!("generated: {}", path.display()));

    if !outcome.assignment.unassigned.is_empty() {
        info!(
            "{} deliveries were not assigned, see reports in '{}'",
            outcome.assignment.unassigned.len(),
            out_dir.display()
        );
    }
}
