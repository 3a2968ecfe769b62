//! A command line tool configuration read from a json file.

#[cfg(test)]
#[path = "../../tests/unit/extensions/config_test.rs"]
mod config_test;

use crate::extensions::geocode::NominatimSettings;
use dispatch_core::prelude::{AssignmentConfig, AssignmentPolicy, GenericError, GenericResult};
use serde::Deserialize;
use std::io::{BufReader, Read};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Default directory for written reports.
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "routes";
/// Default geocoder cache file.
pub const DEFAULT_CACHE_FILE: &str = ".geocoder-cache.json";

/// A tool configuration. Every value is optional: missing ones take defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Assignment settings.
    pub assignment: Option<AssignmentSettings>,
    /// Geocoder settings.
    pub geocoder: Option<GeocoderConfig>,
    /// Output settings.
    pub output: Option<OutputConfig>,
}

/// Assignment settings which override `AssignmentConfig` defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentSettings {
    /// Maximum amount of deliveries per driver.
    pub capacity_per_driver: Option<usize>,
    /// A ratio of clusters to drivers.
    pub cluster_multiplier: Option<f64>,
    /// A penalty factor for already loaded drivers.
    pub balance_weight: Option<f64>,
    /// A random seed.
    pub random_seed: Option<u64>,
    /// An assignment policy.
    pub policy: Option<PolicyType>,
    /// Maximum amount of clustering iterations.
    pub max_cluster_iterations: Option<usize>,
    /// Maximum amount of rebalance moves.
    pub max_rebalance_moves: Option<usize>,
}

/// A policy name as it is used in configuration and command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    /// Maps to `AssignmentPolicy::BalancedClusters`.
    Balanced,
    /// Maps to `AssignmentPolicy::ExclusiveClusters`.
    Exclusive,
    /// Maps to `AssignmentPolicy::NearestDriver`.
    Nearest,
}

/// Geocoder settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocoderConfig {
    /// Search service url.
    pub base_url: Option<String>,
    /// A value of `User-Agent` header.
    pub user_agent: Option<String>,
    /// A path to the cache file.
    pub cache_file: Option<String>,
    /// A minimum interval between requests in milliseconds.
    pub min_request_interval_ms: Option<u64>,
    /// A request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Output settings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
    /// A directory where reports are written.
    pub directory: Option<String>,
}

impl FromStr for PolicyType {
    type Err = GenericError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "exclusive" => Ok(Self::Exclusive),
            "nearest" => Ok(Self::Nearest),
            _ => Err(format!("unknown policy: '{value}', expected one of: balanced, exclusive, nearest").into()),
        }
    }
}

impl From<PolicyType> for AssignmentPolicy {
    fn from(value: PolicyType) -> Self {
        match value {
            PolicyType::Balanced => AssignmentPolicy::BalancedClusters,
            PolicyType::Exclusive => AssignmentPolicy::ExclusiveClusters,
            PolicyType::Nearest => AssignmentPolicy::NearestDriver,
        }
    }
}

impl AssignmentSettings {
    /// Returns configuration with values specified in settings replaced.
    pub fn apply(&self, config: AssignmentConfig) -> AssignmentConfig {
        AssignmentConfig {
            capacity_per_driver: self.capacity_per_driver.unwrap_or(config.capacity_per_driver),
            cluster_multiplier: self.cluster_multiplier.unwrap_or(config.cluster_multiplier),
            balance_weight: self.balance_weight.unwrap_or(config.balance_weight),
            random_seed: self.random_seed.unwrap_or(config.random_seed),
            policy: self.policy.map(AssignmentPolicy::from).unwrap_or(config.policy),
            max_cluster_iterations: self.max_cluster_iterations.unwrap_or(config.max_cluster_iterations),
            max_rebalance_moves: self.max_rebalance_moves.unwrap_or(config.max_rebalance_moves),
        }
    }
}

impl Config {
    /// Creates assignment configuration: values from the file override defaults, `overrides`
    /// override values from the file. Fails if the result is not valid.
    pub fn create_assignment_config(&self, overrides: &AssignmentSettings) -> GenericResult<AssignmentConfig> {
        let config = self.assignment.as_ref().map_or_else(AssignmentConfig::default, |settings| {
            settings.apply(AssignmentConfig::default())
        });
        let config = overrides.apply(config);

        config.validate().map_err(|err| GenericError::with_context("invalid assignment configuration", err))?;

        Ok(config)
    }

    /// Creates geocoder service settings using defaults for missing values.
    pub fn create_nominatim_settings(&self, base_url: Option<&str>) -> NominatimSettings {
        let defaults = NominatimSettings::default();
        let geocoder = self.geocoder.clone().unwrap_or_default();

        NominatimSettings {
            base_url: base_url.map(str::to_string).or(geocoder.base_url).unwrap_or(defaults.base_url),
            user_agent: geocoder.user_agent.unwrap_or(defaults.user_agent),
            min_request_interval: geocoder
                .min_request_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.min_request_interval),
            timeout: geocoder.timeout_secs.map(Duration::from_secs).unwrap_or(defaults.timeout),
        }
    }

    /// Returns a path to the geocoder cache file.
    pub fn get_cache_file(&self, cache_file: Option<&str>) -> PathBuf {
        cache_file
            .map(str::to_string)
            .or_else(|| self.geocoder.as_ref().and_then(|geocoder| geocoder.cache_file.clone()))
            .unwrap_or_else(|| DEFAULT_CACHE_FILE.to_string())
            .into()
    }

    /// Returns a path to the output directory.
    pub fn get_output_directory(&self, directory: Option<&str>) -> PathBuf {
        directory
            .map(str::to_string)
            .or_else(|| self.output.as_ref().and_then(|output| output.directory.clone()))
            .unwrap_or_else(|| DEFAULT_OUTPUT_DIRECTORY.to_string())
            .into()
    }
}

/// Reads configuration from json.
pub fn read_config<R: Read>(reader: BufReader<R>) -> GenericResult<Config> {
    serde_json::from_reader(reader).map_err(|err| GenericError::with_context("cannot deserialize config", err))
}
