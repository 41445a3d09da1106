use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::visibility::RangeRateLookahead;

const CONTAINER_CASES_DIR: &str = "/test-data/cases";
const LOCAL_CASES_DIR: &str = "../../test-data/cases";
const CONTAINER_RESULTS_DIR: &str = "/results";
const LOCAL_RESULTS_DIR: &str = "../../results";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_test_data_dir")]
    pub test_data_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "default_implementation")]
    pub implementation: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub range_rate_lookahead: RangeRateLookahead,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_data_dir: default_test_data_dir(),
            results_dir: default_results_dir(),
            implementation: default_implementation(),
            version: default_version(),
            range_rate_lookahead: RangeRateLookahead::default(),
        }
    }
}

fn first_existing(container: &str, local: &str) -> PathBuf {
    if Path::new(container).exists() {
        PathBuf::from(container)
    } else {
        PathBuf::from(local)
    }
}

fn default_test_data_dir() -> PathBuf {
    first_existing(CONTAINER_CASES_DIR, LOCAL_CASES_DIR)
}

fn default_results_dir() -> PathBuf {
    first_existing(CONTAINER_RESULTS_DIR, LOCAL_RESULTS_DIR)
}

fn default_implementation() -> String {
    "rust-sgp4".to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// The directory holding reference results next to the test cases.
    pub fn reference_dir(&self) -> PathBuf {
        match self.test_data_dir.parent() {
            Some(parent) => parent.join("reference-results"),
            None => PathBuf::from("reference-results"),
        }
    }
}
