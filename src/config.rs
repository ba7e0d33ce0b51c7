//! Engine configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::persist::{PersistResult, tables::LocatorTables};

/// Fuzzy matcher thresholds. `0` means exact match only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Mismatched character positions tolerated between locators.
    pub locator_threshold: usize,
    /// Mismatched character positions tolerated between callsigns.
    pub callsign_threshold: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            locator_threshold: 1,
            callsign_threshold: 1,
        }
    }
}

/// Everything a caller needs to set up the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fuzzy matcher thresholds.
    pub matching: MatchConfig,
    /// Prefix → country JSON table.
    pub prefixes_path: PathBuf,
    /// Country → locator squares JSON table.
    pub squares_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            matching: MatchConfig::default(),
            prefixes_path: PathBuf::from("prefixes.json"),
            squares_path: PathBuf::from("locsquares.json"),
        }
    }
}

impl EngineConfig {
    /// Parses a JSON configuration; absent keys take their defaults.
    pub fn from_json_str(json: &str) -> PersistResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> PersistResult<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Loads the reference tables this configuration points at.
    pub fn load_tables(&self) -> PersistResult<LocatorTables> {
        LocatorTables::load(&self.prefixes_path, &self.squares_path)
    }
}
