//! Loading of the callsign-prefix and locator-square reference tables.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use hashbrown::{HashMap, HashSet};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::engine::traits::CountryReference;

use super::PersistResult;

/// Country record attached to a callsign prefix.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CountryRecord {
    /// Main prefix of the country the prefix belongs to.
    #[serde(rename = "mainprefix")]
    pub main_prefix: String,
}

/// Immutable prefix and square tables, built once and shared by reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocatorTables {
    prefixes: HashMap<String, CountryRecord>,
    squares: HashMap<String, HashSet<String>>,
}

impl LocatorTables {
    /// Tables with no data; every locator check passes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds tables from already parsed maps. Keys, main prefixes and
    /// squares are upper-cased.
    pub fn new(
        prefixes: impl IntoIterator<Item = (String, CountryRecord)>,
        squares: impl IntoIterator<Item = (String, HashSet<String>)>,
    ) -> Self {
        Self {
            prefixes: prefixes
                .into_iter()
                .map(|(k, record)| {
                    let main_prefix = record.main_prefix.to_uppercase();
                    (k.to_uppercase(), CountryRecord { main_prefix })
                })
                .collect(),
            squares: squares
                .into_iter()
                .map(|(k, set)| {
                    let set: HashSet<String> = set.into_iter().map(|s| s.to_uppercase()).collect();
                    (k.to_uppercase(), set)
                })
                .collect(),
        }
    }

    /// Parses the two JSON documents.
    ///
    /// `squares_json` maps a main prefix to `{square: flag}`; only truthy
    /// flags count as membership.
    pub fn from_json_str(prefixes_json: &str, squares_json: &str) -> PersistResult<Self> {
        let prefixes: HashMap<String, CountryRecord> = serde_json::from_str(prefixes_json)?;
        let raw_squares: HashMap<String, HashMap<String, Value>> =
            serde_json::from_str(squares_json)?;

        let squares = raw_squares.into_iter().map(|(country, flags)| {
            let set: HashSet<String> = flags
                .into_iter()
                .filter(|(_, flag)| truthy(flag))
                .map(|(square, _)| square)
                .collect();
            (country, set)
        });

        Ok(Self::new(prefixes, squares))
    }

    /// Loads both files. A missing file contributes an empty table.
    pub fn load(prefixes_path: impl AsRef<Path>, squares_path: impl AsRef<Path>) -> PersistResult<Self> {
        let prefixes = read_optional(prefixes_path.as_ref())?;
        let squares = read_optional(squares_path.as_ref())?;
        let tables = Self::from_json_str(&prefixes, &squares)?;
        info!(
            "loaded {} prefixes and square sets for {} countries",
            tables.prefixes.len(),
            tables.squares.len()
        );
        Ok(tables)
    }

    /// Number of known prefixes.
    pub fn prefix_count(&self) -> usize {
        self.prefixes.len()
    }
}

impl CountryReference for LocatorTables {
    fn main_prefix(&self, callsign: &str) -> Option<&str> {
        let call = callsign.to_uppercase();
        if call.is_empty() {
            return None;
        }
        let mut cuts: Vec<usize> = call.char_indices().map(|(i, _)| i).skip(1).collect();
        cuts.push(call.len());

        cuts.iter()
            .rev()
            .find_map(|&end| self.prefixes.get(&call[..end]))
            .map(|record| record.main_prefix.as_str())
    }

    fn squares(&self, main_prefix: &str) -> Option<&HashSet<String>> {
        self.squares.get(main_prefix)
    }
}

fn read_optional(path: &Path) -> PersistResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} not found, using an empty table", path.display());
            Ok("{}".to_string())
        }
        Err(err) => Err(err.into()),
    }
}

fn truthy(flag: &Value) -> bool {
    match flag {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
        Value::Null => false,
    }
}
