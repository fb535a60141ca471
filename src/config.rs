//! District offset overlay loading.
//!
//! The engine ships with a compiled-in offset table (`districts::default_offsets`).
//! Demo operators can tune it with a TOML file of the form:
//!
//! ```toml
//! [[district]]
//! name = "District 7"
//! offset = 15
//! ```
//!
//! Loading is explicit; nothing in the engine reads a file on its own.

use std::collections::HashSet;
use std::path::Path;

use crate::districts::{find_district, DistrictOffsets};
use crate::logging::{self, Component};
use crate::model::ConfigError;

/// Parses and validates an offset table from TOML text.
///
/// Rejects empty tables and duplicate district names. Names missing from
/// the registry are accepted but logged, since their alerts cannot cite a
/// hotspot street.
pub fn parse_district_offsets(text: &str) -> Result<DistrictOffsets, ConfigError> {
    let table: DistrictOffsets = toml::from_str(text)?;

    if table.is_empty() {
        return Err(ConfigError::EmptyDistrictTable);
    }

    let mut seen = HashSet::new();
    for entry in table.iter() {
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::DuplicateDistrict(entry.name.clone()));
        }
        if find_district(&entry.name).is_none() {
            logging::warn(
                Component::Config,
                Some(&entry.name),
                "district not in registry; alerts will omit its hotspot street",
            );
        }
    }

    logging::debug(
        Component::Config,
        None,
        &format!("Loaded {} district offsets", table.len()),
    );
    Ok(table)
}

/// Reads and parses an offset table from `path`.
pub fn load_district_offsets(path: impl AsRef<Path>) -> Result<DistrictOffsets, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_district_offsets(&text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
