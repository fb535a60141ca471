/// District registry for the Ho Chi Minh City flood overview.
///
/// Defines the closed list of districts the engine knows about, along with
/// their display metadata, the fixed water-level offset used by the coarse
/// district aggregator, and the street treated as each district's hotspot.
/// This is the single source of truth for district names; other modules
/// should look districts up here rather than hardcoding names.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// District metadata
// ---------------------------------------------------------------------------

/// Metadata for a single district.
pub struct District {
    /// English display name, also the key used across the engine.
    pub name: &'static str,
    /// Vietnamese display name.
    pub name_vi: &'static str,
    /// WGS84 latitude of the district centre.
    pub latitude: f64,
    /// WGS84 longitude of the district centre.
    pub longitude: f64,
    /// Fixed offset (cm) applied to the city-wide base level by the aggregator.
    pub level_offset: i32,
    /// Street with the worst flooding history in the district.
    pub hotspot_street: &'static str,
}

/// All districts shown on the overview, in display order.
pub static DISTRICT_REGISTRY: &[District] = &[
    District {
        name: "District 1",
        name_vi: "Quận 1",
        latitude: 10.757,
        longitude: 106.682,
        level_offset: -20,
        hotspot_street: "Võ Văn Kiệt",
    },
    District {
        name: "District 3",
        name_vi: "Quận 3",
        latitude: 10.795,
        longitude: 106.673,
        level_offset: 0,
        hotspot_street: "Lê Văn Sỹ",
    },
    District {
        name: "District 4",
        name_vi: "Quận 4",
        latitude: 10.788,
        longitude: 106.703,
        level_offset: 5,
        hotspot_street: "Nguyễn Hữu Cảnh",
    },
    District {
        name: "District 7",
        name_vi: "Quận 7",
        latitude: 10.7356,
        longitude: 106.7019,
        level_offset: 15,
        hotspot_street: "Huỳnh Tấn Phát",
    },
    District {
        name: "Phú Nhuận",
        name_vi: "Phú Nhuận",
        latitude: 10.798,
        longitude: 106.686,
        level_offset: -18,
        hotspot_street: "Phan Đăng Lưu",
    },
    District {
        name: "Bình Thạnh",
        name_vi: "Bình Thạnh",
        latitude: 10.8106,
        longitude: 106.7091,
        level_offset: 3,
        hotspot_street: "Xô Viết Nghệ Tĩnh",
    },
];

/// District named in the trailing "all clear" community record.
pub const REFERENCE_DISTRICT: &str = "District 1";

/// Hotspot cited when no district snapshot is available.
pub const DEFAULT_HOTSPOT_DISTRICT: &str = "District 7";

// ---------------------------------------------------------------------------
// Offset table
// ---------------------------------------------------------------------------

/// One row of the aggregator's offset table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictOffset {
    pub name: String,
    pub offset: i32,
}

/// Ordered offset table consumed by `analysis::districts::aggregate`.
///
/// The compiled-in table comes from [`default_offsets`]; a TOML overlay can
/// be loaded through `config::load_district_offsets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistrictOffsets {
    #[serde(rename = "district")]
    pub entries: Vec<DistrictOffset>,
}

impl DistrictOffsets {
    pub fn iter(&self) -> impl Iterator<Item = &DistrictOffset> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn offset_for(&self, name: &str) -> Option<i32> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.offset)
    }
}

/// The compiled-in offset table, in registry order.
pub fn default_offsets() -> DistrictOffsets {
    DistrictOffsets {
        entries: DISTRICT_REGISTRY
            .iter()
            .map(|d| DistrictOffset {
                name: d.name.to_string(),
                offset: d.level_offset,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Looks up a district by English or Vietnamese name. Returns `None` if not found.
pub fn find_district(name: &str) -> Option<&'static District> {
    DISTRICT_REGISTRY
        .iter()
        .find(|d| d.name == name || d.name_vi == name)
}

/// Returns the English names of all registered districts.
pub fn all_district_names() -> Vec<&'static str> {
    DISTRICT_REGISTRY.iter().map(|d| d.name).collect()
}

/// Alert location label, e.g. `"District 7 – Huỳnh Tấn Phát"`.
/// Unknown districts are labelled with their bare name.
pub fn hotspot_location(name: &str) -> String {
    match find_district(name) {
        Some(d) => format!("{} – {}", d.name, d.hotspot_street),
        None => name.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
