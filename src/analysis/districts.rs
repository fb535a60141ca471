//! Per-district status aggregation.
//!
//! Each district's level is the city-wide base level plus its fixed offset,
//! floored at zero. Its risk comes from the canonical classifier with the
//! live report and tide signals replaced by fixed values (no reports,
//! Medium tide), so the overview reacts to water level and rain only.

use crate::districts::DistrictOffsets;
use crate::logging::{self, Component};
use crate::model::{DistrictStatus, FloodInputs, RainIntensity, TideLevel};
use crate::risk::classifier;

/// Tide assumed for every district in the overview.
pub const OVERVIEW_TIDE: TideLevel = TideLevel::Medium;

/// Citizen report count assumed for every district in the overview.
pub const OVERVIEW_REPORTS: i32 = 0;

/// Builds a fresh status list, one entry per row of `offsets`, in table order.
pub fn aggregate(
    base_level: i32,
    rain: RainIntensity,
    offsets: &DistrictOffsets,
) -> Vec<DistrictStatus> {
    offsets
        .iter()
        .map(|entry| {
            let water_level = base_level.saturating_add(entry.offset).max(0);
            let inputs = FloodInputs::new(rain, water_level, OVERVIEW_REPORTS, OVERVIEW_TIDE);
            let risk = classifier::classify(&inputs).risk;
            logging::debug(
                Component::Aggregator,
                Some(&entry.name),
                &format!("{}cm -> {}", water_level, risk),
            );
            DistrictStatus {
                name: entry.name.clone(),
                risk,
                water_level,
            }
        })
        .collect()
}

/// The district with the highest risk, then highest water level; first in list order on ties.
pub fn worst_district(statuses: &[DistrictStatus]) -> Option<&DistrictStatus> {
    statuses.iter().fold(None, |worst: Option<&DistrictStatus>, s| match worst {
        Some(w) if (w.risk, w.water_level) >= (s.risk, s.water_level) => Some(w),
        _ => Some(s),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::districts::{default_offsets, DistrictOffset};
    use crate::model::RiskLevel;

    fn status<'a>(statuses: &'a [DistrictStatus], name: &str) -> &'a DistrictStatus {
        statuses
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("{} missing from aggregate", name))
    }

    #[test]
    fn test_default_snapshot_matches_demo_overview() {
        // Demo default: 45cm base, heavy rain.
        let statuses = aggregate(45, RainIntensity::Heavy, &default_offsets());
        assert_eq!(statuses.len(), 6);
        assert_eq!(status(&statuses, "District 1").risk, RiskLevel::Low);
        assert_eq!(status(&statuses, "District 3").risk, RiskLevel::Medium);
        assert_eq!(status(&statuses, "District 4").risk, RiskLevel::Medium);
        assert_eq!(status(&statuses, "District 7").risk, RiskLevel::High);
        assert_eq!(status(&statuses, "Phú Nhuận").risk, RiskLevel::Low);
        assert_eq!(status(&statuses, "Bình Thạnh").risk, RiskLevel::Medium);
        assert_eq!(status(&statuses, "District 7").water_level, 60);
    }

    #[test]
    fn test_levels_are_floored_at_zero() {
        let statuses = aggregate(5, RainIntensity::Low, &default_offsets());
        assert_eq!(status(&statuses, "District 1").water_level, 0);
        assert!(statuses.iter().all(|s| s.water_level >= 0));
    }

    #[test]
    fn test_only_listed_districts_are_synthesized() {
        let offsets = DistrictOffsets {
            entries: vec![DistrictOffset {
                name: "District 7".to_string(),
                offset: 15,
            }],
        };
        let statuses = aggregate(45, RainIntensity::Low, &offsets);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].name, "District 7");
    }

    #[test]
    fn test_worst_district_prefers_higher_risk_then_level() {
        let statuses = aggregate(45, RainIntensity::Heavy, &default_offsets());
        let worst = worst_district(&statuses).expect("non-empty snapshot");
        assert_eq!(worst.name, "District 7");
        assert!(worst_district(&[]).is_none());
    }
}
