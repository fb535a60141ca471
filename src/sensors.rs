/// Street-level water sensors shown on the admin sensor map.
///
/// Each sensor has a baseline reading captured at the demo's reference
/// water level (45cm). Live readings shift every baseline by the same
/// amount the city-wide level has moved from that reference, then map the
/// result onto a status band. Offline sensors stay offline and read zero.

use serde::{Deserialize, Serialize};

use crate::logging::{self, Component};

/// City-wide level at which the baselines were captured.
pub const REFERENCE_LEVEL_CM: i32 = 45;

/// Readings strictly above this are `Critical`.
pub const CRITICAL_ABOVE_CM: i32 = 60;

/// Readings strictly above this (and not critical) are `Warning`.
pub const WARNING_ABOVE_CM: i32 = 50;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

pub struct Sensor {
    pub id: u32,
    /// Street the sensor is mounted on.
    pub name: &'static str,
    pub district: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// Reading (cm) at the reference level.
    pub baseline_cm: i32,
    /// Known-offline units report nothing regardless of conditions.
    pub offline: bool,
}

pub static SENSOR_REGISTRY: &[Sensor] = &[
    Sensor {
        id: 1,
        name: "Nguyễn Hữu Cảnh",
        district: "District 4",
        latitude: 10.788,
        longitude: 106.703,
        baseline_cm: 52,
        offline: false,
    },
    Sensor {
        id: 2,
        name: "Võ Văn Kiệt",
        district: "District 1",
        latitude: 10.757,
        longitude: 106.682,
        baseline_cm: 38,
        offline: false,
    },
    Sensor {
        id: 3,
        name: "Huỳnh Tấn Phát",
        district: "District 7",
        latitude: 10.736,
        longitude: 106.702,
        baseline_cm: 68,
        offline: false,
    },
    Sensor {
        id: 4,
        name: "Cầu Kênh Tẻ",
        district: "District 4",
        latitude: 10.745,
        longitude: 106.715,
        baseline_cm: 42,
        offline: false,
    },
    Sensor {
        id: 5,
        name: "Cầu Phú Mỹ",
        district: "District 7",
        latitude: 10.732,
        longitude: 106.721,
        baseline_cm: 0,
        offline: true,
    },
];

// ---------------------------------------------------------------------------
// Readings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Online,
    Warning,
    Critical,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub id: u32,
    pub name: String,
    pub district: String,
    pub status: SensorStatus,
    pub water_level: i32,
}

/// Status band for a shifted reading. The unclamped value is compared, so
/// a reading below zero is simply `Online`.
pub fn status_for_level(level_cm: i32) -> SensorStatus {
    if level_cm > CRITICAL_ABOVE_CM {
        SensorStatus::Critical
    } else if level_cm > WARNING_ABOVE_CM {
        SensorStatus::Warning
    } else {
        SensorStatus::Online
    }
}

/// Readings for every registered sensor at the given city-wide level.
pub fn sensor_readings(water_level: i32) -> Vec<SensorReading> {
    let shift = water_level.saturating_sub(REFERENCE_LEVEL_CM);
    SENSOR_REGISTRY
        .iter()
        .map(|sensor| {
            let (status, level) = if sensor.offline {
                (SensorStatus::Offline, 0)
            } else {
                let shifted = sensor.baseline_cm.saturating_add(shift);
                (status_for_level(shifted), shifted.max(0))
            };
            if status == SensorStatus::Critical {
                logging::debug(
                    Component::Sensors,
                    Some(sensor.district),
                    &format!("{} critical at {}cm", sensor.name, level),
                );
            }
            SensorReading {
                id: sensor.id,
                name: sensor.name.to_string(),
                district: sensor.district.to_string(),
                status,
                water_level: level,
            }
        })
        .collect()
}

/// Looks up a sensor by id. Returns `None` if not found.
pub fn find_sensor(id: u32) -> Option<&'static Sensor> {
    SENSOR_REGISTRY.iter().find(|s| s.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::districts::find_district;

    #[test]
    fn test_every_sensor_district_is_registered() {
        for sensor in SENSOR_REGISTRY {
            assert!(
                find_district(sensor.district).is_some(),
                "sensor '{}' references unknown district '{}'",
                sensor.name,
                sensor.district
            );
        }
    }

    #[test]
    fn test_no_duplicate_sensor_ids() {
        let mut seen = std::collections::HashSet::new();
        for sensor in SENSOR_REGISTRY {
            assert!(seen.insert(sensor.id), "duplicate sensor id {}", sensor.id);
        }
    }

    #[test]
    fn test_reference_level_reproduces_baselines() {
        let readings = sensor_readings(REFERENCE_LEVEL_CM);
        let htp = readings.iter().find(|r| r.id == 3).unwrap();
        assert_eq!(htp.water_level, 68);
        assert_eq!(htp.status, SensorStatus::Critical);
        let nhc = readings.iter().find(|r| r.id == 1).unwrap();
        assert_eq!(nhc.status, SensorStatus::Warning);
        let vvk = readings.iter().find(|r| r.id == 2).unwrap();
        assert_eq!(vvk.status, SensorStatus::Online);
    }

    #[test]
    fn test_status_bands_are_strict() {
        assert_eq!(status_for_level(50), SensorStatus::Online);
        assert_eq!(status_for_level(51), SensorStatus::Warning);
        assert_eq!(status_for_level(60), SensorStatus::Warning);
        assert_eq!(status_for_level(61), SensorStatus::Critical);
    }

    #[test]
    fn test_offline_sensor_stays_offline_at_zero() {
        for level in [0, 45, 120] {
            let reading = sensor_readings(level).into_iter().find(|r| r.id == 5).unwrap();
            assert_eq!(reading.status, SensorStatus::Offline);
            assert_eq!(reading.water_level, 0);
        }
    }

    #[test]
    fn test_low_city_level_floors_readings_at_zero() {
        let readings = sensor_readings(0);
        assert!(readings.iter().all(|r| r.water_level >= 0));
        assert_eq!(find_sensor(2).map(|s| s.baseline_cm), Some(38));
    }

    #[test]
    fn test_extreme_levels_saturate_instead_of_overflowing() {
        let low = sensor_readings(i32::MIN);
        assert!(low.iter().all(|r| r.water_level == 0));
        assert!(low
            .iter()
            .filter(|r| r.id != 5)
            .all(|r| r.status == SensorStatus::Online));

        let high = sensor_readings(i32::MAX);
        let htp = high.iter().find(|r| r.id == 3).unwrap();
        assert_eq!(htp.water_level, i32::MAX);
        assert_eq!(htp.status, SensorStatus::Critical);
        let offline = high.iter().find(|r| r.id == 5).unwrap();
        assert_eq!(offline.status, SensorStatus::Offline);
    }
}
