//! Builds the ordered alert feed from the current signals and district overview.
//!
//! Order of the batch:
//!   1. `system/HIGH` for the worst hotspot, if the classifier says HIGH
//!   2. `weather/MEDIUM`, if rain is Heavy
//!   3. `sensor/MEDIUM`, one per MEDIUM district, in list order
//!   4. `community/LOW` "all clear" for the reference district, always last
//!
//! IDs count up from 1 within the batch and are not stable across calls.

use crate::analysis::districts::worst_district;
use crate::districts::{hotspot_location, DEFAULT_HOTSPOT_DISTRICT, REFERENCE_DISTRICT};
use crate::forecast::{time_to_risk, DEFAULT_THRESHOLD_CM};
use crate::logging;
use crate::model::{AlertData, AlertType, DistrictStatus, FloodInputs, RainIntensity, RiskLevel};
use crate::risk::classifier;

const WEATHER_LOCATION: &str = "HCMC Metropolitan Area";

/// Synthesizes a fresh, non-deduplicated alert batch.
pub fn synthesize(signals: &FloodInputs, districts: &[DistrictStatus]) -> Vec<AlertData> {
    let signals = signals.clamped();
    let risk = classifier::classify(&signals).risk;
    let mut batch = AlertBatch::default();

    if risk == RiskLevel::High {
        let hotspot = worst_district(districts)
            .map(|d| d.name.as_str())
            .unwrap_or(DEFAULT_HOTSPOT_DISTRICT);
        batch.push(
            AlertType::System,
            RiskLevel::High,
            "HIGH RISK ALERT - Flooding Expected",
            hotspot_location(hotspot),
            high_risk_message(&signals),
            "Just now",
        );
    }

    if signals.rain_intensity == RainIntensity::Heavy {
        batch.push(
            AlertType::Weather,
            RiskLevel::Medium,
            "Heavy Rain Warning",
            WEATHER_LOCATION.to_string(),
            "Heavy rainfall expected to continue for the next 2 hours. \
             Prepare for potential flooding."
                .to_string(),
            "2 minutes ago",
        );
    }

    for district in districts.iter().filter(|d| d.risk == RiskLevel::Medium) {
        batch.push(
            AlertType::Sensor,
            RiskLevel::Medium,
            "Water Rising - Monitor Closely",
            hotspot_location(&district.name),
            format!(
                "Water level at {}cm and rising. May reach {}cm within {} minutes.",
                district.water_level,
                DEFAULT_THRESHOLD_CM,
                time_to_risk(district.water_level, signals.rain_intensity)
            ),
            "5 minutes ago",
        );
    }

    batch.push(
        AlertType::Community,
        RiskLevel::Low,
        &format!("All Clear - {}", REFERENCE_DISTRICT),
        REFERENCE_DISTRICT.to_string(),
        "Conditions normal. Water levels stable. No flooding reported.".to_string(),
        "1 hour ago",
    );

    let alerts = batch.alerts;
    let high = alerts.iter().filter(|a| a.severity == RiskLevel::High).count();
    let medium = alerts.iter().filter(|a| a.severity == RiskLevel::Medium).count();
    logging::log_alert_batch_summary(alerts.len(), high, medium);
    alerts
}

fn high_risk_message(signals: &FloodInputs) -> String {
    let minutes = time_to_risk(signals.water_level, signals.rain_intensity);
    if minutes == 0 {
        format!(
            "Water level at {}cm exceeds {}cm. Avoid travel. Flooding in progress.",
            signals.water_level, DEFAULT_THRESHOLD_CM
        )
    } else {
        format!(
            "Water level at {}cm. Avoid travel. Flooding likely within {} minutes.",
            signals.water_level, minutes
        )
    }
}

#[derive(Default)]
struct AlertBatch {
    alerts: Vec<AlertData>,
}

impl AlertBatch {
    fn push(
        &mut self,
        alert_type: AlertType,
        severity: RiskLevel,
        title: &str,
        location: String,
        message: String,
        time: &str,
    ) {
        let id = self.alerts.len() as u32 + 1;
        self.alerts.push(AlertData {
            id,
            alert_type,
            severity,
            title: title.to_string(),
            location,
            message,
            time: time.to_string(),
            is_read: false,
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
