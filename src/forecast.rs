//! Water level projection over the next hour.
//!
//! Linear rise at a rate fixed by rain intensity: Heavy 2.0, Medium 1.0,
//! Low 0.5 cm/min. Not a predictive model; there is no upper clamp and
//! projected levels may exceed 100cm.

use crate::logging::{self, Component};
use crate::model::{PredictionPoint, RainIntensity};

/// Spacing between projection points, in minutes.
pub const STEP_MINUTES: u32 = 10;

/// Number of points including "Now".
pub const POINT_COUNT: u32 = 7;

/// Level at which the projector reports "time to risk".
pub const DEFAULT_THRESHOLD_CM: i32 = 70;

/// Projects the water level at 10-minute steps from now to +60 minutes.
///
/// Negative current levels are clamped to zero first.
pub fn project(current_level: i32, rain: RainIntensity) -> Vec<PredictionPoint> {
    let base = f64::from(current_level.max(0));
    let rate = rain.rise_rate_cm_per_min();

    (0..POINT_COUNT)
        .map(|i| {
            let elapsed = i * STEP_MINUTES;
            let label = if elapsed == 0 {
                "Now".to_string()
            } else {
                format!("+{}m", elapsed)
            };
            PredictionPoint {
                label,
                level: (base + rate * f64::from(elapsed)).round() as i32,
            }
        })
        .collect()
}

/// Minutes until `threshold` is reached at the rain's rise rate.
///
/// Returns 0 if the current level is already at or above the threshold.
pub fn time_to_threshold(current_level: i32, rain: RainIntensity, threshold: i32) -> u32 {
    let current = current_level.max(0);
    if current >= threshold {
        return 0;
    }
    let minutes = (f64::from(threshold - current) / rain.rise_rate_cm_per_min()).ceil() as u32;
    logging::debug(
        Component::Projector,
        None,
        &format!("{}cm -> {}cm in {} min ({} rain)", current, threshold, minutes, rain),
    );
    minutes
}

/// [`time_to_threshold`] against the 70cm critical level.
pub fn time_to_risk(current_level: i32, rain: RainIntensity) -> u32 {
    time_to_threshold(current_level, rain, DEFAULT_THRESHOLD_CM)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_has_seven_labelled_points() {
        let points = project(40, RainIntensity::Medium);
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["Now", "+10m", "+20m", "+30m", "+40m", "+50m", "+60m"]);
    }

    #[test]
    fn test_heavy_rain_rises_two_cm_per_minute_without_upper_clamp() {
        let points = project(45, RainIntensity::Heavy);
        assert_eq!(points[0].level, 45);
        assert_eq!(points[1].level, 65);
        assert_eq!(points[6].level, 165, "projection must not clamp at 100");
    }

    #[test]
    fn test_low_rain_rises_half_cm_per_minute() {
        let points = project(20, RainIntensity::Low);
        assert_eq!(points[6].level, 50);
    }

    #[test]
    fn test_projection_is_restartable() {
        assert_eq!(project(33, RainIntensity::Low), project(33, RainIntensity::Low));
    }

    #[test]
    fn test_time_to_threshold_is_zero_at_or_above() {
        assert_eq!(time_to_threshold(70, RainIntensity::Low, 70), 0);
        assert_eq!(time_to_threshold(90, RainIntensity::Heavy, 70), 0);
    }

    #[test]
    fn test_time_to_threshold_rounds_up() {
        // (70 - 45) / 2.0 = 12.5 -> 13
        assert_eq!(time_to_risk(45, RainIntensity::Heavy), 13);
        // (70 - 45) / 0.5 = 50
        assert_eq!(time_to_risk(45, RainIntensity::Low), 50);
        assert_eq!(time_to_threshold(59, RainIntensity::Medium, 60), 1);
    }
}
