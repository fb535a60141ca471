//! v2 risk rule set, as served by the HTTP risk-calculation endpoint.
//!
//! Kept reachable alongside the canonical v1 rules (`risk::classifier`) and
//! selected only through `RuleSet::V2`. It differs from v1 in three ways:
//!
//! - the primary MEDIUM threshold is `> 30` instead of `> 50`, and Medium
//!   rain contributes no rule
//! - citizen reports are applied before the tide modifier
//! - it derives a confidence figure and adds a default reason when no rule fired
//!
//! Neither rule set is a correction of the other.

use crate::logging::{self, Component};
use crate::model::{FloodInputs, RainIntensity, RiskLevel, RiskOutput, TideLevel};

pub const PRIMARY_HIGH_CM: i32 = 70;
pub const PRIMARY_MEDIUM_CM: i32 = 30;
pub const HEAVY_RAIN_HIGH_CM: i32 = 50;
pub const HEAVY_RAIN_MEDIUM_CM: i32 = 30;
pub const REPORTS_MIN_COUNT: i32 = 3;
pub const REPORTS_MIN_LEVEL_CM: i32 = 35;
pub const HIGH_TIDE_CM: i32 = 40;

const BASE_CONFIDENCE: u8 = 70;
const CONFIDENCE_STEP: u8 = 10;

pub const NORMAL_CONDITIONS_REASON: &str = "All sensor readings within normal parameters";

pub fn classify(inputs: &FloodInputs) -> RiskOutput {
    let inputs = inputs.clamped();
    let level = inputs.water_level;
    let mut risk = RiskLevel::Low;
    let mut reasoning = Vec::new();

    if level > PRIMARY_HIGH_CM {
        risk = RiskLevel::High;
        reasoning.push("Water level exceeds 70cm critical threshold".to_string());
    } else if level > PRIMARY_MEDIUM_CM {
        risk = RiskLevel::Medium;
        reasoning.push("Water level above 30cm warning threshold".to_string());
    }

    if inputs.rain_intensity == RainIntensity::Heavy {
        if level > HEAVY_RAIN_HIGH_CM {
            risk = RiskLevel::High;
            reasoning.push("Heavy rain combined with elevated water levels".to_string());
        } else if level > HEAVY_RAIN_MEDIUM_CM {
            risk = risk.at_least(RiskLevel::Medium);
            reasoning.push("Heavy rain increasing flood risk".to_string());
        }
    }

    if inputs.citizen_reports >= REPORTS_MIN_COUNT && level > REPORTS_MIN_LEVEL_CM {
        match risk {
            RiskLevel::Low => {
                risk = RiskLevel::Medium;
                reasoning.push("Multiple citizen reports confirm rising water".to_string());
            }
            RiskLevel::Medium => {
                risk = RiskLevel::High;
                reasoning.push("Citizen reports escalate existing risk".to_string());
            }
            RiskLevel::High => {}
        }
    }

    if inputs.tide_level == TideLevel::High && level > HIGH_TIDE_CM {
        match risk {
            RiskLevel::Medium => {
                risk = RiskLevel::High;
                reasoning.push("High tide amplifies flood risk".to_string());
            }
            RiskLevel::Low => {
                risk = RiskLevel::Medium;
                reasoning.push("High tide raises water levels".to_string());
            }
            RiskLevel::High => {}
        }
    }

    if reasoning.is_empty() {
        reasoning.push(NORMAL_CONDITIONS_REASON.to_string());
    }

    let confidence = confidence(&inputs);
    logging::debug(
        Component::Classifier,
        None,
        &format!("v2 water={}cm -> {} ({}%)", level, risk, confidence),
    );

    RiskOutput {
        risk,
        reasoning,
        confidence: Some(confidence),
    }
}

/// Data-availability confidence: 70 plus 10 per non-trivial signal, capped at 100.
fn confidence(inputs: &FloodInputs) -> u8 {
    let mut confidence = BASE_CONFIDENCE;
    if inputs.water_level > 0 {
        confidence += CONFIDENCE_STEP;
    }
    if inputs.rain_intensity != RainIntensity::Low {
        confidence += CONFIDENCE_STEP;
    }
    if inputs.citizen_reports > 0 {
        confidence += CONFIDENCE_STEP;
    }
    confidence.min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_treats_35cm_as_medium() {
        let out = classify(&FloodInputs::new(RainIntensity::Low, 35, 0, TideLevel::Low));
        assert_eq!(out.risk, RiskLevel::Medium, "v2 warns above 30cm");
    }

    #[test]
    fn test_v2_default_reason_and_base_confidence() {
        let out = classify(&FloodInputs::new(RainIntensity::Low, 0, 0, TideLevel::Low));
        assert_eq!(out.risk, RiskLevel::Low);
        assert_eq!(out.reasoning, vec![NORMAL_CONDITIONS_REASON.to_string()]);
        assert_eq!(out.confidence, Some(70));
    }

    #[test]
    fn test_v2_confidence_caps_at_100() {
        let out = classify(&FloodInputs::new(RainIntensity::Heavy, 60, 5, TideLevel::High));
        assert_eq!(out.confidence, Some(100));
        assert_eq!(out.risk, RiskLevel::High);
    }

    #[test]
    fn test_v2_applies_reports_before_tide() {
        let out = classify(&FloodInputs::new(RainIntensity::Low, 38, 3, TideLevel::High));
        // 38 > 30 -> MEDIUM, reports -> HIGH, tide has nothing left to raise.
        assert_eq!(out.risk, RiskLevel::High);
        assert_eq!(
            out.reasoning,
            vec![
                "Water level above 30cm warning threshold".to_string(),
                "Citizen reports escalate existing risk".to_string(),
            ]
        );
    }
}
