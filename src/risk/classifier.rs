//! Canonical (v1) flood risk classifier.
//!
//! Four rule groups run in a fixed order. Each reads the level produced by
//! the groups before it and may only raise it:
//!
//! 1. primary water-level threshold
//! 2. rain escalation
//! 3. tide modifier
//! 4. citizen-report escalation
//!
//! The reasoning list records one entry per rule that fired, in firing
//! order. It is a user-facing audit trail and is never re-sorted.
//!
//! Rain escalation moves the level by at most one ordinal step: its Heavy
//! `HIGH` branch needs `water_level > 50`, which the primary group has
//! already turned into at least `MEDIUM`, and the Medium-rain `HIGH` branch
//! needs `> 60`, likewise. `trace` checks this in debug builds.

use crate::logging::{self, Component};
use crate::model::{FloodInputs, RainIntensity, RiskLevel, RiskOutput, TideLevel};

// ---------------------------------------------------------------------------
// Thresholds (cm)
// ---------------------------------------------------------------------------

pub const PRIMARY_HIGH_CM: i32 = 70;
pub const PRIMARY_MEDIUM_CM: i32 = 50;

pub const HEAVY_RAIN_HIGH_CM: i32 = 50;
pub const HEAVY_RAIN_MEDIUM_CM: i32 = 30;
pub const MEDIUM_RAIN_HIGH_CM: i32 = 60;
pub const MEDIUM_RAIN_MEDIUM_CM: i32 = 40;

pub const HIGH_TIDE_CM: i32 = 40;

pub const REPORTS_MIN_COUNT: i32 = 3;
pub const REPORTS_MIN_LEVEL_CM: i32 = 35;

// ---------------------------------------------------------------------------
// Trace types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGroup {
    PrimaryThreshold,
    RainEscalation,
    TideModifier,
    CitizenReports,
}

/// Level after one rule group ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleStep {
    pub group: RuleGroup,
    pub risk: RiskLevel,
}

/// Full classification record: the per-group trajectory plus the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskTrace {
    pub steps: Vec<RuleStep>,
    pub output: RiskOutput,
}

impl RiskTrace {
    /// Levels after each group, in execution order.
    pub fn trajectory(&self) -> Vec<RiskLevel> {
        self.steps.iter().map(|s| s.risk).collect()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classifies a signal bundle. Total over well-typed input; negative water
/// levels and report counts are treated as zero.
pub fn classify(inputs: &FloodInputs) -> RiskOutput {
    trace(inputs).output
}

/// Classifies and records the level after every rule group.
pub fn trace(inputs: &FloodInputs) -> RiskTrace {
    let inputs = inputs.clamped();
    let mut reasoning = Vec::new();
    let mut steps = Vec::with_capacity(4);

    let risk = primary_threshold(&inputs, &mut reasoning);
    steps.push(RuleStep {
        group: RuleGroup::PrimaryThreshold,
        risk,
    });

    let after_rain = rain_escalation(risk, &inputs, &mut reasoning);
    debug_assert!(
        after_rain <= risk.escalated(),
        "rain escalation moved more than one step"
    );
    steps.push(RuleStep {
        group: RuleGroup::RainEscalation,
        risk: after_rain,
    });

    let after_tide = tide_modifier(after_rain, &inputs, &mut reasoning);
    steps.push(RuleStep {
        group: RuleGroup::TideModifier,
        risk: after_tide,
    });

    let after_reports = citizen_reports(after_tide, &inputs, &mut reasoning);
    steps.push(RuleStep {
        group: RuleGroup::CitizenReports,
        risk: after_reports,
    });

    logging::debug(
        Component::Classifier,
        None,
        &format!(
            "water={}cm rain={} reports={} -> {} ({} rules fired)",
            inputs.water_level,
            inputs.rain_intensity,
            inputs.citizen_reports,
            after_reports,
            reasoning.len()
        ),
    );

    RiskTrace {
        steps,
        output: RiskOutput {
            risk: after_reports,
            reasoning,
            confidence: None,
        },
    }
}

// ---------------------------------------------------------------------------
// Rule groups
// ---------------------------------------------------------------------------

fn primary_threshold(inputs: &FloodInputs, reasoning: &mut Vec<String>) -> RiskLevel {
    let level = inputs.water_level;
    if level > PRIMARY_HIGH_CM {
        reasoning.push(format!(
            "Water level {}cm exceeds {}cm critical threshold",
            level, PRIMARY_HIGH_CM
        ));
        RiskLevel::High
    } else if level > PRIMARY_MEDIUM_CM {
        reasoning.push(format!(
            "Water level {}cm above {}cm warning threshold",
            level, PRIMARY_MEDIUM_CM
        ));
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn rain_escalation(risk: RiskLevel, inputs: &FloodInputs, reasoning: &mut Vec<String>) -> RiskLevel {
    let level = inputs.water_level;
    let (high_cm, medium_cm, label) = match inputs.rain_intensity {
        RainIntensity::Heavy => (HEAVY_RAIN_HIGH_CM, HEAVY_RAIN_MEDIUM_CM, "Heavy"),
        RainIntensity::Medium => (MEDIUM_RAIN_HIGH_CM, MEDIUM_RAIN_MEDIUM_CM, "Moderate"),
        RainIntensity::Low => return risk,
    };

    if level > high_cm {
        reasoning.push(format!(
            "{} rain combined with water level above {}cm",
            label, high_cm
        ));
        risk.at_least(RiskLevel::High)
    } else if level > medium_cm {
        reasoning.push(format!(
            "{} rain raising flood risk above {}cm",
            label, medium_cm
        ));
        risk.at_least(RiskLevel::Medium)
    } else {
        risk
    }
}

fn tide_modifier(risk: RiskLevel, inputs: &FloodInputs, reasoning: &mut Vec<String>) -> RiskLevel {
    if inputs.tide_level != TideLevel::High || inputs.water_level <= HIGH_TIDE_CM {
        return risk;
    }
    match risk {
        RiskLevel::Low => {
            reasoning.push("High tide raises water levels".to_string());
            RiskLevel::Medium
        }
        RiskLevel::Medium => {
            reasoning.push("High tide amplifies flood risk".to_string());
            RiskLevel::High
        }
        RiskLevel::High => RiskLevel::High,
    }
}

fn citizen_reports(risk: RiskLevel, inputs: &FloodInputs, reasoning: &mut Vec<String>) -> RiskLevel {
    if inputs.citizen_reports < REPORTS_MIN_COUNT || inputs.water_level <= REPORTS_MIN_LEVEL_CM {
        return risk;
    }
    match risk {
        RiskLevel::Low => {
            reasoning.push(format!(
                "{} citizen reports confirm rising water",
                inputs.citizen_reports
            ));
            RiskLevel::Medium
        }
        RiskLevel::Medium => {
            reasoning.push(format!(
                "{} citizen reports escalate existing risk",
                inputs.citizen_reports
            ));
            RiskLevel::High
        }
        RiskLevel::High => RiskLevel::High,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
