//! Core data types for the FlowGuard flood decision engine.
//!
//! This module defines the shared domain model imported by all other modules.
//! It contains no decision logic, only types, their wire spellings, and the
//! error enums surfaced at the boundary.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Signal enums
// ---------------------------------------------------------------------------

/// Ordinal flood risk classification. `Low < Medium < High`.
///
/// Rule groups in the classifier only ever move a level upward, so the
/// derived `Ord` is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// One ordinal step up, saturating at `High`.
    pub fn escalated(self) -> RiskLevel {
        match self {
            RiskLevel::Low => RiskLevel::Medium,
            RiskLevel::Medium | RiskLevel::High => RiskLevel::High,
        }
    }

    /// Raises `self` to `floor` if it is below it; never lowers.
    pub fn at_least(self, floor: RiskLevel) -> RiskLevel {
        self.max(floor)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed rain intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainIntensity {
    Low,
    Medium,
    Heavy,
}

impl RainIntensity {
    /// Water rise rate used by the temporal projector, in cm per minute.
    pub fn rise_rate_cm_per_min(&self) -> f64 {
        match self {
            RainIntensity::Heavy => 2.0,
            RainIntensity::Medium => 1.0,
            RainIntensity::Low => 0.5,
        }
    }

    /// Parses the wire spelling (`"Low"`, `"Medium"`, `"Heavy"`).
    pub fn parse(value: &str) -> Option<RainIntensity> {
        match value {
            "Low" => Some(RainIntensity::Low),
            "Medium" => Some(RainIntensity::Medium),
            "Heavy" => Some(RainIntensity::Heavy),
            _ => None,
        }
    }
}

impl fmt::Display for RainIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RainIntensity::Low => write!(f, "Low"),
            RainIntensity::Medium => write!(f, "Medium"),
            RainIntensity::Heavy => write!(f, "Heavy"),
        }
    }
}

/// Tide level at the nearest river gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TideLevel {
    Low,
    Medium,
    High,
}

impl TideLevel {
    /// Parses the wire spelling (`"Low"`, `"Medium"`, `"High"`).
    pub fn parse(value: &str) -> Option<TideLevel> {
        match value {
            "Low" => Some(TideLevel::Low),
            "Medium" => Some(TideLevel::Medium),
            "High" => Some(TideLevel::High),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Classifier input / output
// ---------------------------------------------------------------------------

/// The signal bundle fed to the risk classifier.
///
/// Water level is in centimetres. Negative values are tolerated here and
/// clamped to zero by [`FloodInputs::clamped`] before any rule reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FloodInputs {
    pub rain_intensity: RainIntensity,
    pub water_level: i32,
    pub citizen_reports: i32,
    pub tide_level: TideLevel,
}

impl FloodInputs {
    pub fn new(
        rain_intensity: RainIntensity,
        water_level: i32,
        citizen_reports: i32,
        tide_level: TideLevel,
    ) -> Self {
        Self {
            rain_intensity,
            water_level,
            citizen_reports,
            tide_level,
        }
    }

    /// Copy with negative water level and report count clamped to zero.
    pub fn clamped(&self) -> FloodInputs {
        FloodInputs {
            water_level: self.water_level.max(0),
            citizen_reports: self.citizen_reports.max(0),
            ..*self
        }
    }
}

/// Classifier result: the level plus the audit trail of rules that fired,
/// in firing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskOutput {
    pub risk: RiskLevel,
    pub reasoning: Vec<String>,
    /// Display-only percentage. Not derived by the canonical rule set.
    #[serde(
        default,
        deserialize_with = "confidence_from_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub confidence: Option<u8>,
}

/// Reads any JSON number as a confidence, rounded and clamped to 0-100.
fn confidence_from_number<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|value| {
        if value.is_nan() {
            0
        } else {
            value.round().clamp(0.0, 100.0) as u8
        }
    }))
}

impl RiskOutput {
    /// Attaches a caller-supplied confidence, capped at 100.
    pub fn with_confidence(mut self, confidence: u8) -> Self {
        self.confidence = Some(confidence.min(100));
        self
    }
}

// ---------------------------------------------------------------------------
// Projection and district overview
// ---------------------------------------------------------------------------

/// One point of the 60-minute water level projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionPoint {
    /// `"Now"`, `"+10m"`, ... `"+60m"`
    pub label: String,
    pub level: i32,
}

/// Coarse per-district status produced by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictStatus {
    pub name: String,
    pub risk: RiskLevel,
    pub water_level: i32,
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    System,
    Sensor,
    Weather,
    Community,
}

/// A synthesized alert record. `id` is unique only within one synthesis
/// batch; callers needing durable identity must assign their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertData {
    pub id: u32,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: RiskLevel,
    pub title: String,
    pub location: String,
    pub message: String,
    /// Relative time label, e.g. "5 minutes ago".
    pub time: String,
    #[serde(default)]
    pub is_read: bool,
}

// ---------------------------------------------------------------------------
// Routing
// ---------------------------------------------------------------------------

/// A trip endpoint as sent by the navigation screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
    pub district: String,
}

impl Location {
    /// Endpoint identified by district only; coordinates are unused by the scorer.
    pub fn in_district(district: &str) -> Self {
        Self {
            lat: 0.0,
            lng: 0.0,
            address: district.to_string(),
            district: district.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSegment {
    pub street: String,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRecommendation {
    pub waypoints: Vec<String>,
    pub avoid_streets: Vec<String>,
    /// 0-100, floored at 0.
    pub safety_score: u8,
    pub reasoning: String,
    /// Minutes. Contains a random jitter term.
    pub estimated_time: u32,
}

// ---------------------------------------------------------------------------
// Rewards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TripOutcome {
    Safe,
    Detour,
    Flooded,
}

impl TripOutcome {
    pub fn parse(value: &str) -> Option<TripOutcome> {
        match value {
            "safe" => Some(TripOutcome::Safe),
            "detour" => Some(TripOutcome::Detour),
            "flooded" => Some(TripOutcome::Flooded),
            _ => None,
        }
    }
}

/// A completed trip as confirmed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripData {
    /// Metres.
    pub distance: u32,
    /// Seconds.
    pub duration: u32,
    pub outcome: TripOutcome,
}

/// Caller-owned reward history. The engine only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub daily_points: u32,
    pub current_streak: u32,
    /// ISO 8601 timestamp (or plain `YYYY-MM-DD` date) of the last check-in.
    pub last_check_in: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardDecision {
    pub points: u32,
    pub reason: String,
    pub allowed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Bronze => write!(f, "Bronze"),
            Tier::Silver => write!(f, "Silver"),
            Tier::Gold => write!(f, "Gold"),
            Tier::Platinum => write!(f, "Platinum"),
        }
    }
}

/// Position within the current tier band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierProgress {
    pub current: u32,
    pub next: u32,
    /// 0-100, pinned at 100 for the top tier.
    pub percent: f64,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors raised while turning JSON-shaped requests into engine inputs.
///
/// The pure engine functions never produce these; they assume well-typed input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Missing required parameter: {0}")]
    MissingField(&'static str),
    #[error("Invalid rainIntensity '{0}'. Must be Low, Medium, or Heavy.")]
    InvalidRainIntensity(String),
    #[error("Invalid tideLevel '{0}'. Must be Low, Medium, or High.")]
    InvalidTideLevel(String),
    #[error("Invalid outcome '{0}'. Must be safe, detour, or flooded.")]
    InvalidOutcome(String),
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("Malformed request: {0}")]
    Malformed(String),
}

/// Errors from loading the district offset overlay.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse district table: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Duplicate district in offset table: {0}")]
    DuplicateDistrict(String),
    #[error("District offset table is empty")]
    EmptyDistrictTable,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_levels_are_totally_ordered() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_escalated_saturates_at_high() {
        assert_eq!(RiskLevel::Low.escalated(), RiskLevel::Medium);
        assert_eq!(RiskLevel::Medium.escalated(), RiskLevel::High);
        assert_eq!(RiskLevel::High.escalated(), RiskLevel::High);
    }

    #[test]
    fn test_at_least_never_lowers() {
        assert_eq!(RiskLevel::High.at_least(RiskLevel::Medium), RiskLevel::High);
        assert_eq!(RiskLevel::Low.at_least(RiskLevel::Medium), RiskLevel::Medium);
    }

    #[test]
    fn test_clamped_zeroes_negative_counts() {
        let inputs = FloodInputs::new(RainIntensity::Low, -12, -3, TideLevel::Low);
        let clamped = inputs.clamped();
        assert_eq!(clamped.water_level, 0);
        assert_eq!(clamped.citizen_reports, 0);
        assert_eq!(clamped.rain_intensity, RainIntensity::Low);
    }

    #[test]
    fn test_flood_inputs_use_camel_case_wire_names() {
        let json = r#"{"rainIntensity":"Heavy","waterLevel":55,"citizenReports":0,"tideLevel":"Medium"}"#;
        let inputs: FloodInputs = serde_json::from_str(json).expect("valid signal bundle");
        assert_eq!(inputs.rain_intensity, RainIntensity::Heavy);
        assert_eq!(inputs.water_level, 55);
    }

    #[test]
    fn test_alert_serializes_type_and_severity_spellings() {
        let alert = AlertData {
            id: 1,
            alert_type: AlertType::Weather,
            severity: RiskLevel::Medium,
            title: "Heavy Rain Warning".to_string(),
            location: "HCMC Metropolitan Area".to_string(),
            message: String::new(),
            time: "Just now".to_string(),
            is_read: false,
        };
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["type"], "weather");
        assert_eq!(value["severity"], "MEDIUM");
        assert_eq!(value["isRead"], false);
    }

    #[test]
    fn test_confidence_is_capped_and_omitted_when_absent() {
        let output = RiskOutput {
            risk: RiskLevel::Low,
            reasoning: vec![],
            confidence: None,
        };
        let value = serde_json::to_value(&output).unwrap();
        assert!(value.get("confidence").is_none());
        assert_eq!(output.with_confidence(250).confidence, Some(100));
    }

    #[test]
    fn test_confidence_accepts_any_number_and_clamps() {
        let read = |json: &str| serde_json::from_str::<RiskOutput>(json).unwrap().confidence;
        assert_eq!(read(r#"{"risk":"HIGH","reasoning":[],"confidence":87.6}"#), Some(88));
        assert_eq!(read(r#"{"risk":"HIGH","reasoning":[],"confidence":300}"#), Some(100));
        assert_eq!(read(r#"{"risk":"HIGH","reasoning":[],"confidence":-5}"#), Some(0));
        assert_eq!(read(r#"{"risk":"HIGH","reasoning":[],"confidence":null}"#), None);
        assert_eq!(read(r#"{"risk":"HIGH","reasoning":[]}"#), None);
    }
}
