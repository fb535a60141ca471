//! JSON request parsing and validation.
//!
//! Mirrors the checks of the risk-calculation endpoint: missing fields are
//! reported first (in field order), then the rain and tide spellings.
//! Numeric fields may arrive as JSON numbers or numeric strings and must
//! be whole numbers. Negative counts are accepted here; the engine clamps them.

use serde_json::{Map, Value};

use crate::logging;
use crate::model::{
    FloodInputs, RainIntensity, RewardDecision, RiskOutput, TideLevel, TripData, TripOutcome,
    UserStats, ValidationError,
};
use crate::rewards;
use crate::risk::RuleSet;

// ============================================================================
// Field helpers
// ============================================================================

/// Parses raw request text into a JSON value.
pub fn parse_body(text: &str) -> Result<Value, ValidationError> {
    serde_json::from_str(text).map_err(|e| ValidationError::Malformed(e.to_string()))
}

fn as_object(body: &Value) -> Result<&Map<String, Value>, ValidationError> {
    body.as_object()
        .ok_or_else(|| ValidationError::Malformed("expected a JSON object".to_string()))
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn require_present(
    obj: &Map<String, Value>,
    fields: &[&'static str],
) -> Result<(), ValidationError> {
    match fields.iter().find(|f| is_missing(obj.get(**f))) {
        Some(field) => Err(ValidationError::MissingField(*field)),
        None => Ok(()),
    }
}

fn whole_number(obj: &Map<String, Value>, field: &'static str) -> Result<i64, ValidationError> {
    let invalid = |value: &Value| ValidationError::InvalidNumber {
        field,
        value: value.to_string(),
    };
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(value @ Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| invalid(value)),
        Some(value @ Value::String(s)) => s.trim().parse::<i64>().map_err(|_| invalid(value)),
        Some(value) => Err(invalid(value)),
    }
}

fn text<'a>(obj: &'a Map<String, Value>, field: &'static str) -> Result<&'a str, ValidationError> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.as_str()),
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(other) => Err(ValidationError::Malformed(format!(
            "{} must be a string, got {}",
            field, other
        ))),
    }
}

fn to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn to_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

// ============================================================================
// Typed parsers
// ============================================================================

pub fn parse_flood_inputs(body: &Value) -> Result<FloodInputs, ValidationError> {
    let obj = as_object(body)?;
    require_present(
        obj,
        &["rainIntensity", "waterLevel", "citizenReports", "tideLevel"],
    )?;

    let rain_raw = text(obj, "rainIntensity")?;
    let rain_intensity = RainIntensity::parse(rain_raw)
        .ok_or_else(|| ValidationError::InvalidRainIntensity(rain_raw.to_string()))?;

    let tide_raw = text(obj, "tideLevel")?;
    let tide_level = TideLevel::parse(tide_raw)
        .ok_or_else(|| ValidationError::InvalidTideLevel(tide_raw.to_string()))?;

    Ok(FloodInputs {
        rain_intensity,
        water_level: to_i32(whole_number(obj, "waterLevel")?),
        citizen_reports: to_i32(whole_number(obj, "citizenReports")?),
        tide_level,
    })
}

pub fn parse_trip(body: &Value) -> Result<TripData, ValidationError> {
    let obj = as_object(body)?;
    require_present(obj, &["distance", "duration", "outcome"])?;

    let outcome_raw = text(obj, "outcome")?;
    let outcome = TripOutcome::parse(outcome_raw)
        .ok_or_else(|| ValidationError::InvalidOutcome(outcome_raw.to_string()))?;

    Ok(TripData {
        distance: to_u32(whole_number(obj, "distance")?),
        duration: to_u32(whole_number(obj, "duration")?),
        outcome,
    })
}

pub fn parse_user_stats(body: &Value) -> Result<UserStats, ValidationError> {
    let obj = as_object(body)?;
    require_present(obj, &["dailyPoints", "currentStreak"])?;

    // An empty lastCheckIn means "never checked in", which is valid.
    let last_check_in = text(obj, "lastCheckIn")?.to_string();

    Ok(UserStats {
        daily_points: to_u32(whole_number(obj, "dailyPoints")?),
        current_streak: to_u32(whole_number(obj, "currentStreak")?),
        last_check_in,
    })
}

// ============================================================================
// Request evaluation
// ============================================================================

/// Validates a risk request body and classifies it under `rules`.
pub fn evaluate_risk_request(body: &Value, rules: RuleSet) -> Result<RiskOutput, ValidationError> {
    let inputs = parse_flood_inputs(body).inspect_err(|e| {
        logging::log_validation_failure("risk calculation", e);
    })?;
    Ok(rules.classify(&inputs))
}

/// Validates a trip confirmation and the caller's stats, then decides the reward.
pub fn evaluate_trip_request(
    trip_body: &Value,
    stats_body: &Value,
) -> Result<RewardDecision, ValidationError> {
    let trip = parse_trip(trip_body)
        .inspect_err(|e| logging::log_validation_failure("trip reward", e))?;
    let stats = parse_user_stats(stats_body)
        .inspect_err(|e| logging::log_validation_failure("trip reward", e))?;
    Ok(rewards::reward_trip(&trip, &stats))
}

// ============================================================================
// Tests
// ============================================================================
