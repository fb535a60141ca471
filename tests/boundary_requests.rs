//! Boundary handling: JSON request bodies in, typed results or
//! `ValidationError`s out.

use flowguard_engine::explain::{FALLBACK_EXPLANATION, explain_json};
use flowguard_engine::ingest::request::{evaluate_risk_request, parse_body};
use flowguard_engine::model::{RiskLevel, ValidationError};
use flowguard_engine::risk::RuleSet;
use serde_json::json;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_raw_request_text_is_classified() {
    init_logging();
    let body = parse_body(
        r#"{"rainIntensity":"Low","waterLevel":"45","citizenReports":4,"tideLevel":"High"}"#,
    )
    .expect("well-formed JSON");
    let out = evaluate_risk_request(&body, RuleSet::default()).expect("valid request");
    assert_eq!(out.risk, RiskLevel::High);
    assert_eq!(out.reasoning.len(), 2);
}

#[test]
fn test_missing_field_message_names_the_field() {
    init_logging();
    let body = json!({"rainIntensity": "Heavy", "citizenReports": 0, "tideLevel": "Low"});
    let err = evaluate_risk_request(&body, RuleSet::V1).expect_err("waterLevel is missing");
    assert_eq!(err, ValidationError::MissingField("waterLevel"));
    assert_eq!(err.to_string(), "Missing required parameter: waterLevel");
}

#[test]
fn test_rain_spelling_is_checked_before_tide() {
    let body = json!({
        "rainIntensity": "Torrential",
        "waterLevel": 40,
        "citizenReports": 0,
        "tideLevel": "King"
    });
    assert_eq!(
        evaluate_risk_request(&body, RuleSet::V1),
        Err(ValidationError::InvalidRainIntensity("Torrential".to_string()))
    );
}

#[test]
fn test_classifier_output_feeds_explanation() {
    let body = json!({"rainIntensity": "Heavy", "waterLevel": 55, "citizenReports": 0, "tideLevel": "Medium"});
    let out = evaluate_risk_request(&body, RuleSet::V2).expect("valid request");
    let payload = serde_json::to_value(&out).expect("output serializes");
    let text = explain_json("risk", &payload);
    assert!(text.starts_with("FlowGuard AI detected high risk conditions."));
    assert!(text.ends_with(&format!("Confidence level: {}%.", out.confidence.unwrap_or(0))));
}

#[test]
fn test_unknown_explanation_kind_falls_back() {
    assert_eq!(explain_json("weather", &json!({})), FALLBACK_EXPLANATION);
}
