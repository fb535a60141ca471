//! Plain-language explanations of classifier and route output.
//!
//! Pure string templating: no state, no randomness. An explanation request
//! whose kind is not recognised yields [`FALLBACK_EXPLANATION`] instead of
//! an error.

use serde::{Deserialize, Serialize};

use crate::logging::{self, Component};
use crate::model::{RiskLevel, RiskOutput, RouteRecommendation};

pub const FALLBACK_EXPLANATION: &str = "Analysis not available";

const ASSISTANT_NAME: &str = "FlowGuard AI";

/// Context behind a raised alert, as shown in the alert detail sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertContext {
    pub trigger_reason: String,
    pub conditions: String,
    pub duration: String,
}

/// The payloads an explanation can be generated for.
#[derive(Debug, Clone, Copy)]
pub enum Explainable<'a> {
    Risk(&'a RiskOutput),
    Route(&'a RouteRecommendation),
    Alert(&'a AlertContext),
}

pub fn explain(payload: Explainable<'_>) -> String {
    match payload {
        Explainable::Risk(output) => explain_risk(output),
        Explainable::Route(route) => explain_route(route),
        Explainable::Alert(alert) => explain_alert(alert),
    }
}

/// Explains a JSON payload tagged by `kind` (`"risk"`, `"route"`, `"alert"`).
///
/// Unknown kinds and payloads that do not match the kind's shape both
/// return the fallback text.
pub fn explain_json(kind: &str, payload: &serde_json::Value) -> String {
    let explained = match kind {
        "risk" => serde_json::from_value::<RiskOutput>(payload.clone())
            .ok()
            .map(|o| explain_risk(&o)),
        "route" => serde_json::from_value::<RouteRecommendation>(payload.clone())
            .ok()
            .map(|r| explain_route(&r)),
        "alert" => serde_json::from_value::<AlertContext>(payload.clone())
            .ok()
            .map(|a| explain_alert(&a)),
        _ => None,
    };
    explained.unwrap_or_else(|| {
        logging::debug(
            Component::Explain,
            None,
            &format!("no explanation for kind '{}'", kind),
        );
        FALLBACK_EXPLANATION.to_string()
    })
}

fn call_to_action(risk: RiskLevel) -> &'static str {
    match risk {
        RiskLevel::High => "We strongly recommend avoiding travel in this area.",
        RiskLevel::Medium => "Use caution and plan alternate routes where possible.",
        RiskLevel::Low => "Conditions are currently safe for normal travel.",
    }
}

fn explain_risk(output: &RiskOutput) -> String {
    let mut parts = vec![format!(
        "{} detected {} risk conditions.",
        ASSISTANT_NAME,
        output.risk.as_str().to_lowercase()
    )];
    if !output.reasoning.is_empty() {
        parts.push(format!("{}.", output.reasoning.join(". ")));
    }
    parts.push(call_to_action(output.risk).to_string());
    if let Some(confidence) = output.confidence {
        parts.push(format!("Confidence level: {}%.", confidence));
    }
    parts.join(" ")
}

fn explain_route(route: &RouteRecommendation) -> String {
    let path = route.waypoints.join(" → ");
    if route.avoid_streets.is_empty() {
        format!(
            "This route via {} is currently safe with {}% safety score and no major flood risks detected.",
            path, route.safety_score
        )
    } else {
        format!(
            "This route avoids {} due to elevated flood risk. The suggested path via {} provides safer conditions with {}% safety score.",
            route.avoid_streets.join(", "),
            path,
            route.safety_score
        )
    }
}

fn explain_alert(alert: &AlertContext) -> String {
    format!(
        "Alert triggered due to {}. Current conditions: {}. Expected duration: {}.",
        alert.trigger_reason, alert.conditions, alert.duration
    )
}

// ---------------------------------------------------------------------------
// Action recommendation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecommendation {
    pub action: String,
    /// Icon name understood by the client's icon set.
    pub icon: String,
    pub priority: RiskLevel,
}

/// The single headline action shown on the home screen for a risk level.
pub fn action_recommendation(risk: RiskLevel) -> ActionRecommendation {
    let (action, icon) = match risk {
        RiskLevel::High => ("Stay indoors and avoid all non-essential travel", "alert-triangle"),
        RiskLevel::Medium => (
            "Plan your route carefully and avoid low-lying areas",
            "alert-circle",
        ),
        RiskLevel::Low => ("Normal travel conditions - stay informed", "check-circle"),
    };
    ActionRecommendation {
        action: action.to_string(),
        icon: icon.to_string(),
        priority: risk,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn route(avoid: &[&str], score: u8) -> RouteRecommendation {
        RouteRecommendation {
            waypoints: vec!["Huỳnh Tấn Phát".to_string(), "Nguyễn Văn Linh".to_string()],
            avoid_streets: avoid.iter().map(|s| s.to_string()).collect(),
            safety_score: score,
            reasoning: String::new(),
            estimated_time: 20,
        }
    }

    #[test]
    fn test_risk_explanation_joins_reasons_and_confidence() {
        let output = RiskOutput {
            risk: RiskLevel::High,
            reasoning: vec!["Reason one".to_string(), "Reason two".to_string()],
            confidence: Some(90),
        };
        assert_eq!(
            explain(Explainable::Risk(&output)),
            "FlowGuard AI detected high risk conditions. Reason one. Reason two. \
             We strongly recommend avoiding travel in this area. Confidence level: 90%."
        );
    }

    #[test]
    fn test_risk_explanation_without_reasons_or_confidence() {
        let output = RiskOutput {
            risk: RiskLevel::Low,
            reasoning: vec![],
            confidence: None,
        };
        assert_eq!(
            explain(Explainable::Risk(&output)),
            "FlowGuard AI detected low risk conditions. Conditions are currently safe for normal travel."
        );
    }

    #[test]
    fn test_route_templates_depend_on_avoid_list() {
        let clear = explain(Explainable::Route(&route(&[], 85)));
        assert!(clear.starts_with("This route via Huỳnh Tấn Phát → Nguyễn Văn Linh is currently safe"));
        assert!(clear.contains("85% safety score"));

        let risky = explain(Explainable::Route(&route(&["Huỳnh Tấn Phát"], 50)));
        assert!(risky.starts_with("This route avoids Huỳnh Tấn Phát due to elevated flood risk."));
    }

    #[test]
    fn test_alert_explanation() {
        let ctx = AlertContext {
            trigger_reason: "rapid water rise".to_string(),
            conditions: "heavy rain, high tide".to_string(),
            duration: "2 hours".to_string(),
        };
        assert_eq!(
            explain(Explainable::Alert(&ctx)),
            "Alert triggered due to rapid water rise. Current conditions: heavy rain, high tide. Expected duration: 2 hours."
        );
    }

    #[test]
    fn test_unknown_kind_returns_fallback() {
        assert_eq!(explain_json("forecast", &json!({})), FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_mismatched_payload_returns_fallback() {
        assert_eq!(explain_json("route", &json!({"risk": "HIGH"})), FALLBACK_EXPLANATION);
    }

    #[test]
    fn test_json_risk_payload_is_explained() {
        let text = explain_json(
            "risk",
            &json!({"risk": "MEDIUM", "reasoning": ["Heavy rain raising flood risk above 30cm"]}),
        );
        assert!(text.contains("medium risk"));
        assert!(text.contains("Use caution"));
    }

    #[test]
    fn test_fractional_confidence_is_still_explained() {
        let text = explain_json(
            "risk",
            &json!({"risk": "HIGH", "reasoning": [], "confidence": 92.5}),
        );
        assert_ne!(text, FALLBACK_EXPLANATION);
        assert!(text.ends_with("Confidence level: 93%."), "got '{}'", text);
    }

    #[test]
    fn test_action_recommendation_priorities() {
        assert_eq!(action_recommendation(RiskLevel::High).icon, "alert-triangle");
        assert_eq!(action_recommendation(RiskLevel::Medium).priority, RiskLevel::Medium);
        assert!(action_recommendation(RiskLevel::Low).action.starts_with("Normal travel"));
    }
}
