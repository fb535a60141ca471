/// Structured logging for the flood decision engine
///
/// Provides context-rich log lines tagged with the engine component and,
/// where relevant, the district the decision concerns. Lines are emitted
/// through the `log` facade on the `flowguard` target; the embedding
/// application chooses and installs the logger.

use std::fmt;

/// Log target shared by every line the engine emits.
pub const LOG_TARGET: &str = "flowguard";

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Classifier,
    Projector,
    Aggregator,
    Alerts,
    Sensors,
    Routing,
    Rewards,
    Explain,
    Boundary,
    Config,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Component::Classifier => write!(f, "RISK"),
            Component::Projector => write!(f, "PROJ"),
            Component::Aggregator => write!(f, "DIST"),
            Component::Alerts => write!(f, "ALRT"),
            Component::Sensors => write!(f, "SENS"),
            Component::Routing => write!(f, "ROUT"),
            Component::Rewards => write!(f, "RWRD"),
            Component::Explain => write!(f, "EXPL"),
            Component::Boundary => write!(f, "API"),
            Component::Config => write!(f, "CONF"),
        }
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Formats a line as `"<COMP> [district]: message"`.
pub fn format_entry(component: Component, district: Option<&str>, message: &str) -> String {
    let district_part = district.map(|d| format!(" [{}]", d)).unwrap_or_default();
    format!("{}{}: {}", component, district_part, message)
}

fn emit(level: log::Level, component: Component, district: Option<&str>, message: &str) {
    if log::log_enabled!(target: LOG_TARGET, level) {
        log::log!(target: LOG_TARGET, level, "{}", format_entry(component, district, message));
    }
}

/// Log a rule firing or other fine-grained decision step
pub fn debug(component: Component, district: Option<&str>, message: &str) {
    emit(log::Level::Debug, component, district, message);
}

/// Log a warning message
pub fn warn(component: Component, district: Option<&str>, message: &str) {
    emit(log::Level::Warn, component, district, message);
}

// ---------------------------------------------------------------------------
// Boundary Failure Logging
// ---------------------------------------------------------------------------

/// Log a rejected boundary request. Validation failures are the caller's
/// to surface (HTTP 400); the line is a warning, not an error.
pub fn log_validation_failure(operation: &str, err: &dyn std::error::Error) {
    warn(
        Component::Boundary,
        None,
        &format!("{} rejected: {}", operation, err),
    );
}

/// Log a summary of one alert synthesis batch
pub fn log_alert_batch_summary(total: usize, high: usize, medium: usize) {
    let message = format!(
        "Synthesized {} alerts ({} high, {} medium)",
        total, high, medium
    );

    debug(Component::Alerts, None, &message);
}
