//! Flood risk classification.
//!
//! Submodules:
//! - `classifier` — the canonical (v1) escalation-only rule set.
//! - `v2` — the rule set served by the risk-calculation endpoint, kept
//!   reachable under an explicit label.

pub mod classifier;
pub mod v2;

use serde::{Deserialize, Serialize};

use crate::model::{FloodInputs, RiskOutput};

pub use classifier::{classify, trace, RiskTrace, RuleGroup, RuleStep};

/// Which rule set a caller wants evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSet {
    #[default]
    V1,
    V2,
}

impl RuleSet {
    pub fn classify(&self, inputs: &FloodInputs) -> RiskOutput {
        match self {
            RuleSet::V1 => classifier::classify(inputs),
            RuleSet::V2 => v2::classify(inputs),
        }
    }
}
