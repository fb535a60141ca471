//! FlowGuard decision engine.
//!
//! Rule-based flood risk classification for Ho Chi Minh City, plus the
//! derived views built on it: a short-horizon water-level projection,
//! per-district status, synthesized alerts, sensor readings, route safety
//! scores, FlowPoints rewards, and plain-language explanations.
//!
//! Every operation is a pure function of its arguments, with two exceptions
//! that each have an injectable variant: route time jitter
//! (`routing::score_route_with_rng`) and the daily check-in comparison
//! (`rewards::daily_bonus_at`). Nothing here stores state or talks to the
//! network.
//!
//! Log output goes through the `log` facade under the `flowguard` target;
//! the embedding application chooses the logger.

pub mod alert;
pub mod analysis;
pub mod config;
pub mod districts;
pub mod explain;
pub mod forecast;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod rewards;
pub mod risk;
pub mod routing;
pub mod sensors;

pub use model::{FloodInputs, RainIntensity, RiskLevel, RiskOutput, TideLevel, ValidationError};
pub use risk::{RuleSet, classify};
