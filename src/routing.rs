//! Route safety scoring.
//!
//! Not a path finder. The waypoint list comes from a small fixed street
//! table keyed by origin and destination district; each street takes its
//! risk from the caller's per-street map (MEDIUM when absent) and deducts
//! from a starting score of 100.
//!
//! Safety score and avoid-list are deterministic. Estimated time carries a
//! 0-9 minute jitter; pass a seeded `Rng` to `score_route_with_rng` when the
//! exact value matters.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::logging::{self, Component};
use crate::model::{Location, RiskLevel, RouteRecommendation, RouteSegment};

// ---------------------------------------------------------------------------
// Street table
// ---------------------------------------------------------------------------

/// Streets prepended when the trip starts in the given district.
static ORIGIN_STREETS: &[(&str, &str)] = &[("District 7", "Huỳnh Tấn Phát")];

/// Arterial every route uses.
pub const TRUNK_STREET: &str = "Nguyễn Văn Linh";

/// Streets appended when the trip ends in the given district.
static DESTINATION_STREETS: &[(&str, &str)] = &[
    ("District 1", "Võ Văn Kiệt"),
    ("District 4", "Võ Văn Kiệt"),
];

/// Risk assumed for a street missing from the caller's map.
pub const DEFAULT_STREET_RISK: RiskLevel = RiskLevel::Medium;

// ---------------------------------------------------------------------------
// Scoring constants
// ---------------------------------------------------------------------------

pub const START_SCORE: i32 = 100;
pub const HIGH_PENALTY: i32 = 30;
pub const MEDIUM_PENALTY: i32 = 15;
pub const LOW_PENALTY: i32 = 5;

pub const SAFE_SCORE: u8 = 70;
pub const CAUTION_SCORE: u8 = 40;

pub const BASE_MINUTES: u32 = 15;
pub const MAX_JITTER_MINUTES: u32 = 9;
pub const MINUTES_PER_AVOIDED_STREET: u32 = 5;

// ---------------------------------------------------------------------------
// Route building
// ---------------------------------------------------------------------------

/// Looks up the fixed 1-3 street waypoint list for an origin/destination pair.
pub fn route_streets(origin_district: &str, destination_district: &str) -> Vec<&'static str> {
    let mut streets = Vec::with_capacity(3);
    streets.extend(
        ORIGIN_STREETS
            .iter()
            .filter(|(district, _)| *district == origin_district)
            .map(|(_, street)| *street),
    );
    streets.push(TRUNK_STREET);
    streets.extend(
        DESTINATION_STREETS
            .iter()
            .filter(|(district, _)| *district == destination_district)
            .map(|(_, street)| *street),
    );
    streets
}

/// Scored segments along the route, each with its looked-up risk.
pub fn route_segments(
    origin: &Location,
    destination: &Location,
    street_risk: &HashMap<String, RiskLevel>,
) -> Vec<RouteSegment> {
    route_streets(&origin.district, &destination.district)
        .into_iter()
        .map(|street| RouteSegment {
            street: street.to_string(),
            risk_level: street_risk.get(street).copied().unwrap_or(DEFAULT_STREET_RISK),
        })
        .collect()
}

/// Score after per-segment deductions, floored at 0, plus the streets to avoid.
pub fn score_segments(segments: &[RouteSegment]) -> (u8, Vec<String>) {
    let mut score = START_SCORE;
    let mut avoid = Vec::new();
    for segment in segments {
        score -= match segment.risk_level {
            RiskLevel::High => {
                avoid.push(segment.street.clone());
                HIGH_PENALTY
            }
            RiskLevel::Medium => MEDIUM_PENALTY,
            RiskLevel::Low => LOW_PENALTY,
        };
    }
    (score.max(0) as u8, avoid)
}

fn reasoning(score: u8, segments: &[RouteSegment], avoid: &[String]) -> String {
    if score >= SAFE_SCORE {
        let low = segments
            .iter()
            .filter(|s| s.risk_level == RiskLevel::Low)
            .count();
        format!("This route is relatively safe with {} low-risk segments.", low)
    } else if score >= CAUTION_SCORE {
        format!(
            "This route has some risk. Consider alternate paths to avoid {} problem areas.",
            avoid.len()
        )
    } else {
        "This route is not recommended due to multiple high-risk segments.".to_string()
    }
}

/// Scores a route using the thread-local RNG for the time jitter.
pub fn score_route(
    origin: &Location,
    destination: &Location,
    street_risk: &HashMap<String, RiskLevel>,
) -> RouteRecommendation {
    score_route_with_rng(origin, destination, street_risk, &mut rand::thread_rng())
}

/// Scores a route, drawing the time jitter from `rng`.
pub fn score_route_with_rng<R: Rng>(
    origin: &Location,
    destination: &Location,
    street_risk: &HashMap<String, RiskLevel>,
    rng: &mut R,
) -> RouteRecommendation {
    let segments = route_segments(origin, destination, street_risk);
    let (safety_score, avoid_streets) = score_segments(&segments);
    let jitter = rng.gen_range(0..=MAX_JITTER_MINUTES);
    let estimated_time =
        BASE_MINUTES + jitter + MINUTES_PER_AVOIDED_STREET * avoid_streets.len() as u32;

    logging::debug(
        Component::Routing,
        Some(&origin.district),
        &format!(
            "to {}: score {} avoiding {} streets",
            destination.district,
            safety_score,
            avoid_streets.len()
        ),
    );

    RouteRecommendation {
        waypoints: segments.iter().map(|s| s.street.clone()).collect(),
        reasoning: reasoning(safety_score, &segments, &avoid_streets),
        avoid_streets,
        safety_score,
        estimated_time,
    }
}

// ---------------------------------------------------------------------------
// Alternatives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alternative {
    pub street: String,
    pub reason: String,
}

static ALTERNATIVES: &[(&str, &str, &str)] = &[
    ("Huỳnh Tấn Phát", "Nguyễn Thị Thập", "Lower elevation, better drainage"),
    ("Nguyễn Hữu Cảnh", "Điện Biên Phủ", "Elevated roadway, flood resistant"),
];

/// Known detours for streets on the avoid-list, in table order.
pub fn suggested_alternatives(avoid_streets: &[String]) -> Vec<Alternative> {
    ALTERNATIVES
        .iter()
        .filter(|(avoided, _, _)| avoid_streets.iter().any(|s| s == avoided))
        .map(|(_, street, reason)| Alternative {
            street: street.to_string(),
            reason: reason.to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
