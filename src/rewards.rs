/// FlowPoints rewards and loyalty tiers.
///
/// Trip rewards are all-or-nothing: a trip either passes every check and
/// earns the fixed award, or earns nothing. Checks run in a fixed order and
/// the first failure decides the reason.
///
/// The daily cap is checked against the points earned *before* this trip.
/// A user at 95 points still receives the full 15, ending the day at 110;
/// only once the total has reached 100 are further trips refused.
///
/// # Clock injection
/// `daily_bonus_at` accepts the current instant rather than reading the
/// clock, so tests stay deterministic. `daily_bonus` wraps it with
/// `Utc::now()`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::logging::{self, Component};
use crate::model::{RewardDecision, Tier, TierProgress, TripData, TripOutcome, UserStats};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_TRIP_DISTANCE_M: u32 = 500;
pub const MIN_TRIP_DURATION_S: u32 = 300;
pub const DAILY_POINT_CAP: u32 = 100;
pub const SAFE_TRIP_POINTS: u32 = 15;

pub const DAILY_CHECK_IN_BONUS: u32 = 5;
pub const STREAK_BONUS: u32 = 50;
pub const STREAK_BONUS_DAYS: u32 = 7;

pub const SAFE_TRIP_REASON: &str = "Safe trip completion confirmed";

/// Offset-less check-in timestamps, with or without seconds.
const LOCAL_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Lower bound of each tier, ascending.
pub const TIER_THRESHOLDS: [(Tier, u32); 4] = [
    (Tier::Bronze, 0),
    (Tier::Silver, 500),
    (Tier::Gold, 2000),
    (Tier::Platinum, 5000),
];

// ---------------------------------------------------------------------------
// Trip rewards
// ---------------------------------------------------------------------------

/// Why a trip earned no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TripRejection {
    #[error("Trip too short (minimum 500m)")]
    TooShort,
    #[error("Trip too brief (minimum 5 minutes)")]
    TooBrief,
    #[error("Trip outcome not confirmed as safe")]
    OutcomeNotSafe,
    #[error("Daily earning limit reached (100 points)")]
    DailyLimitReached,
}

/// Runs the admissibility checks in order; the first failure wins.
pub fn check_trip(trip: &TripData, stats: &UserStats) -> Result<(), TripRejection> {
    if trip.distance < MIN_TRIP_DISTANCE_M {
        return Err(TripRejection::TooShort);
    }
    if trip.duration < MIN_TRIP_DURATION_S {
        return Err(TripRejection::TooBrief);
    }
    if trip.outcome != TripOutcome::Safe {
        return Err(TripRejection::OutcomeNotSafe);
    }
    if stats.daily_points >= DAILY_POINT_CAP {
        return Err(TripRejection::DailyLimitReached);
    }
    Ok(())
}

/// Decides the award for a confirmed trip. Never mutates `stats`.
pub fn reward_trip(trip: &TripData, stats: &UserStats) -> RewardDecision {
    match check_trip(trip, stats) {
        Ok(()) => RewardDecision {
            points: SAFE_TRIP_POINTS,
            reason: SAFE_TRIP_REASON.to_string(),
            allowed: true,
        },
        Err(rejection) => {
            logging::debug(Component::Rewards, None, &format!("trip rejected: {}", rejection));
            RewardDecision {
                points: 0,
                reason: rejection.to_string(),
                allowed: false,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Bonuses
// ---------------------------------------------------------------------------

/// Calendar day of the last check-in, as seen in `tz`.
///
/// Accepts RFC 3339 timestamps, ISO 8601 local timestamps without an offset
/// (read as wall-clock time in `tz`), or bare `YYYY-MM-DD` dates. Returns
/// `None` for anything else.
fn check_in_day<Tz: TimeZone>(last_check_in: &str, tz: &Tz) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(last_check_in) {
        return Some(ts.with_timezone(tz).date_naive());
    }
    LOCAL_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(last_check_in, fmt).ok())
        .map(|local| local.date())
        .or_else(|| NaiveDate::parse_from_str(last_check_in, "%Y-%m-%d").ok())
}

/// 5 points unless the last check-in fell on the same calendar day as `now`.
///
/// An unreadable check-in timestamp never matches today, so it earns the bonus.
pub fn daily_bonus_at<Tz: TimeZone>(stats: &UserStats, now: &DateTime<Tz>) -> u32 {
    match check_in_day(&stats.last_check_in, &now.timezone()) {
        Some(day) if day == now.date_naive() => 0,
        Some(_) => DAILY_CHECK_IN_BONUS,
        None => {
            logging::debug(
                Component::Rewards,
                None,
                &format!("unreadable lastCheckIn '{}'", stats.last_check_in),
            );
            DAILY_CHECK_IN_BONUS
        }
    }
}

/// Convenience wrapper that uses the real current time.
/// Use `daily_bonus_at` in tests to keep them deterministic.
pub fn daily_bonus(stats: &UserStats) -> u32 {
    daily_bonus_at(stats, &Utc::now())
}

pub fn streak_bonus(streak: u32) -> u32 {
    if streak >= STREAK_BONUS_DAYS {
        STREAK_BONUS
    } else {
        0
    }
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

pub fn tier(total_points: u32) -> Tier {
    TIER_THRESHOLDS
        .iter()
        .rev()
        .find(|(_, floor)| total_points >= *floor)
        .map(|(tier, _)| *tier)
        .unwrap_or(Tier::Bronze)
}

/// Progress through the current tier band, pinned at 100 for Platinum.
pub fn tier_progress(total_points: u32) -> TierProgress {
    let index = TIER_THRESHOLDS
        .iter()
        .rposition(|(_, floor)| total_points >= *floor)
        .unwrap_or(0);
    let current = TIER_THRESHOLDS[index].1;

    match TIER_THRESHOLDS.get(index + 1) {
        Some(&(_, next)) => TierProgress {
            current,
            next,
            percent: f64::from(total_points - current) / f64::from(next - current) * 100.0,
        },
        None => TierProgress {
            current,
            next: current,
            percent: 100.0,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
