/// Derived overviews built on top of the risk classifier.
///
/// These are coarse summaries for the dashboard, not the authoritative
/// per-district risk.
///
/// Submodules:
/// - `districts` — per-district status from a city-wide base level.

pub mod districts;
