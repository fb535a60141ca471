/// Boundary input handling.
///
/// Turns JSON-shaped request bodies into well-typed engine inputs, failing
/// fast with a descriptive `ValidationError`. The engine functions behind
/// this module assume their input is already valid.
///
/// Submodules:
/// - `request` — field extraction, validation, and request evaluation.

pub mod request;
