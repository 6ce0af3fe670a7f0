//! Timing calculus: named scroll durations and the pure functions deriving section heights,
//! card reveal thresholds and hold/fade zones from them.

pub(crate) mod calculus;
pub(crate) mod constants;
