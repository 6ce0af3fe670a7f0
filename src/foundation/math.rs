/// Clamp `v` into `[0, 1]`, mapping NaN to `0`.
pub(crate) fn clamp01(v: f64) -> f64 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// Linear falloff from `1` at `start` to `0` at `end`.
///
/// Callers guarantee `start < end`.
pub(crate) fn linear_falloff(x: f64, start: f64, end: f64) -> f64 {
    if x < start {
        return 1.0;
    }
    if x >= end {
        return 0.0;
    }
    clamp01(1.0 - (x - start) / (end - start))
}

/// Linear ramp from `0` at `start` to `1` at `start + span`.
pub(crate) fn linear_ramp(x: f64, start: f64, span: f64) -> f64 {
    if span <= 0.0 {
        return if x >= start { 1.0 } else { 0.0 };
    }
    clamp01((x - start) / span)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
