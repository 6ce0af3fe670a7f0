use super::*;

#[test]
fn clamp01_handles_nan_and_bounds() {
    assert_eq!(clamp01(f64::NAN), 0.0);
    assert_eq!(clamp01(-0.5), 0.0);
    assert_eq!(clamp01(1.5), 1.0);
    assert_eq!(clamp01(0.25), 0.25);
}

#[test]
fn falloff_is_one_before_start_and_zero_at_end() {
    assert_eq!(linear_falloff(5.0, 10.0, 20.0), 1.0);
    assert_eq!(linear_falloff(10.0, 10.0, 20.0), 1.0);
    assert!((linear_falloff(15.0, 10.0, 20.0) - 0.5).abs() < 1e-12);
    assert_eq!(linear_falloff(20.0, 10.0, 20.0), 0.0);
}

#[test]
fn ramp_with_zero_span_is_a_step() {
    assert_eq!(linear_ramp(4.0, 5.0, 0.0), 0.0);
    assert_eq!(linear_ramp(5.0, 5.0, 0.0), 1.0);
    assert!((linear_ramp(7.5, 5.0, 5.0) - 0.5).abs() < 1e-12);
}
