//! Sub-step scheduling for a real-time tick.

use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Number of integration sub-steps that cover one host period at `rate_hz`
///
/// Computes `ceil(period · rate)` in integer nanoseconds, so a 1 ms period at
/// 40 kHz gives exactly 40. Never returns less than one.
pub fn steps_per_tick(period: Duration, rate_hz: u32) -> u32 {
    let steps = (period.as_nanos() * rate_hz as u128).div_ceil(NANOS_PER_SEC);
    steps.clamp(1, u32::MAX as u128) as u32
}

/// Sub-step size (s) when `period` is split into `steps` equal parts
pub fn sub_step_sec(period: Duration, steps: u32) -> f64 {
    period.as_secs_f64() / steps.max(1) as f64
}
