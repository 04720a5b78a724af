//! Motion scenarios
//!
//! Raw sample streams for the situations the engine must handle: a helmet at
//! rest, steady riding, and a crash. All streams are level (gravity on +Z)
//! unless stated otherwise.

use impactguard_core::{constants::STANDARD_GRAVITY, math::Vec3, RawSample};

use super::harness::TestRng;

pub const GRAVITY: Vec3 = [0.0, 0.0, STANDARD_GRAVITY];

/// Helmet at rest, `count` samples every `step_ms`
pub fn resting(start: u32, count: u32, step_ms: u32) -> Vec<RawSample> {
    (0..count)
        .map(|i| RawSample::new(start + i * step_ms, GRAVITY, [0.0; 3]))
        .collect()
}

/// Helmet at rest with sensor noise and a constant bias
pub fn noisy_resting(
    rng: &mut TestRng,
    start: u32,
    count: u32,
    step_ms: u32,
    accel_bias: Vec3,
    gyro_bias: Vec3,
) -> Vec<RawSample> {
    (0..count)
        .map(|i| {
            let a = rng.gen_vec3(0.02);
            let g = rng.gen_vec3(0.002);
            RawSample::new(
                start + i * step_ms,
                [
                    GRAVITY[0] + accel_bias[0] + a[0],
                    GRAVITY[1] + accel_bias[1] + a[1],
                    GRAVITY[2] + accel_bias[2] + a[2],
                ],
                [gyro_bias[0] + g[0], gyro_bias[1] + g[1], gyro_bias[2] + g[2]],
            )
        })
        .collect()
}

/// Single sample with `g` of linear acceleration along +X on top of gravity
pub fn spike(timestamp: u32, g: f32) -> RawSample {
    RawSample::new(timestamp, [g * STANDARD_GRAVITY, 0.0, STANDARD_GRAVITY], [0.0; 3])
}

/// Spike plus a head rotation (rad/s)
pub fn rotating_spike(timestamp: u32, g: f32, angular_rate: Vec3) -> RawSample {
    RawSample::new(
        timestamp,
        [g * STANDARD_GRAVITY, 0.0, STANDARD_GRAVITY],
        angular_rate,
    )
}

/// Calibration at rest, then a half-sine crash pulse of `peak_g` lasting
/// `pulse_ms`, sampled every `step_ms`, then rest again
pub fn crash(calibration: u32, step_ms: u32, peak_g: f32, pulse_ms: u32) -> Vec<RawSample> {
    let mut samples = resting(0, calibration, step_ms);
    let start = calibration * step_ms;
    let pulse_samples = (pulse_ms / step_ms).max(1);

    for i in 0..=pulse_samples {
        let phase = core::f32::consts::PI * i as f32 / pulse_samples as f32;
        let g = peak_g * phase.sin();
        samples.push(rotating_spike(start + i * step_ms, g, [0.0, 20.0 * phase.sin(), 0.0]));
    }

    let after = start + (pulse_samples + 1) * step_ms;
    samples.extend(resting(after, 20, step_ms));
    samples
}
