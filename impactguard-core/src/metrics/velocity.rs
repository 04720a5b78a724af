//! Head velocity change over a window
//!
//! The estimator's running velocity drifts without bound, so impact velocity
//! is recomputed from scratch over a short window: the mean of the first few
//! linear acceleration vectors is taken as the residual offset, subtracted,
//! and the remainder integrated with the trapezoidal rule.

use crate::{
    constants::physics::MS_PER_SECOND,
    history::HistoryWindow,
    math::{self, Vec3},
    time,
};

/// Mean linear acceleration of the first `count` samples
fn offset<const N: usize>(window: &HistoryWindow<'_, N>, count: usize) -> Vec3 {
    let head = window.take(count.max(1));
    if head.is_empty() {
        return math::ZERO;
    }
    let sum = head
        .iter()
        .fold(math::ZERO, |acc, s| math::add(acc, s.linear_accel));
    math::scale(sum, 1.0 / head.len() as f32)
}

/// Velocity change (m/s) accumulated across the window after removing the
/// acceleration offset
///
/// Returns `0.0` for fewer than two samples.
pub fn window_velocity<const N: usize>(window: &HistoryWindow<'_, N>, offset_samples: usize) -> f32 {
    if window.len() < 2 {
        return 0.0;
    }

    let bias = offset(window, offset_samples);
    let mut samples = window.iter();
    let Some(mut prev) = samples.next() else {
        return 0.0;
    };

    let mut velocity = math::ZERO;
    for sample in samples {
        let dt = time::elapsed_ms(prev.timestamp, sample.timestamp) as f32 / MS_PER_SECOND;
        let a0 = math::sub(prev.linear_accel, bias);
        let a1 = math::sub(sample.linear_accel, bias);
        velocity = math::add(velocity, math::scale(math::add(a0, a1), 0.5 * dt));
        prev = sample;
    }
    math::norm(velocity)
}
