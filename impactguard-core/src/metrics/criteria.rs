//! Head injury criteria over history windows
//!
//! ## HIC
//!
//! ```text
//! HIC = max over [t1, t2] with t2 - t1 ≤ T of
//!       (t2 - t1) · [ 1/(t2 - t1) ∫ a(t) dt ]^2.5        a in g, t in s
//! ```
//!
//! Source: NHTSA, FMVSS 208 (HIC15, T = 15 ms)
//!
//! ## RIC
//!
//! Same form as HIC over angular acceleration magnitude (rad/s²).
//!
//! Source: Kimpara & Iwamoto, 2012
//!
//! ## BrIC
//!
//! ```text
//! BrIC = sqrt( (ωx/ωxC)² + (ωy/ωyC)² + (ωz/ωzC)² )     peak |ω| per axis
//! ```
//!
//! Source: Takhounts et al., 2013
//!
//! ## Gadd Severity Index
//!
//! ```text
//! SI = ∫ a(t)^2.5 dt                                    a in g, t in s
//! ```
//!
//! Source: Gadd, 1966
//!
//! All criteria return `0.0` when the window holds too few samples.

use crate::{
    constants::{physics::MS_PER_SECOND, injury::SEVERITY_EXPONENT, STANDARD_GRAVITY},
    history::HistoryWindow,
    math::{self, Vec3},
    time::{self, Timestamp},
};

/// Seconds from `origin` to `t`
fn seconds_since(origin: Timestamp, t: Timestamp) -> f32 {
    time::elapsed_ms(origin, t) as f32 / MS_PER_SECOND
}

/// `max ΔT · (mean a)^2.5` over every interval of at most `max_duration` s
///
/// `time_at(i)` must be non-decreasing. The mean is the trapezoidal integral
/// divided by the interval length.
fn severity_index<T, A>(len: usize, max_duration: f32, time_at: T, value_at: A) -> f32
where
    T: Fn(usize) -> f32,
    A: Fn(usize) -> f32,
{
    let mut best = 0.0f32;
    for i in 0..len {
        let t_start = time_at(i);
        let mut integral = 0.0f32;
        for j in (i + 1)..len {
            let (t_prev, t_cur) = (time_at(j - 1), time_at(j));
            integral += 0.5 * (value_at(j - 1) + value_at(j)) * (t_cur - t_prev);

            let duration = t_cur - t_start;
            if duration > max_duration {
                break;
            }
            if duration <= 0.0 || integral <= 0.0 {
                continue;
            }

            let mean = integral / duration;
            let candidate = duration * libm::powf(mean, SEVERITY_EXPONENT);
            if candidate.is_finite() && candidate > best {
                best = candidate;
            }
        }
    }
    best
}

/// Head Injury Criterion over the window, intervals up to `max_duration_ms`
pub fn hic<const N: usize>(window: &HistoryWindow<'_, N>, max_duration_ms: u32) -> f32 {
    let Some(origin) = window.first().map(|s| s.timestamp) else {
        return 0.0;
    };
    severity_index(
        window.len(),
        max_duration_ms as f32 / MS_PER_SECOND,
        |i| window.get(i).map_or(0.0, |s| seconds_since(origin, s.timestamp)),
        |i| window.get(i).map_or(0.0, |s| s.linear_accel_g()),
    )
}

/// Rotational Injury Criterion over the window, intervals up to
/// `max_duration_ms`
///
/// Angular acceleration is the finite difference of angular rate between
/// consecutive samples, stamped at the later sample. Pairs with no elapsed
/// time contribute zero.
pub fn ric<const N: usize>(window: &HistoryWindow<'_, N>, max_duration_ms: u32) -> f32 {
    let Some(origin) = window.first().map(|s| s.timestamp) else {
        return 0.0;
    };
    if window.len() < 3 {
        return 0.0;
    }

    let angular_accel = |k: usize| -> f32 {
        match (window.get(k), window.get(k + 1)) {
            (Some(a), Some(b)) => {
                let dt = seconds_since(a.timestamp, b.timestamp);
                if dt > 0.0 {
                    math::norm(math::sub(b.angular_rate, a.angular_rate)) / dt
                } else {
                    0.0
                }
            }
            _ => 0.0,
        }
    };

    severity_index(
        window.len() - 1,
        max_duration_ms as f32 / MS_PER_SECOND,
        |k| window.get(k + 1).map_or(0.0, |s| seconds_since(origin, s.timestamp)),
        angular_accel,
    )
}

/// Brain Injury Criterion from peak per-axis angular rate in the window
pub fn bric<const N: usize>(window: &HistoryWindow<'_, N>, critical: Vec3) -> f32 {
    if window.is_empty() {
        return 0.0;
    }

    let mut peak = math::ZERO;
    for sample in window.iter() {
        for axis in 0..3 {
            peak[axis] = peak[axis].max(math::abs(sample.angular_rate[axis]));
        }
    }

    let mut sum = 0.0;
    for axis in 0..3 {
        if critical[axis] > 0.0 {
            let ratio = peak[axis] / critical[axis];
            sum += ratio * ratio;
        }
    }
    libm::sqrtf(sum)
}

/// Gadd Severity Index over the window
pub fn gadd_si<const N: usize>(window: &HistoryWindow<'_, N>) -> f32 {
    let mut samples = window.iter();
    let Some(mut prev) = samples.next() else {
        return 0.0;
    };

    let mut si = 0.0;
    for sample in samples {
        let dt = seconds_since(prev.timestamp, sample.timestamp);
        let a0 = libm::powf(prev.linear_accel_g(), SEVERITY_EXPONENT);
        let a1 = libm::powf(sample.linear_accel_g(), SEVERITY_EXPONENT);
        si += 0.5 * (a0 + a1) * dt;
        prev = sample;
    }
    si
}

/// Largest linear acceleration magnitude in the window (m/s²)
pub fn peak_linear_accel<const N: usize>(window: &HistoryWindow<'_, N>) -> f32 {
    window
        .iter()
        .map(|s| s.linear_accel_magnitude)
        .fold(0.0, f32::max)
}

/// Largest linear acceleration in the window (g)
pub fn peak_linear_accel_g<const N: usize>(window: &HistoryWindow<'_, N>) -> f32 {
    peak_linear_accel(window) / STANDARD_GRAVITY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{history::History, sample::{RawSample, Sample}};

    fn sample(timestamp: Timestamp, g: f32, angular_rate: Vec3) -> Sample {
        let mut s = Sample::from_raw(&RawSample::new(timestamp, [0.0; 3], [0.0; 3]));
        s.linear_accel = [g * STANDARD_GRAVITY, 0.0, 0.0];
        s.linear_accel_magnitude = g * STANDARD_GRAVITY;
        s.angular_rate = angular_rate;
        s
    }

    fn constant(g: f32, step_ms: u32, count: u32) -> History<64> {
        let mut history = History::new();
        for i in 0..count {
            history.append(sample(i * step_ms, g, math::ZERO));
        }
        history
    }

    #[test]
    fn hic_of_constant_pulse() {
        // 50 g for 15 ms: HIC = 0.015 · 50^2.5
        let history = constant(50.0, 1, 16);
        let expected = 0.015 * libm::powf(50.0, 2.5);
        let value = hic(&history.all(), 15);
        assert!((value - expected).abs() / expected < 1e-3, "{value} vs {expected}");
    }

    #[test]
    fn hic_respects_max_duration() {
        let history = constant(50.0, 1, 40);
        let short = hic(&history.all(), 15);
        let long = hic(&history.all(), 36);
        assert!(long > short);
    }

    #[test]
    fn hic_needs_two_samples() {
        let history = constant(80.0, 10, 1);
        assert_eq!(hic(&history.all(), 15), 0.0);
        let empty: History<4> = History::new();
        assert_eq!(hic(&empty.all(), 15), 0.0);
    }

    #[test]
    fn hic_of_rest_is_zero() {
        let history = constant(0.0, 10, 20);
        assert_eq!(hic(&history.all(), 15), 0.0);
    }

    #[test]
    fn bric_per_axis() {
        let mut history: History<8> = History::new();
        history.append(sample(0, 0.0, [66.3, 0.0, 0.0]));
        history.append(sample(10, 0.0, [0.0, -66.3, 0.0]));
        let value = bric(&history.all(), [66.3; 3]);
        assert!((value - core::f32::consts::SQRT_2).abs() < 1e-5);
    }

    #[test]
    fn bric_of_empty_window_is_zero() {
        let history: History<8> = History::new();
        assert_eq!(bric(&history.all(), [66.3; 3]), 0.0);
    }

    #[test]
    fn gadd_of_constant_acceleration() {
        // 10 g for 100 ms: SI = 0.1 · 10^2.5
        let history = constant(10.0, 10, 11);
        let expected = 0.1 * libm::powf(10.0, 2.5);
        let value = gadd_si(&history.all());
        assert!((value - expected).abs() / expected < 1e-3);
    }

    #[test]
    fn ric_of_spin_up() {
        // 0 -> 10 rad/s over 10 ms, then steady
        let mut history: History<8> = History::new();
        history.append(sample(0, 0.0, math::ZERO));
        history.append(sample(10, 0.0, [10.0, 0.0, 0.0]));
        history.append(sample(20, 0.0, [10.0, 0.0, 0.0]));
        assert!(ric(&history.all(), 15) > 0.0);

        let mut steady: History<8> = History::new();
        for i in 0..4 {
            steady.append(sample(i * 10, 0.0, [5.0, 0.0, 0.0]));
        }
        assert_eq!(ric(&steady.all(), 15), 0.0);
    }

    #[test]
    fn ric_needs_three_samples() {
        let mut history: History<8> = History::new();
        history.append(sample(0, 0.0, math::ZERO));
        history.append(sample(10, 0.0, [10.0, 0.0, 0.0]));
        assert_eq!(ric(&history.all(), 15), 0.0);
    }

    #[test]
    fn peak_over_window() {
        let mut history: History<8> = History::new();
        history.append(sample(0, 1.0, math::ZERO));
        history.append(sample(10, 4.0, math::ZERO));
        history.append(sample(20, 2.0, math::ZERO));
        assert!((peak_linear_accel_g(&history.all()) - 4.0).abs() < 1e-5);
        let empty: History<8> = History::new();
        assert_eq!(peak_linear_accel(&empty.all()), 0.0);
    }
}
