//! Complementary orientation filter with bias and gravity removal
//!
//! ## Per-sample update
//!
//! ```text
//! raw ──→ bias calibration ──→ a_c = a - b_a,  ω_c = ω - b_g
//!                                     │
//!           q_gyro = q ⊕ ½ q ⊗ (0, ω_c)·dt
//!                                     │
//!        | |a_c| - g | ≤ tol ?  ──yes──→ q = blend(q_gyro, q_accel, α)
//!                 │no
//!                 └──────────────────→ q = q_gyro
//!                                     │
//!           g_sensor = qᶜ · (0, 0, g) · q
//!           linear   = a_c - g_sensor
//!           velocity += ∫ linear dt        (after calibration)
//! ```
//!
//! `α` is the gyroscope weight. It drops to the stationary weight when the
//! accelerometer reads within the stationary band of 1 g, letting gravity pull
//! the attitude back faster while the helmet is still.
//!
//! The accelerometer only constrains roll and pitch, so yaw is integrated from
//! the gyroscope alone and drifts. Gravity removal does not depend on yaw.

use crate::{
    constants::{
        fusion::{
            BIAS_CALIBRATION_SAMPLES, GRAVITY_TOLERANCE_MPS2, GYRO_WEIGHT_MOTION,
            GYRO_WEIGHT_STATIONARY, STATIONARY_TOLERANCE_MPS2,
        },
        STANDARD_GRAVITY,
    },
    fusion::{bias::BiasState, quaternion::Quaternion},
    math::{self, Vec3},
    sample::{RawSample, Sample},
    time::{self, Timestamp},
};

/// Velocity integration rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IntegrationMode {
    /// `v += ½(a_prev + a)·dt`
    #[default]
    Trapezoidal,
    /// `v += a·dt`
    Rectangular,
}

/// Estimator tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorConfig {
    /// Gyroscope weight while moving
    pub gyro_weight_motion: f32,
    /// Gyroscope weight while stationary
    pub gyro_weight_stationary: f32,
    /// Accelerometer trusted for attitude within this band of 1 g (m/s²)
    pub gravity_tolerance: f32,
    /// Sensor treated as stationary within this band of 1 g (m/s²)
    ///
    /// The motion weight only applies while this is narrower than
    /// `gravity_tolerance`.
    pub stationary_tolerance: f32,
    /// Samples averaged for bias calibration
    pub calibration_samples: u32,
    /// Velocity integration rule
    pub integration: IntegrationMode,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            gyro_weight_motion: GYRO_WEIGHT_MOTION,
            gyro_weight_stationary: GYRO_WEIGHT_STATIONARY,
            gravity_tolerance: GRAVITY_TOLERANCE_MPS2,
            stationary_tolerance: STATIONARY_TOLERANCE_MPS2,
            calibration_samples: BIAS_CALIBRATION_SAMPLES,
            integration: IntegrationMode::Trapezoidal,
        }
    }
}

impl EstimatorConfig {
    /// Trust the gyroscope more; smoother attitude, slower tilt recovery
    pub fn smooth() -> Self {
        Self {
            gyro_weight_motion: 0.98,
            gyro_weight_stationary: 0.9,
            ..Self::default()
        }
    }

    /// Trust the accelerometer more; noisier attitude, fast tilt recovery
    pub fn responsive() -> Self {
        Self {
            gyro_weight_motion: 0.9,
            gyro_weight_stationary: 0.6,
            ..Self::default()
        }
    }

    /// Set both gyroscope weights (clamped to `[0, 1]`)
    pub fn with_gyro_weights(mut self, motion: f32, stationary: f32) -> Self {
        self.gyro_weight_motion = motion.clamp(0.0, 1.0);
        self.gyro_weight_stationary = stationary.clamp(0.0, 1.0);
        self
    }

    /// Set the gravity and stationary bands (m/s²)
    pub fn with_tolerances(mut self, gravity: f32, stationary: f32) -> Self {
        self.gravity_tolerance = math::abs(gravity);
        self.stationary_tolerance = math::abs(stationary);
        self
    }

    /// Set the calibration sample count
    pub fn with_calibration_samples(mut self, samples: u32) -> Self {
        self.calibration_samples = samples.max(1);
        self
    }

    /// Set the velocity integration rule
    pub fn with_integration(mut self, mode: IntegrationMode) -> Self {
        self.integration = mode;
        self
    }
}

/// Orientation, bias and velocity estimator
///
/// Feed every decoded row through [`OrientationEstimator::update`] in
/// timestamp order.
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    config: EstimatorConfig,
    attitude: Quaternion,
    bias: BiasState,
    velocity: Vec3,
    previous: Option<Previous>,
}

#[derive(Debug, Clone, Copy)]
struct Previous {
    timestamp: Timestamp,
    linear_accel: Vec3,
}

impl Default for OrientationEstimator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl OrientationEstimator {
    /// Estimator at identity attitude, uncalibrated
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            attitude: Quaternion::IDENTITY,
            bias: BiasState::new(config.calibration_samples),
            velocity: math::ZERO,
            previous: None,
        }
    }

    /// Active tuning
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Current attitude (sensor to world)
    pub fn attitude(&self) -> Quaternion {
        self.attitude
    }

    /// Calibration state
    pub fn bias(&self) -> &BiasState {
        &self.bias
    }

    /// Whether bias calibration has completed
    pub fn is_calibrated(&self) -> bool {
        self.bias.is_calibrated()
    }

    /// Integrated velocity (m/s)
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Back to identity attitude, zero velocity, uncalibrated
    pub fn reset(&mut self) {
        *self = Self::new(self.config);
    }

    /// Process one raw sample
    pub fn update(&mut self, raw: &RawSample) -> Sample {
        let dt = match self.previous {
            Some(prev) => time::delta_seconds(prev.timestamp, raw.timestamp),
            None => 0.0,
        };

        let was_calibrated = self.bias.is_calibrated();
        self.bias.observe(raw.accel, raw.gyro);

        let accel = math::sub(raw.accel, self.bias.accel_bias());
        let angular_rate = math::sub(raw.gyro, self.bias.gyro_bias());

        self.attitude = self.correct(self.attitude.integrate(angular_rate, dt), accel);

        let gravity = self
            .attitude
            .rotate_inverse([0.0, 0.0, STANDARD_GRAVITY]);
        let linear_accel = math::sub(accel, gravity);

        if was_calibrated {
            if let Some(prev) = self.previous {
                let step = match self.config.integration {
                    IntegrationMode::Trapezoidal => {
                        math::scale(math::add(prev.linear_accel, linear_accel), 0.5 * dt)
                    }
                    IntegrationMode::Rectangular => math::scale(linear_accel, dt),
                };
                self.velocity = math::add(self.velocity, step);
            }
        }

        self.previous = Some(Previous {
            timestamp: raw.timestamp,
            linear_accel,
        });

        Sample {
            timestamp: raw.timestamp,
            accel: raw.accel,
            gyro: raw.gyro,
            mag: raw.mag,
            linear_accel,
            linear_accel_magnitude: math::norm(linear_accel),
            velocity: self.velocity,
            angular_rate,
        }
    }

    /// Blend the gyro prediction toward the accelerometer attitude when the
    /// accelerometer reads close to 1 g
    fn correct(&self, predicted: Quaternion, accel: Vec3) -> Quaternion {
        let deviation = math::abs(math::norm(accel) - STANDARD_GRAVITY);
        if deviation > self.config.gravity_tolerance {
            return predicted;
        }

        let weight = if deviation <= self.config.stationary_tolerance {
            self.config.gyro_weight_stationary
        } else {
            self.config.gyro_weight_motion
        };
        predicted.blend(&Quaternion::from_gravity(accel), weight)
    }
}
