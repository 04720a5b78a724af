//! Orientation and Bias Estimation
//!
//! ## Overview
//!
//! Raw accelerometer readings contain gravity, and both sensors carry a
//! constant offset. Before any injury metric can be computed the estimator has
//! to answer two questions per sample:
//!
//! 1. Which way is down? The attitude quaternion tracks this.
//! 2. What is the sensor's zero? The bias calibration tracks this.
//!
//! ```text
//! RawSample ──→ OrientationEstimator ──→ Sample
//!                 ├── BiasState        (first N samples, then frozen)
//!                 ├── Quaternion       (gyro prediction + gravity correction)
//!                 └── velocity         (integrated linear acceleration)
//! ```
//!
//! ## Complementary Filter
//!
//! The gyroscope is accurate over short intervals but drifts; the
//! accelerometer is noisy and disturbed by motion but has no drift. A
//! complementary filter takes most of each update from the gyroscope and a
//! small share from the gravity direction:
//!
//! ```text
//! q = normalize(α·q_gyro + (1-α)·q_accel)
//! ```
//!
//! The accelerometer share is only applied while its magnitude is close to
//! 1 g. During an impact it is skipped entirely.
//!
//! ## Usage Example
//!
//! ```rust
//! use impactguard_core::fusion::{EstimatorConfig, OrientationEstimator};
//! use impactguard_core::RawSample;
//!
//! let mut estimator = OrientationEstimator::new(EstimatorConfig::default());
//! for i in 0..60 {
//!     estimator.update(&RawSample::new(i * 10, [0.0, 0.0, 9.81], [0.0; 3]));
//! }
//! assert!(estimator.is_calibrated());
//! ```

pub mod bias;
pub mod estimator;
pub mod quaternion;

pub use bias::BiasState;
pub use estimator::{EstimatorConfig, IntegrationMode, OrientationEstimator};
pub use quaternion::Quaternion;
