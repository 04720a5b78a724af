//! Orientation Filter and Calibration Parameters

/// Samples averaged to estimate stationary sensor bias.
///
/// At 104 Hz this is roughly half a second with the helmet at rest.
pub const BIAS_CALIBRATION_SAMPLES: u32 = 50;

/// Gyroscope weight in the complementary filter during motion.
pub const GYRO_WEIGHT_MOTION: f32 = 0.96;

/// Gyroscope weight when the accelerometer reads close to 1 g.
pub const GYRO_WEIGHT_STATIONARY: f32 = 0.8;

/// Band around 1 g (m/s²) inside which the accelerometer is trusted for
/// attitude.
pub const GRAVITY_TOLERANCE_MPS2: f32 = 0.5;

/// Band around 1 g (m/s²) inside which the sensor is treated as stationary
/// and the stationary gyro weight applies.
///
/// Must be narrower than [`GRAVITY_TOLERANCE_MPS2`]: readings between the two
/// bands are blended with the motion weight.
pub const STATIONARY_TOLERANCE_MPS2: f32 = 0.2;
