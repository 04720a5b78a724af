//! Constants for ImpactGuard Core
//!
//! Centralised, documented constants used throughout the telemetry pipeline.
//! Values that are tunable at runtime (thresholds, filter weights) appear here
//! as defaults and are copied into the configuration structs.
//!
//! ## Organization
//!
//! - **Physics**: gravity and unit conversions
//! - **Protocol**: wire layout of the sensor's notification frames
//! - **Fusion**: complementary filter and bias calibration parameters
//! - **Injury**: impact thresholds and biomechanical criteria parameters
//! - **Buffers**: history and reassembly capacities

/// Physical constants and unit conversions.
pub mod physics;

/// Wire protocol layout constants.
pub mod protocol;

/// Orientation filter and calibration parameters.
pub mod fusion;

/// Impact detection and injury criteria parameters.
pub mod injury;

/// Buffer sizes for the fixed-memory pipeline.
pub mod buffers;

pub use physics::{STANDARD_GRAVITY, MPS_TO_KMH};

pub use protocol::{
    TAG_FIRST, TAG_CONTINUATION, TAG_FINAL,
    FRAGMENT_HEADER_LEN, FRAME_HEADER_LEN, AXIS_GROUP_LEN,
    MAX_FRAGMENT_LEN,
};

pub use fusion::{
    BIAS_CALIBRATION_SAMPLES, GYRO_WEIGHT_MOTION, GYRO_WEIGHT_STATIONARY,
    GRAVITY_TOLERANCE_MPS2,
};

pub use injury::{
    IMPACT_THRESHOLD_LOW_G, IMPACT_THRESHOLD_MEDIUM_G,
    IMPACT_THRESHOLD_HIGH_G, IMPACT_THRESHOLD_SEVERE_G,
    IMPACT_COOLDOWN_MS, HIC_WINDOW_MS, BRIC_WINDOW_MS,
    BRIC_CRITICAL_RATE_RAD_S,
};

pub use buffers::{HISTORY_CAPACITY, FRAME_BUFFER_CAPACITY, MAX_FRAME_ROWS};
