//! Assertion helpers and deterministic randomness

use impactguard_core::math::Vec3;

#[macro_export]
macro_rules! assert_within_tolerance {
    ($actual:expr, $expected:expr, $tolerance:expr) => {
        let diff = ($actual - $expected).abs();
        if diff > $tolerance {
            panic!(
                "Value {} not within tolerance {} of expected {} (diff: {})",
                $actual, $tolerance, $expected, diff
            );
        }
    };
}

#[macro_export]
macro_rules! assert_unit_quaternion {
    ($q:expr) => {
        let norm = $q.norm();
        if (norm - 1.0).abs() > 1e-5 {
            panic!("Quaternion {:?} has norm {}", $q, norm);
        }
    };
}

/// Deterministic random number generator for tests
pub struct TestRng {
    state: u32,
}

impl TestRng {
    pub fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        // Xorshift algorithm
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn gen_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Independent uniform noise on each axis
    pub fn gen_vec3(&mut self, amplitude: f32) -> Vec3 {
        [
            self.gen_range(-amplitude, amplitude),
            self.gen_range(-amplitude, amplitude),
            self.gen_range(-amplitude, amplitude),
        ]
    }
}
