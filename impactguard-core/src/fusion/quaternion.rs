//! Unit quaternions for attitude
//!
//! Hamilton convention, scalar first: `q = w + xi + yj + zk`. A quaternion
//! maps sensor-frame vectors into the world frame; its conjugate maps world
//! vectors (such as gravity) back into the sensor frame.

use crate::math::Vec3;

/// Attitude quaternion `(w, x, y, z)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion {
    /// Scalar part
    pub w: f32,
    /// i component
    pub x: f32,
    /// j component
    pub y: f32,
    /// k component
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// No rotation
    pub const IDENTITY: Self = Self {
        w: 1.0,
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Construct from components
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Attitude with the given roll and pitch and zero yaw (ZYX order)
    pub fn from_roll_pitch(roll: f32, pitch: f32) -> Self {
        let (sr, cr) = (libm::sinf(roll * 0.5), libm::cosf(roll * 0.5));
        let (sp, cp) = (libm::sinf(pitch * 0.5), libm::cosf(pitch * 0.5));
        Self {
            w: cr * cp,
            x: sr * cp,
            y: cr * sp,
            z: -sr * sp,
        }
    }

    /// Roll and pitch that would make a resting accelerometer read `accel`
    ///
    /// `roll = atan2(ay, az)`, `pitch = atan2(-ax, sqrt(ay² + az²))`
    pub fn from_gravity(accel: Vec3) -> Self {
        let [ax, ay, az] = accel;
        let roll = libm::atan2f(ay, az);
        let pitch = libm::atan2f(-ax, libm::sqrtf(ay * ay + az * az));
        Self::from_roll_pitch(roll, pitch)
    }

    /// Euclidean norm
    pub fn norm(&self) -> f32 {
        libm::sqrtf(self.dot(self))
    }

    /// Four-component dot product
    pub fn dot(&self, other: &Self) -> f32 {
        self.w * other.w + self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Scaled to unit norm; a degenerate quaternion becomes identity
    pub fn normalized(&self) -> Self {
        let n = self.norm();
        if !n.is_finite() || n < f32::EPSILON {
            return Self::IDENTITY;
        }
        self.scale(1.0 / n)
    }

    /// Inverse rotation for a unit quaternion
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Hamilton product `self ⊗ rhs`
    pub fn mul(&self, rhs: &Self) -> Self {
        Self {
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        }
    }

    fn scale(&self, k: f32) -> Self {
        Self::new(self.w * k, self.x * k, self.y * k, self.z * k)
    }

    fn add(&self, other: &Self) -> Self {
        Self::new(
            self.w + other.w,
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
        )
    }

    /// Advance by body angular rate `omega` (rad/s) over `dt` seconds
    ///
    /// First-order step of `q̇ = ½ q ⊗ (0, ω)`, renormalised.
    pub fn integrate(&self, omega: Vec3, dt: f32) -> Self {
        let rate = Self::new(0.0, omega[0], omega[1], omega[2]);
        let q_dot = self.mul(&rate).scale(0.5);
        self.add(&q_dot.scale(dt)).normalized()
    }

    /// Weighted blend `weight·self + (1 - weight)·other`, renormalised
    ///
    /// `other` is flipped into the same hemisphere first; `q` and `-q` are the
    /// same attitude and averaging across hemispheres cancels out.
    pub fn blend(&self, other: &Self, weight: f32) -> Self {
        let other = if self.dot(other) < 0.0 {
            other.scale(-1.0)
        } else {
            *other
        };
        self.scale(weight)
            .add(&other.scale(1.0 - weight))
            .normalized()
    }

    /// Rotate a sensor-frame vector into the world frame
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let p = Self::new(0.0, v[0], v[1], v[2]);
        let r = self.mul(&p).mul(&self.conjugate());
        [r.x, r.y, r.z]
    }

    /// Rotate a world-frame vector into the sensor frame
    pub fn rotate_inverse(&self, v: Vec3) -> Vec3 {
        self.conjugate().rotate(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn identity_is_neutral() {
        let v = [1.0, 2.0, 3.0];
        assert!(close(Quaternion::IDENTITY.rotate(v), v));
        assert!(close(Quaternion::IDENTITY.rotate_inverse(v), v));
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
    }

    #[test]
    fn level_gravity_gives_identity() {
        let q = Quaternion::from_gravity([0.0, 0.0, 9.81]);
        assert!((q.w - 1.0).abs() < 1e-6);
        assert!(q.x.abs() < 1e-6 && q.y.abs() < 1e-6 && q.z.abs() < 1e-6);
    }

    #[test]
    fn gravity_round_trip_through_attitude() {
        // Sensor rolled 90°: gravity appears on +Y
        let accel = [0.0, 9.81, 0.0];
        let q = Quaternion::from_gravity(accel);
        let g_sensor = q.rotate_inverse([0.0, 0.0, 9.81]);
        assert!(close(g_sensor, accel), "{g_sensor:?}");
    }

    #[test]
    fn pitched_gravity_round_trip() {
        let accel = [-6.0, 2.0, 7.5];
        let scale = 9.81 / crate::math::norm(accel);
        let accel = crate::math::scale(accel, scale);
        let q = Quaternion::from_gravity(accel);
        assert!(close(q.rotate_inverse([0.0, 0.0, 9.81]), accel));
    }

    #[test]
    fn integrate_quarter_turn_about_z() {
        let mut q = Quaternion::IDENTITY;
        for _ in 0..1000 {
            q = q.integrate([0.0, 0.0, FRAC_PI_2], 0.001);
        }
        let x_axis = q.rotate([1.0, 0.0, 0.0]);
        assert!(close(x_axis, [0.0, 1.0, 0.0]), "{x_axis:?}");
        assert!((q.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn zero_rate_keeps_attitude() {
        let q = Quaternion::from_roll_pitch(0.3, -0.2);
        let next = q.integrate([0.0; 3], 0.01);
        assert!((q.dot(&next) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn blend_respects_hemisphere() {
        let q = Quaternion::from_roll_pitch(0.1, 0.0);
        let flipped = q.scale(-1.0);
        let blended = q.blend(&flipped, 0.5);
        assert!((blended.dot(&q).abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn degenerate_normalises_to_identity() {
        assert_eq!(Quaternion::new(0.0, 0.0, 0.0, 0.0).normalized(), Quaternion::IDENTITY);
        assert_eq!(
            Quaternion::new(f32::NAN, 0.0, 0.0, 0.0).normalized(),
            Quaternion::IDENTITY
        );
    }
}
