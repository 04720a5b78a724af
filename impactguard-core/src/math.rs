//! Small fixed-size vector helpers
//!
//! Three-axis quantities are plain `[f32; 3]` arrays. All transcendental
//! functions go through `libm` so the crate builds without `std`.

/// Three-axis vector (x, y, z)
pub type Vec3 = [f32; 3];

/// Zero vector
pub const ZERO: Vec3 = [0.0; 3];

/// Euclidean norm
pub fn norm(v: Vec3) -> f32 {
    libm::sqrtf(dot(v, v))
}

/// Dot product
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Component-wise `a + b`
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

/// Component-wise `a - b`
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Scalar multiple
pub fn scale(v: Vec3, k: f32) -> Vec3 {
    [v[0] * k, v[1] * k, v[2] * k]
}

/// No NaN or infinite component
pub fn is_finite(v: Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// Absolute value without `std`
pub fn abs(x: f32) -> f32 {
    libm::fabsf(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_of_pythagorean_triple() {
        assert_eq!(norm([3.0, 4.0, 0.0]), 5.0);
        assert_eq!(norm(ZERO), 0.0);
    }

    #[test]
    fn component_ops() {
        assert_eq!(add([1.0, 2.0, 3.0], [1.0, 1.0, 1.0]), [2.0, 3.0, 4.0]);
        assert_eq!(sub([1.0, 2.0, 3.0], [1.0, 1.0, 1.0]), [0.0, 1.0, 2.0]);
        assert_eq!(scale([1.0, -2.0, 3.0], 2.0), [2.0, -4.0, 6.0]);
        assert_eq!(dot([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]), 32.0);
        assert_eq!(abs(-2.5), 2.5);
        assert!(is_finite([1.0, -2.0, 0.0]));
        assert!(!is_finite([1.0, f32::NAN, 0.0]));
        assert!(!is_finite([f32::NEG_INFINITY, 0.0, 0.0]));
    }
}
