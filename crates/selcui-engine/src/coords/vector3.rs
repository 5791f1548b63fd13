use core::ops::{Add, Mul, Neg, Sub};

/// 3D vector in world (block) space, double precision.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);
    pub const ONE: Vector3 = Vector3::new(1.0, 1.0, 1.0);
    /// Offset from a block corner to its centre.
    pub const HALF: Vector3 = Vector3::new(0.5, 0.5, 0.5);

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    #[inline]
    pub fn floor(self) -> Vector3 {
        Vector3::new(self.x.floor(), self.y.floor(), self.z.floor())
    }

    #[inline]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vector3) -> f64 {
        (self - other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    #[inline]
    pub fn normalized(self) -> Option<Vector3> {
        let len = self.length();
        if len > 0.0 && len.is_finite() {
            Some(Vector3::new(self.x / len, self.y / len, self.z / len))
        } else {
            None
        }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Narrows to GPU precision.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl Add for Vector3 {
    type Output = Vector3;
    #[inline]
    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;
    #[inline]
    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vector3 {
    type Output = Vector3;
    #[inline]
    fn mul(self, rhs: f64) -> Vector3 {
        Vector3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;
    #[inline]
    fn neg(self) -> Vector3 {
        Vector3::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_are_component_wise() {
        let a = Vector3::new(1.0, 5.0, -2.0);
        let b = Vector3::new(3.0, 0.0, -4.0);
        assert_eq!(a.min(b), Vector3::new(1.0, 0.0, -4.0));
        assert_eq!(a.max(b), Vector3::new(3.0, 5.0, -2.0));
    }

    #[test]
    fn normalized_unit_length() {
        let n = Vector3::new(3.0, 0.0, 4.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert!((n - Vector3::new(0.6, 0.0, 0.8)).length() < 1e-12);
        assert_eq!(Vector3::new(0.0, -2.0, 0.0).normalized(), Some(Vector3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn normalized_zero_is_none() {
        assert!(Vector3::ZERO.normalized().is_none());
    }

    #[test]
    fn arithmetic() {
        let v = Vector3::new(1.0, 2.0, 3.0);
        assert_eq!(v + Vector3::HALF, Vector3::new(1.5, 2.5, 3.5));
        assert_eq!(v - v, Vector3::ZERO);
        assert_eq!(-v * 2.0, Vector3::new(-2.0, -4.0, -6.0));
    }
}
