use super::Vector3;

/// Axis-aligned box in world space.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Bounds {
    pub min: Vector3,
    pub max: Vector3,
}

impl Bounds {
    #[inline]
    pub const fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Box spanning two block positions, inclusive of both blocks.
    ///
    /// The far corner is pushed out by one so the box covers the whole block.
    #[inline]
    pub fn from_blocks(a: Vector3, b: Vector3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b) + Vector3::ONE,
        }
    }

    /// Grows every face outward by `by`.
    #[inline]
    pub fn expanded(self, by: f64) -> Self {
        Self {
            min: self.min - Vector3::splat(by),
            max: self.max + Vector3::splat(by),
        }
    }

    #[inline]
    pub fn size(self) -> Vector3 {
        self.max - self.min
    }
}
