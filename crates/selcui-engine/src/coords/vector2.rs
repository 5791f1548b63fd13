/// Horizontal (X/Z) coordinate used by 2D polygon selections.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub z: f64,
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Lifts to 3D at height `y`.
    #[inline]
    pub fn with_y(self, y: f64) -> super::Vector3 {
        super::Vector3::new(self.x, y, self.z)
    }
}
