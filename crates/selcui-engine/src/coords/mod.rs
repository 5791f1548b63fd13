//! Coordinate and geometry types shared by regions, shapes and renderers.
//!
//! Canonical CPU space:
//! - world (block) coordinates in `f64`
//! - +Y up; a block at `(x, y, z)` spans `[x, x+1)` on each axis
//!
//! Shapes convert to camera-relative `f32` only when emitting vertices.

mod bounds;
mod point;
mod vector2;
mod vector3;
mod viewport;

pub use bounds::Bounds;
pub use point::Point;
pub use vector2::Vector2;
pub use vector3::Vector3;
pub use viewport::Viewport;
