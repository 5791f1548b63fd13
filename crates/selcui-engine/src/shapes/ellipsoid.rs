use crate::coords::Vector3;
use crate::render::{PrimitiveKind, RenderContext, RenderError};
use crate::style::Style;

use super::{ring_points, slice_offsets, Shape};

/// Relative size of a slice `offset` away from the centre of an axis of
/// radius `r`; `None` once the slice has no extent.
pub(crate) fn slice_scale(offset: f64, r: f64) -> Option<f64> {
    if r <= 0.0 {
        return (offset == 0.0).then_some(1.0);
    }
    let s = 1.0 - (offset / r) * (offset / r);
    (s > 0.0).then(|| s.sqrt())
}

/// Ellipsoid drawn as rings sliced along each axis at block intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidShape {
    style: Style,
    center: Vector3,
    radii: Vector3,
}

impl EllipsoidShape {
    /// `center` is a block position; the shape is centred on that block.
    pub fn new(center: Vector3, radii: Vector3, style: Style) -> Self {
        Self { style, center, radii }
    }
}

impl Shape for EllipsoidShape {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let c = self.center + Vector3::HALF;
        let r = self.radii;

        for dy in slice_offsets(r.y) {
            let Some(s) = slice_scale(dy, r.y) else { continue };
            let ring = ring_points(
                c + Vector3::new(0.0, dy, 0.0),
                Vector3::new(r.x * s, 0.0, 0.0),
                Vector3::new(0.0, 0.0, r.z * s),
            );
            ctx.primitive(PrimitiveKind::LineLoop, &ring)?;
        }
        for dz in slice_offsets(r.z) {
            let Some(s) = slice_scale(dz, r.z) else { continue };
            let ring = ring_points(
                c + Vector3::new(0.0, 0.0, dz),
                Vector3::new(r.x * s, 0.0, 0.0),
                Vector3::new(0.0, r.y * s, 0.0),
            );
            ctx.primitive(PrimitiveKind::LineLoop, &ring)?;
        }
        for dx in slice_offsets(r.x) {
            let Some(s) = slice_scale(dx, r.x) else { continue };
            let ring = ring_points(
                c + Vector3::new(dx, 0.0, 0.0),
                Vector3::new(0.0, r.y * s, 0.0),
                Vector3::new(0.0, 0.0, r.z * s),
            );
            ctx.primitive(PrimitiveKind::LineLoop, &ring)?;
        }
        Ok(())
    }
}
