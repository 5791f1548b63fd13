use crate::coords::Vector3;
use crate::render::{PrimitiveKind, RenderContext, RenderError};
use crate::style::{Style, LINE_OFFSET};

use super::ellipsoid::slice_scale;
use super::{layers, ring_points, slice_offsets, Shape};

/// Geometry shared by the cylinder shapes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CylinderSpan {
    /// Block position of the centre column.
    pub center: Vector3,
    pub radius_x: f64,
    pub radius_z: f64,
    pub min_y: i32,
    pub max_y: i32,
}

impl CylinderSpan {
    fn axis(&self) -> (f64, f64) {
        (self.center.x + 0.5, self.center.z + 0.5)
    }

    fn ring_at(&self, y: f64) -> Vec<Vector3> {
        let (x, z) = self.axis();
        ring_points(
            Vector3::new(x, y, z),
            Vector3::new(self.radius_x, 0.0, 0.0),
            Vector3::new(0.0, 0.0, self.radius_z),
        )
    }

    fn bottom(&self) -> f64 {
        self.min_y as f64 - LINE_OFFSET
    }

    fn top(&self) -> f64 {
        self.max_y as f64 + 1.0 + LINE_OFFSET
    }
}

macro_rules! cylinder_shape {
    ($name:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            style: Style,
            span: CylinderSpan,
        }

        impl $name {
            pub fn new(span: CylinderSpan, style: Style) -> Self {
                Self { style, span }
            }

            #[inline]
            pub fn span(&self) -> CylinderSpan {
                self.span
            }
        }
    };
}

cylinder_shape!(CylinderBox, "Top and bottom caps.");
cylinder_shape!(CylinderCircles, "Rings at every block boundary between the caps.");
cylinder_shape!(CylinderGrid, "Vertical lines on the mantle at block intervals.");

impl Shape for CylinderBox {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        ctx.primitive(PrimitiveKind::LineLoop, &self.span.ring_at(self.span.bottom()))?;
        ctx.primitive(PrimitiveKind::LineLoop, &self.span.ring_at(self.span.top()))
    }
}

impl Shape for CylinderCircles {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        for y in layers(self.span.min_y, self.span.max_y) {
            ctx.primitive(PrimitiveKind::LineLoop, &self.span.ring_at(y as f64))?;
        }
        Ok(())
    }
}

impl Shape for CylinderGrid {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let span = &self.span;
        let (cx, cz) = span.axis();
        let (bottom, top) = (span.bottom(), span.top());

        ctx.begin(PrimitiveKind::Lines)?;
        for dx in slice_offsets(span.radius_x) {
            let Some(s) = slice_scale(dx, span.radius_x) else { continue };
            let dz = span.radius_z * s;
            for z in [cz - dz, cz + dz] {
                ctx.vertex_xyz(cx + dx, bottom, z)?;
                ctx.vertex_xyz(cx + dx, top, z)?;
            }
        }
        for dz in slice_offsets(span.radius_z) {
            let Some(s) = slice_scale(dz, span.radius_z) else { continue };
            let dx = span.radius_x * s;
            for x in [cx - dx, cx + dx] {
                ctx.vertex_xyz(x, bottom, cz + dz)?;
                ctx.vertex_xyz(x, top, cz + dz)?;
            }
        }
        ctx.end(PrimitiveKind::Lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::test_support::record;
    use crate::shapes::{MAX_PLANES, RING_SEGMENTS};

    fn span() -> CylinderSpan {
        CylinderSpan { center: Vector3::ZERO, radius_x: 2.5, radius_z: 2.5, min_y: 0, max_y: 3 }
    }

    #[test]
    fn caps_and_rings() {
        let caps = CylinderBox::new(span(), Style::default());
        assert_eq!(record(|ctx| caps.draw(ctx)).primitive_count(), 2 * RING_SEGMENTS);
        let rings = CylinderCircles::new(span(), Style::default());
        assert_eq!(record(|ctx| rings.draw(ctx)).primitive_count(), 3 * RING_SEGMENTS);
    }

    #[test]
    fn mantle_lines() {
        let grid = CylinderGrid::new(span(), Style::default());
        // 5 offsets per axis, two lines each
        assert_eq!(record(|ctx| grid.draw(ctx)).primitive_count(), 2 * 5 * 2);
    }

    #[test]
    fn single_slice_has_no_rings_between_caps() {
        let flat = CylinderSpan { min_y: 7, max_y: 7, ..span() };
        let rings = CylinderCircles::new(flat, Style::default());
        assert_eq!(record(|ctx| rings.draw(ctx)).submissions(), 0);
    }

    #[test]
    fn tall_and_wide_cylinders_are_bounded() {
        let tall = CylinderSpan { min_y: 1, max_y: 200_000, ..span() };
        let rings = CylinderCircles::new(tall, Style::default());
        assert_eq!(record(|ctx| rings.draw(ctx)).primitive_count(), MAX_PLANES * RING_SEGMENTS);

        let wide = CylinderSpan { radius_x: 2_000_000.0, radius_z: 2_000_000.0, ..span() };
        let grid = CylinderGrid::new(wide, Style::default());
        assert!(record(|ctx| grid.draw(ctx)).primitive_count() <= 2 * (MAX_PLANES + 1) * 2);
    }
}
