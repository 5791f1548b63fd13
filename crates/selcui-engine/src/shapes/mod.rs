//! Drawable pieces of a selection.
//!
//! Each shape owns a [`Style`] and its precomputed geometry. Rendering runs
//! the geometry once per matching line style of the style; regions rebuild
//! shapes when their defining fields change and only swap styles otherwise.

mod boxes;
mod chunk;
mod cylinder;
mod ellipsoid;
mod grid;
mod polygon;

pub use boxes::{CuboidBox, PointCube, PointRectangle};
pub use chunk::ChunkBoundary;
pub use cylinder::{CylinderBox, CylinderCircles, CylinderGrid, CylinderSpan};
pub use ellipsoid::EllipsoidShape;
pub use grid::CuboidGrid;
pub use polygon::{Polygon2dBox, Polygon2dGrid, Polygon3d};

use std::f64::consts::TAU;

use crate::coords::Vector3;
use crate::render::{PrimitiveKind, RenderContext, RenderError};
use crate::style::Style;

/// Subdivisions of every ring.
pub const RING_SEGMENTS: usize = 40;

/// Upper bound on grid planes, rings or slices along one axis.
pub const MAX_PLANES: usize = 4096;

pub trait Shape {
    fn style(&self) -> &Style;

    fn set_style(&mut self, style: Style);

    /// Emits geometry with colour and line state already applied.
    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError>;

    fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let style = *self.style();
        ctx.for_each_line(style.lines(), style.render_type(), |ctx| self.draw(ctx))
    }
}

// ── helpers ───────────────────────────────────────────────────────────────

/// Outline of an axis-aligned box: two horizontal loops and four verticals.
pub(crate) fn draw_box(ctx: &mut RenderContext<'_>, min: Vector3, max: Vector3) -> Result<(), RenderError> {
    let corners = [(min.x, min.z), (max.x, min.z), (max.x, max.z), (min.x, max.z)];
    for y in [min.y, max.y] {
        ctx.begin(PrimitiveKind::LineLoop)?;
        for (x, z) in corners {
            ctx.vertex_xyz(x, y, z)?;
        }
        ctx.end(PrimitiveKind::LineLoop)?;
    }

    ctx.begin(PrimitiveKind::Lines)?;
    for (x, z) in corners {
        ctx.vertex_xyz(x, min.y, z)?;
        ctx.vertex_xyz(x, max.y, z)?;
    }
    ctx.end(PrimitiveKind::Lines)
}

/// Ring around `center` spanned by the half-axes `u` and `v`.
pub(crate) fn ring_points(center: Vector3, u: Vector3, v: Vector3) -> Vec<Vector3> {
    (0..RING_SEGMENTS)
        .map(|i| {
            let t = TAU * i as f64 / RING_SEGMENTS as f64;
            center + u * t.cos() + v * t.sin()
        })
        .collect()
}

/// Integer offsets in `[-r, r]`, at most [`MAX_PLANES`] of them around zero.
pub(crate) fn slice_offsets(r: f64) -> impl Iterator<Item = f64> {
    let limit = (MAX_PLANES / 2) as i64;
    let n = if r.is_finite() && r > 0.0 { (r.floor() as i64).min(limit) } else { 0 };
    (-n..=n).map(|i| i as f64)
}

/// Block boundaries strictly above `min` up to and including `max`.
pub(crate) fn layers(min: i32, max: i32) -> impl Iterator<Item = i32> {
    (min.saturating_add(1)..=max).take(MAX_PLANES)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::coords::Vector3;
    use crate::paint::Color;
    use crate::render::{BufferSink, RecordingTarget, RenderContext, RenderError, RenderSink, TypeSet};

    /// Runs `f` against a recording sink and returns the recorded target.
    pub fn record(
        f: impl FnOnce(&mut RenderContext<'_>) -> Result<(), RenderError>,
    ) -> RecordingTarget {
        let rec = RecordingTarget::new(TypeSet::PLAIN);
        let mut sink = BufferSink::new(rec.clone());
        sink.color(Color::white());
        {
            let mut ctx = RenderContext::new(&mut sink, Vector3::ZERO, 0.0);
            f(&mut ctx).unwrap();
        }
        sink.flush().unwrap();
        rec
    }
}
