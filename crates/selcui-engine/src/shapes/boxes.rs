use crate::coords::{Bounds, Point, Vector3};
use crate::render::{RenderContext, RenderError};
use crate::style::{Style, LINE_OFFSET};

use super::{draw_box, Shape};

/// Padding around single-block markers.
pub const POINT_PADDING: f64 = 0.03;

/// Marker cube around one block.
#[derive(Debug, Clone, PartialEq)]
pub struct PointCube {
    style: Style,
    point: Point,
}

impl PointCube {
    pub fn new(pos: Vector3, style: Style) -> Self {
        Self { style, point: Point::new(pos) }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.point = Point::with_id(self.point.pos(), id);
        self
    }

    #[inline]
    pub fn point(&self) -> Vector3 {
        self.point.pos()
    }

    #[inline]
    pub fn id(&self) -> Option<i32> {
        self.point.id()
    }
}

impl Shape for PointCube {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let pos = self.point.pos();
        let b = Bounds::from_blocks(pos, pos).expanded(POINT_PADDING);
        draw_box(ctx, b.min, b.max)
    }
}

/// Marker column of a 2D polygon point, spanning the vertical extent.
#[derive(Debug, Clone, PartialEq)]
pub struct PointRectangle {
    style: Style,
    x: f64,
    z: f64,
    min_y: i32,
    max_y: i32,
}

impl PointRectangle {
    pub fn new(x: f64, z: f64, min_y: i32, max_y: i32, style: Style) -> Self {
        Self { style, x, z, min_y, max_y }
    }
}

impl Shape for PointRectangle {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let b = Bounds::from_blocks(
            Vector3::new(self.x, self.min_y as f64, self.z),
            Vector3::new(self.x, self.max_y as f64, self.z),
        )
        .expanded(POINT_PADDING);
        draw_box(ctx, b.min, b.max)
    }
}

/// Outline of a cuboid selection.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidBox {
    style: Style,
    bounds: Bounds,
}

impl CuboidBox {
    /// `bounds` are block bounds; the outline sits just outside them.
    pub fn new(bounds: Bounds, style: Style) -> Self {
        Self { style, bounds: bounds.expanded(LINE_OFFSET) }
    }
}

impl Shape for CuboidBox {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        draw_box(ctx, self.bounds.min, self.bounds.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::render::{BufferSink, RecordingTarget, RenderSink, TypeSet};
    use crate::style::DepthFunc;

    #[test]
    fn render_runs_once_per_line_style() {
        let rec = RecordingTarget::new(TypeSet::PLAIN);
        let mut sink = BufferSink::new(rec.clone());
        let cube = PointCube::new(Vector3::new(1.0, 2.0, 3.0), Style::from_color(Color::white()));
        {
            let mut ctx = RenderContext::new(&mut sink, Vector3::ZERO, 0.0);
            cube.render(&mut ctx).unwrap();
        }
        sink.flush().unwrap();

        let batches = rec.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].depth_func, DepthFunc::Greater);
        assert_eq!(batches[1].depth_func, DepthFunc::LessEqual);
        assert!(batches.iter().all(|b| b.primitive_count() == 12));
    }

    #[test]
    fn vertices_are_camera_relative() {
        let rec = RecordingTarget::new(TypeSet::PLAIN);
        let mut sink = BufferSink::new(rec.clone());
        let cube = CuboidBox::new(
            Bounds::new(Vector3::ZERO, Vector3::splat(4.0)),
            Style::from_color(Color::white()),
        );
        {
            let mut ctx = RenderContext::new(&mut sink, Vector3::splat(10.0), 0.0);
            cube.render(&mut ctx).unwrap();
        }
        sink.flush().unwrap();

        let first = rec.batches()[0].data.positions()[0];
        let expected = (-10.0 - LINE_OFFSET) as f32;
        assert_eq!(first, [expected, expected, expected]);
    }
}
