use crate::coords::{Vector2, Vector3};
use crate::render::{PrimitiveKind, RenderContext, RenderError};
use crate::style::{Style, LINE_OFFSET};

use super::{layers, Shape};

fn column_points(points: &[Vector2], y: f64) -> Vec<Vector3> {
    points.iter().map(|p| Vector3::new(p.x + 0.5, y, p.z + 0.5)).collect()
}

/// Outline of a 2D polygon prism: top and bottom loops plus a vertical at
/// every point.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2dBox {
    style: Style,
    points: Vec<Vector2>,
    min_y: i32,
    max_y: i32,
}

impl Polygon2dBox {
    pub fn new(points: Vec<Vector2>, min_y: i32, max_y: i32, style: Style) -> Self {
        Self { style, points, min_y, max_y }
    }
}

impl Shape for Polygon2dBox {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        if self.points.is_empty() {
            return Ok(());
        }
        let bottom = self.min_y as f64 - LINE_OFFSET;
        let top = self.max_y as f64 + 1.0 + LINE_OFFSET;

        ctx.begin(PrimitiveKind::Lines)?;
        for p in &self.points {
            ctx.vertex_xyz(p.x + 0.5, bottom, p.z + 0.5)?;
            ctx.vertex_xyz(p.x + 0.5, top, p.z + 0.5)?;
        }
        ctx.end(PrimitiveKind::Lines)?;

        if self.points.len() > 1 {
            ctx.primitive(PrimitiveKind::LineLoop, &column_points(&self.points, bottom))?;
            ctx.primitive(PrimitiveKind::LineLoop, &column_points(&self.points, top))?;
        }
        Ok(())
    }
}

/// Horizontal loops at every block boundary between bottom and top.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon2dGrid {
    style: Style,
    points: Vec<Vector2>,
    min_y: i32,
    max_y: i32,
}

impl Polygon2dGrid {
    pub fn new(points: Vec<Vector2>, min_y: i32, max_y: i32, style: Style) -> Self {
        Self { style, points, min_y, max_y }
    }
}

impl Shape for Polygon2dGrid {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        if self.points.len() < 2 {
            return Ok(());
        }
        for y in layers(self.min_y, self.max_y) {
            ctx.primitive(PrimitiveKind::LineLoop, &column_points(&self.points, y as f64))?;
        }
        Ok(())
    }
}

/// One polyhedron face.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon3d {
    style: Style,
    vertices: Vec<Vector3>,
}

impl Polygon3d {
    pub fn new(vertices: Vec<Vector3>, style: Style) -> Self {
        Self { style, vertices }
    }

    pub fn vertices(&self) -> &[Vector3] {
        &self.vertices
    }
}

impl Shape for Polygon3d {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        if self.vertices.len() < 2 {
            return Ok(());
        }
        ctx.primitive(PrimitiveKind::LineLoop, &self.vertices)
    }
}
