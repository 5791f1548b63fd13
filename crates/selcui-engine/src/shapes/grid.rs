use crate::coords::{Bounds, Vector3};
use crate::render::{PrimitiveKind, RenderContext, RenderError};
use crate::style::{Style, LINE_OFFSET};

use super::{Shape, MAX_PLANES};

/// Grid lines on every face of a cuboid.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidGrid {
    style: Style,
    bounds: Bounds,
    spacing: f64,
    cull_distance: Option<f64>,
}

impl CuboidGrid {
    pub fn new(bounds: Bounds, spacing: f64, style: Style) -> Self {
        Self { style, bounds, spacing, cull_distance: None }
    }

    /// Skip planes further than `distance` from the camera along their axis.
    pub fn with_cull(mut self, distance: Option<f64>) -> Self {
        self.cull_distance = distance;
        self
    }

    #[inline]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    fn planes(&self, min: f64, max: f64, camera: f64) -> Vec<f64> {
        let spacing = self.spacing;
        (1..)
            .map(|k| min + k as f64 * spacing)
            .take_while(|p| *p < max - 1e-9)
            .take(MAX_PLANES)
            .filter(|p| self.cull_distance.is_none_or(|d| (p - camera).abs() <= d))
            .collect()
    }
}

fn ring(ctx: &mut RenderContext<'_>, corners: [Vector3; 4]) -> Result<(), RenderError> {
    for i in 0..4 {
        ctx.vertex(corners[i])?;
        ctx.vertex(corners[(i + 1) % 4])?;
    }
    Ok(())
}

impl Shape for CuboidGrid {
    fn style(&self) -> &Style {
        &self.style
    }

    fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    fn draw(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Ok(());
        }
        let (b, o) = (self.bounds, self.bounds.expanded(LINE_OFFSET));
        let cam = ctx.camera_pos();

        ctx.begin(PrimitiveKind::Lines)?;
        for y in self.planes(b.min.y, b.max.y, cam.y) {
            ring(ctx, [
                Vector3::new(o.min.x, y, o.min.z),
                Vector3::new(o.max.x, y, o.min.z),
                Vector3::new(o.max.x, y, o.max.z),
                Vector3::new(o.min.x, y, o.max.z),
            ])?;
        }
        for x in self.planes(b.min.x, b.max.x, cam.x) {
            ring(ctx, [
                Vector3::new(x, o.min.y, o.min.z),
                Vector3::new(x, o.max.y, o.min.z),
                Vector3::new(x, o.max.y, o.max.z),
                Vector3::new(x, o.min.y, o.max.z),
            ])?;
        }
        for z in self.planes(b.min.z, b.max.z, cam.z) {
            ring(ctx, [
                Vector3::new(o.min.x, o.min.y, z),
                Vector3::new(o.max.x, o.min.y, z),
                Vector3::new(o.max.x, o.max.y, z),
                Vector3::new(o.min.x, o.max.y, z),
            ])?;
        }
        ctx.end(PrimitiveKind::Lines)
    }
}
