use crate::render::{PrimitiveKind, RenderContext, RenderError};
use crate::style::Style;

const CHUNK: f64 = 16.0;
const GRID_STEP: usize = 2;

/// Chunk borders around the camera: edges of the surrounding 3×3 chunks and a
/// 2-block grid on the walls of the camera's chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkBoundary {
    boundary: Style,
    grid: Style,
    min_y: i32,
    max_y: i32,
}

impl ChunkBoundary {
    pub fn new(boundary: Style, grid: Style, min_y: i32, max_y: i32) -> Self {
        Self { boundary, grid, min_y, max_y }
    }

    pub fn set_styles(&mut self, boundary: Style, grid: Style) {
        self.boundary = boundary;
        self.grid = grid;
    }

    pub fn set_height(&mut self, min_y: i32, max_y: i32) {
        self.min_y = min_y;
        self.max_y = max_y;
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let cam = ctx.camera_pos();
        let cx = (cam.x / CHUNK).floor() * CHUNK;
        let cz = (cam.z / CHUNK).floor() * CHUNK;
        let (bottom, top) = (self.min_y as f64, self.max_y as f64);

        ctx.for_each_line(self.boundary.lines(), self.boundary.render_type(), |ctx| {
            ctx.begin(PrimitiveKind::Lines)?;
            for i in -1..=2 {
                for j in -1..=2 {
                    let (x, z) = (cx + i as f64 * CHUNK, cz + j as f64 * CHUNK);
                    ctx.vertex_xyz(x, bottom, z)?;
                    ctx.vertex_xyz(x, top, z)?;
                }
            }
            ctx.end(PrimitiveKind::Lines)
        })?;

        ctx.for_each_line(self.grid.lines(), self.grid.render_type(), |ctx| {
            ctx.begin(PrimitiveKind::Lines)?;
            for k in (GRID_STEP..CHUNK as usize).step_by(GRID_STEP) {
                let k = k as f64;
                for (x, z) in [(cx + k, cz), (cx + k, cz + CHUNK), (cx, cz + k), (cx + CHUNK, cz + k)] {
                    ctx.vertex_xyz(x, bottom, z)?;
                    ctx.vertex_xyz(x, top, z)?;
                }
            }
            ctx.end(PrimitiveKind::Lines)?;

            let mut y = self.min_y;
            while y <= self.max_y {
                let y_f = y as f64;
                ctx.begin(PrimitiveKind::LineLoop)?;
                ctx.vertex_xyz(cx, y_f, cz)?;
                ctx.vertex_xyz(cx + CHUNK, y_f, cz)?;
                ctx.vertex_xyz(cx + CHUNK, y_f, cz + CHUNK)?;
                ctx.vertex_xyz(cx, y_f, cz + CHUNK)?;
                ctx.end(PrimitiveKind::LineLoop)?;
                y += GRID_STEP as i32;
            }
            Ok(())
        })
    }
}
