use crate::coords::Vector3;
use crate::paint::Color;
use crate::style::{LineStyle, RenderType};

use super::error::RenderError;
use super::format::PrimitiveKind;
use super::sink::RenderSink;

/// What a region draws with for one frame.
///
/// World coordinates passed to [`RenderContext::vertex`] are translated to
/// camera-relative ones before reaching the sink.
pub struct RenderContext<'a> {
    sink: &'a mut dyn RenderSink,
    camera_pos: Vector3,
    partial_ticks: f32,
}

impl<'a> RenderContext<'a> {
    pub fn new(sink: &'a mut dyn RenderSink, camera_pos: Vector3, partial_ticks: f32) -> Self {
        Self { sink, camera_pos, partial_ticks }
    }

    #[inline]
    pub fn camera_pos(&self) -> Vector3 {
        self.camera_pos
    }

    /// Interpolation fraction between the last two simulation ticks.
    #[inline]
    pub fn partial_ticks(&self) -> f32 {
        self.partial_ticks
    }

    pub fn sink(&mut self) -> &mut dyn RenderSink {
        &mut *self.sink
    }

    #[inline]
    pub fn apply(&mut self, line: &LineStyle, requested: RenderType) -> Result<bool, RenderError> {
        self.sink.apply(line, requested)
    }

    #[inline]
    pub fn color(&mut self, color: Color) {
        self.sink.color(color);
    }

    #[inline]
    pub fn begin(&mut self, kind: PrimitiveKind) -> Result<(), RenderError> {
        self.sink.begin(kind)
    }

    #[inline]
    pub fn end(&mut self, kind: PrimitiveKind) -> Result<(), RenderError> {
        self.sink.end(kind)
    }

    #[inline]
    pub fn vertex(&mut self, p: Vector3) -> Result<(), RenderError> {
        let rel = p - self.camera_pos;
        self.sink.vertex(rel.x, rel.y, rel.z)
    }

    #[inline]
    pub fn vertex_xyz(&mut self, x: f64, y: f64, z: f64) -> Result<(), RenderError> {
        self.vertex(Vector3::new(x, y, z))
    }

    /// Emits `points` as one primitive of `kind`.
    pub fn primitive(&mut self, kind: PrimitiveKind, points: &[Vector3]) -> Result<(), RenderError> {
        self.sink.begin(kind)?;
        for p in points {
            self.vertex(*p)?;
        }
        self.sink.end(kind)
    }

    /// Runs `draw` once per line of `lines` that matches `requested`, with
    /// the sink configured for that line.
    pub fn for_each_line(
        &mut self,
        lines: &[LineStyle],
        requested: RenderType,
        mut draw: impl FnMut(&mut Self) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        for line in lines {
            if self.sink.apply(line, requested)? {
                self.sink.color(line.color);
                draw(self)?;
            }
        }
        Ok(())
    }
}
