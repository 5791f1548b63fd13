use crate::paint::Color;
use crate::style::{DepthFunc, LineStyle, RenderType, DEFAULT_LINE_WIDTH};

use super::error::RenderError;
use super::format::PrimitiveKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BlendMode {
    Opaque,
    /// `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`.
    Alpha,
}

/// Fixed-function state a sink draws with.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GpuState {
    pub cull: bool,
    pub blend: BlendMode,
    pub depth_test: bool,
    pub depth_write: bool,
    pub depth_func: DepthFunc,
    pub line_width: f32,
}

impl GpuState {
    /// Baseline for drawing selections.
    pub const fn overlay() -> Self {
        Self {
            cull: false,
            blend: BlendMode::Alpha,
            depth_test: true,
            depth_write: true,
            depth_func: DepthFunc::LessEqual,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Depth compare actually used for a batch with per-line `func`.
    #[inline]
    pub fn effective_depth(&self, func: DepthFunc) -> DepthFunc {
        if self.depth_test { func } else { DepthFunc::Always }
    }
}

/// What the host has bound outside of overlay drawing.
impl Default for GpuState {
    fn default() -> Self {
        Self {
            cull: true,
            blend: BlendMode::Opaque,
            depth_test: true,
            depth_write: true,
            depth_func: DepthFunc::LessEqual,
            line_width: 1.0,
        }
    }
}

/// Per-frame consumer of overlay draw calls.
///
/// Calls must nest as `begin_* vertex* end_*`; `flush` is only legal between
/// primitives. A sink is reused across frames.
pub trait RenderSink {
    /// Sticky colour for following vertices.
    fn color(&mut self, color: Color);

    /// Returns whether `line` is drawn for the `requested` pass. On a match,
    /// switches to the line's width and depth function, flushing first if
    /// either changes.
    fn apply(&mut self, line: &LineStyle, requested: RenderType) -> Result<bool, RenderError>;

    fn begin(&mut self, kind: PrimitiveKind) -> Result<(), RenderError>;

    fn end(&mut self, kind: PrimitiveKind) -> Result<(), RenderError>;

    fn vertex(&mut self, x: f64, y: f64, z: f64) -> Result<(), RenderError>;

    fn flush(&mut self) -> Result<(), RenderError>;

    /// Installs `state` and returns the one it replaces.
    fn set_state(&mut self, state: GpuState) -> GpuState;

    fn begin_lines(&mut self) -> Result<(), RenderError> {
        self.begin(PrimitiveKind::Lines)
    }

    fn end_lines(&mut self) -> Result<(), RenderError> {
        self.end(PrimitiveKind::Lines)
    }

    fn begin_line_loop(&mut self) -> Result<(), RenderError> {
        self.begin(PrimitiveKind::LineLoop)
    }

    fn end_line_loop(&mut self) -> Result<(), RenderError> {
        self.end(PrimitiveKind::LineLoop)
    }

    fn begin_quads(&mut self) -> Result<(), RenderError> {
        self.begin(PrimitiveKind::Quads)
    }

    fn end_quads(&mut self) -> Result<(), RenderError> {
        self.end(PrimitiveKind::Quads)
    }
}
