use bytemuck::{Pod, Zeroable};

use crate::style::DepthFunc;

use super::format::{DrawMode, VertexFormat};
use super::sink::GpuState;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PositionColorVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct PositionColorNormalVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
    pub normal: [f32; 3],
}

/// Vertex storage of one batch, typed by its format.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexData {
    PositionColor(Vec<PositionColorVertex>),
    PositionColorNormal(Vec<PositionColorNormalVertex>),
}

impl VertexData {
    pub fn new(format: VertexFormat) -> Self {
        match format {
            VertexFormat::PositionColor => VertexData::PositionColor(Vec::new()),
            VertexFormat::PositionColorNormal => VertexData::PositionColorNormal(Vec::new()),
        }
    }

    pub fn format(&self) -> VertexFormat {
        match self {
            VertexData::PositionColor(_) => VertexFormat::PositionColor,
            VertexData::PositionColorNormal(_) => VertexFormat::PositionColorNormal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            VertexData::PositionColor(v) => v.len(),
            VertexData::PositionColorNormal(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn positions(&self) -> Vec<[f32; 3]> {
        match self {
            VertexData::PositionColor(v) => v.iter().map(|v| v.position).collect(),
            VertexData::PositionColorNormal(v) => v.iter().map(|v| v.position).collect(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            VertexData::PositionColor(v) => bytemuck::cast_slice(v),
            VertexData::PositionColorNormal(v) => bytemuck::cast_slice(v),
        }
    }

    /// Appends a vertex; `normal` is dropped for formats without one.
    pub(crate) fn push(&mut self, position: [f32; 3], color: [f32; 4], normal: Option<[f32; 3]>) {
        match self {
            VertexData::PositionColor(v) => v.push(PositionColorVertex { position, color }),
            VertexData::PositionColorNormal(v) => v.push(PositionColorNormalVertex {
                position,
                color,
                normal: normal.unwrap_or([0.0; 3]),
            }),
        }
    }
}

/// One finished GPU submission.
///
/// `line_width` and `depth_func` are the per-line settings in force when the
/// batch was closed; `state` is the sink's baseline state at that time.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    pub mode: DrawMode,
    pub format: VertexFormat,
    pub line_width: f32,
    pub depth_func: DepthFunc,
    pub state: GpuState,
    pub data: VertexData,
}

impl Batch {
    /// Number of line segments or quads.
    pub fn primitive_count(&self) -> usize {
        match self.mode {
            DrawMode::Lines => self.data.len() / 2,
            DrawMode::Quads => self.data.len() / 4,
        }
    }
}
