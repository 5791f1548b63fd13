//! Overlay rendering.
//!
//! Regions draw through a [`RenderSink`]: `color`, then `begin_*`, vertices,
//! `end_*`, and a final `flush`. [`BufferSink`] implements the batching state
//! machine in front of a [`DrawTarget`]; which target is used is decided by
//! the [`PipelineChain`] of [`PipelineProvider`]s.

mod batching;
mod context;
mod error;
mod format;
mod pipeline;
mod recording;
mod sink;
mod vertex;

pub mod gpu;

pub use batching::{BufferSink, DrawTarget};
pub use context::RenderContext;
pub use error::{PipelineError, RenderError};
pub use format::{DrawMode, PrimitiveKind, PrimitiveType, TypeSet, VertexFormat};
pub use pipeline::{ActivePipeline, FramePass, PipelineChain, PipelineProvider};
pub use recording::{HeadlessPipelineProvider, RecordingTarget};
pub use sink::{BlendMode, GpuState, RenderSink};
pub use vertex::{Batch, PositionColorNormalVertex, PositionColorVertex, VertexData};
