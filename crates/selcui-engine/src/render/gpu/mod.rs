//! wgpu backends for the overlay.
//!
//! Two providers share one [`GpuOverlay`]: `ribbon` extrudes line segments
//! into screen-facing quads so line width is honoured, `lines` falls back to
//! hardware line lists. Both turn quads into indexed triangles.
//!
//! Convention:
//! - vertices are camera-relative world units
//! - `RenderCtx::view_proj` maps them to clip space
//! - the host owns the depth attachment ([`DEPTH_FORMAT`]) and clears it

mod ctx;
mod overlay;
mod target;

pub use ctx::{RenderCtx, RenderTarget};
pub use overlay::{GpuOverlay, OverlayCaps, DEPTH_FORMAT};
pub use target::{GpuTarget, LinePipelineProvider, RibbonPipelineProvider, SharedOverlay};
