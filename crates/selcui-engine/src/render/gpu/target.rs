use std::cell::RefCell;
use std::rc::Rc;

use crate::render::batching::{BufferSink, DrawTarget};
use crate::render::error::RenderError;
use crate::render::format::TypeSet;
use crate::render::pipeline::{FramePass, PipelineProvider};
use crate::render::sink::RenderSink;
use crate::render::vertex::Batch;

use super::overlay::GpuOverlay;

/// Shared handle to the overlay the host encodes each frame.
pub type SharedOverlay = Rc<RefCell<GpuOverlay>>;

/// Draw target that queues batches on a [`GpuOverlay`].
pub struct GpuTarget {
    overlay: SharedOverlay,
    types: TypeSet,
}

impl GpuTarget {
    pub fn new(overlay: SharedOverlay, types: TypeSet) -> Self {
        Self { overlay, types }
    }
}

impl DrawTarget for GpuTarget {
    fn types(&self) -> TypeSet {
        self.types
    }

    fn submit(&mut self, batch: Batch) -> Result<(), RenderError> {
        let mut overlay = self
            .overlay
            .try_borrow_mut()
            .map_err(|_| RenderError::Backend("overlay is being encoded".into()))?;
        overlay.queue_batch(batch)
    }
}

/// Width-aware lines drawn as screen-facing ribbons.
pub struct RibbonPipelineProvider {
    overlay: SharedOverlay,
}

impl RibbonPipelineProvider {
    pub const ID: &'static str = "ribbon";

    pub fn new(overlay: SharedOverlay) -> Self {
        Self { overlay }
    }
}

impl PipelineProvider for RibbonPipelineProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn available(&self) -> bool {
        self.overlay
            .try_borrow()
            .map(|o| o.caps().supports_ribbons())
            .unwrap_or(false)
    }

    fn provide(&self) -> anyhow::Result<Box<dyn RenderSink>> {
        let target = GpuTarget::new(self.overlay.clone(), TypeSet::RIBBON);
        Ok(Box::new(BufferSink::new(target)))
    }

    fn should_render(&self, pass: FramePass) -> bool {
        pass == FramePass::World
    }
}

/// Plain hardware lines. Ignores line width.
pub struct LinePipelineProvider {
    overlay: SharedOverlay,
}

impl LinePipelineProvider {
    pub const ID: &'static str = "lines";

    pub fn new(overlay: SharedOverlay) -> Self {
        Self { overlay }
    }
}

impl PipelineProvider for LinePipelineProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn available(&self) -> bool {
        self.overlay.try_borrow().is_ok()
    }

    fn provide(&self) -> anyhow::Result<Box<dyn RenderSink>> {
        let target = GpuTarget::new(self.overlay.clone(), TypeSet::PLAIN);
        Ok(Box::new(BufferSink::new(target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::Color;
    use crate::render::gpu::overlay::OverlayCaps;

    fn overlay(max_vertex_attributes: u32) -> SharedOverlay {
        Rc::new(RefCell::new(GpuOverlay::new(OverlayCaps {
            max_buffer_size: 1 << 20,
            max_vertex_attributes,
            uniform_alignment: 256,
        })))
    }

    #[test]
    fn ribbon_needs_enough_vertex_attributes() {
        assert!(RibbonPipelineProvider::new(overlay(16)).available());
        assert!(!RibbonPipelineProvider::new(overlay(2)).available());
        assert!(LinePipelineProvider::new(overlay(2)).available());
    }

    #[test]
    fn provided_sink_queues_on_the_overlay() {
        let shared = overlay(16);
        let provider = RibbonPipelineProvider::new(shared.clone());
        let mut sink = provider.provide().unwrap();
        sink.color(Color::white());
        sink.begin_line_loop().unwrap();
        sink.vertex(0.0, 0.0, 0.0).unwrap();
        sink.vertex(1.0, 0.0, 0.0).unwrap();
        sink.vertex(1.0, 1.0, 0.0).unwrap();
        sink.end_line_loop().unwrap();
        sink.flush().unwrap();
        assert_eq!(shared.borrow().pending_draws(), 1);
    }
}
