//! Per-frame draw of the selection model through the backend chain.

use crate::coords::Vector3;
use crate::render::{
    FramePass, GpuState, PipelineChain, PipelineProvider, RenderContext, RenderError, RenderSink,
};
use crate::selection::Selections;

/// Host-supplied parameters of one frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameInfo {
    pub pass: FramePass,
    pub camera_pos: Vector3,
    pub partial_ticks: f32,
}

impl FrameInfo {
    pub fn world(camera_pos: Vector3, partial_ticks: f32) -> Self {
        Self { pass: FramePass::World, camera_pos, partial_ticks }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Drawn,
    /// The active backend does not draw this pass.
    Skipped,
    /// Drawing failed; the next frame uses the next backend.
    Failed,
    /// Every backend has failed. Nothing will be drawn again.
    Disabled,
}

/// Owns the backend chain and turns every draw failure into a failover.
pub struct WorldRenderer {
    chain: PipelineChain,
}

impl WorldRenderer {
    pub fn new(providers: Vec<Box<dyn PipelineProvider>>) -> Self {
        Self { chain: PipelineChain::new(providers) }
    }

    #[inline]
    pub fn chain(&self) -> &PipelineChain {
        &self.chain
    }

    pub fn render(&mut self, selections: &Selections, frame: FrameInfo) -> FrameOutcome {
        let result = {
            let Ok(active) = self.chain.provide() else {
                return FrameOutcome::Disabled;
            };
            if !active.provider.should_render(frame.pass) {
                return FrameOutcome::Skipped;
            }

            let sink = active.sink;
            let previous = sink.set_state(GpuState::overlay());
            let result = draw(sink, selections, frame);
            sink.set_state(previous);
            result
        };

        match result {
            Ok(()) => FrameOutcome::Drawn,
            Err(e) => {
                log::error!(
                    "failed to render selections with `{}`: {}",
                    self.chain.active_id().unwrap_or("?"),
                    e
                );
                self.chain.invalidate();
                FrameOutcome::Failed
            }
        }
    }
}

fn draw(sink: &mut dyn RenderSink, selections: &Selections, frame: FrameInfo) -> Result<(), RenderError> {
    let mut ctx = RenderContext::new(sink, frame.camera_pos, frame.partial_ticks);
    selections.render(&mut ctx)?;
    ctx.sink().flush()
}
