use std::cell::RefCell;
use std::rc::Rc;

use super::batching::{BufferSink, DrawTarget};
use super::error::RenderError;
use super::format::TypeSet;
use super::pipeline::PipelineProvider;
use super::sink::RenderSink;
use super::vertex::Batch;

/// Draw target that keeps every submitted batch in memory.
///
/// Clones share the same log, so a test can hand one clone to a sink and
/// inspect the other.
#[derive(Debug, Clone)]
pub struct RecordingTarget {
    types: TypeSet,
    log: Rc<RefCell<Vec<Batch>>>,
}

impl RecordingTarget {
    pub fn new(types: TypeSet) -> Self {
        Self { types, log: Rc::new(RefCell::new(Vec::new())) }
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.log.borrow().clone()
    }

    pub fn submissions(&self) -> usize {
        self.log.borrow().len()
    }

    /// Total segments + quads across all batches.
    pub fn primitive_count(&self) -> usize {
        self.log.borrow().iter().map(Batch::primitive_count).sum()
    }

    pub fn clear(&self) {
        self.log.borrow_mut().clear();
    }
}

impl DrawTarget for RecordingTarget {
    fn types(&self) -> TypeSet {
        self.types
    }

    fn submit(&mut self, batch: Batch) -> Result<(), RenderError> {
        self.log.borrow_mut().push(batch);
        Ok(())
    }
}

/// Backend without a GPU. Always available; last entry of a chain.
#[derive(Debug, Clone)]
pub struct HeadlessPipelineProvider {
    target: RecordingTarget,
}

impl HeadlessPipelineProvider {
    pub const ID: &'static str = "headless";

    pub fn new(target: RecordingTarget) -> Self {
        Self { target }
    }
}

impl Default for HeadlessPipelineProvider {
    fn default() -> Self {
        Self::new(RecordingTarget::new(TypeSet::RIBBON))
    }
}

impl PipelineProvider for HeadlessPipelineProvider {
    fn id(&self) -> &str {
        Self::ID
    }

    fn available(&self) -> bool {
        true
    }

    fn provide(&self) -> anyhow::Result<Box<dyn RenderSink>> {
        Ok(Box::new(BufferSink::new(self.target.clone())))
    }
}
