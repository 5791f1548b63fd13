use super::error::PipelineError;
use super::sink::RenderSink;

/// Which pass of the host's frame is being drawn.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FramePass {
    World,
    /// Depth-only pass (shadow maps and similar).
    Shadow,
}

/// A rendering strategy the overlay can draw through.
pub trait PipelineProvider {
    fn id(&self) -> &str;

    /// Capability probe; cheap, called before `provide`.
    fn available(&self) -> bool;

    fn provide(&self) -> anyhow::Result<Box<dyn RenderSink>>;

    fn should_render(&self, pass: FramePass) -> bool {
        pass == FramePass::World
    }
}

/// The provider in use plus its sink.
pub struct ActivePipeline<'a> {
    pub provider: &'a dyn PipelineProvider,
    pub sink: &'a mut dyn RenderSink,
}

/// Ordered backend candidates with the currently selected one.
///
/// The index only moves forward. Once every candidate has been tried the
/// chain stays exhausted for the rest of its life.
pub struct PipelineChain {
    candidates: Vec<Box<dyn PipelineProvider>>,
    active_index: usize,
    cached: Option<Box<dyn RenderSink>>,
    exhausted: bool,
}

impl PipelineChain {
    pub fn new(candidates: Vec<Box<dyn PipelineProvider>>) -> Self {
        Self { candidates, active_index: 0, cached: None, exhausted: false }
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_id(&self) -> Option<&str> {
        if self.exhausted {
            return None;
        }
        self.candidates.get(self.active_index).map(|p| p.id())
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Returns the cached sink, probing forward from the current index if
    /// there is none.
    pub fn provide(&mut self) -> Result<ActivePipeline<'_>, PipelineError> {
        if self.exhausted {
            return Err(PipelineError::Exhausted);
        }

        while self.cached.is_none() {
            let Some(provider) = self.candidates.get(self.active_index) else {
                self.exhausted = true;
                log::error!("no render pipeline is available; selection rendering disabled");
                return Err(PipelineError::Exhausted);
            };

            if !provider.available() {
                log::debug!("render pipeline `{}` is not available", provider.id());
                self.active_index += 1;
                continue;
            }

            match provider.provide() {
                Ok(sink) => {
                    log::info!("using render pipeline `{}`", provider.id());
                    self.cached = Some(sink);
                }
                Err(e) => {
                    log::error!("failed to create render pipeline `{}`: {:#}", provider.id(), e);
                    self.active_index += 1;
                }
            }
        }

        let provider = &*self.candidates[self.active_index];
        let Some(sink) = self.cached.as_deref_mut() else {
            return Err(PipelineError::Exhausted);
        };
        Ok(ActivePipeline { provider, sink })
    }

    /// Drops the cached sink and moves on to the next candidate.
    pub fn invalidate(&mut self) {
        if self.exhausted {
            return;
        }
        if let Some(p) = self.candidates.get(self.active_index) {
            log::info!("render pipeline `{}` failed; falling back", p.id());
        }
        self.cached = None;
        self.active_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::format::TypeSet;
    use crate::render::recording::{HeadlessPipelineProvider, RecordingTarget};
    use std::cell::Cell;
    use std::rc::Rc;

    struct Broken {
        calls: Rc<Cell<usize>>,
        available: bool,
    }

    impl PipelineProvider for Broken {
        fn id(&self) -> &str {
            "broken"
        }

        fn available(&self) -> bool {
            self.available
        }

        fn provide(&self) -> anyhow::Result<Box<dyn RenderSink>> {
            self.calls.set(self.calls.get() + 1);
            anyhow::bail!("no device")
        }
    }

    fn broken(available: bool) -> (Box<dyn PipelineProvider>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        (Box::new(Broken { calls: calls.clone(), available }), calls)
    }

    #[test]
    fn skips_failing_and_unavailable_candidates() {
        let (a, a_calls) = broken(true);
        let (b, b_calls) = broken(false);
        let mut chain = PipelineChain::new(vec![a, b, Box::new(HeadlessPipelineProvider::default())]);

        for _ in 0..3 {
            let active = chain.provide().unwrap();
            assert_eq!(active.provider.id(), HeadlessPipelineProvider::ID);
        }
        assert_eq!(chain.active_index(), 2);
        assert_eq!(a_calls.get(), 1);
        assert_eq!(b_calls.get(), 0);
    }

    #[test]
    fn invalidate_advances_and_never_wraps() {
        let rec = RecordingTarget::new(TypeSet::PLAIN);
        let mut chain = PipelineChain::new(vec![
            Box::new(HeadlessPipelineProvider::new(rec.clone())),
            Box::new(HeadlessPipelineProvider::new(rec)),
        ]);
        chain.provide().unwrap();
        chain.invalidate();
        assert_eq!(chain.active_index(), 1);
        chain.provide().unwrap();
        chain.invalidate();

        assert_eq!(chain.provide().err(), Some(PipelineError::Exhausted));
        assert!(chain.is_exhausted());
        assert_eq!(chain.active_id(), None);
        chain.invalidate();
        assert_eq!(chain.provide().err(), Some(PipelineError::Exhausted));
    }

    #[test]
    fn exhausted_chain_is_not_reprobed() {
        let (a, calls) = broken(true);
        let mut chain = PipelineChain::new(vec![a]);
        for _ in 0..5 {
            assert!(chain.provide().is_err());
        }
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn default_gate_skips_shadow_pass() {
        let p = HeadlessPipelineProvider::default();
        assert!(p.should_render(FramePass::World));
        assert!(!p.should_render(FramePass::Shadow));
    }
}
