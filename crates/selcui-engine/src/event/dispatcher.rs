use selcui_protocol::decode;

use crate::selection::Selections;

use super::apply::{apply, Applied};
use super::error::EventError;
use super::queue::EventQueue;

/// Counters since the dispatcher was created.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub applied: u64,
    pub dropped: u64,
}

/// Decode-and-apply boundary for raw wire messages.
#[derive(Debug, Default)]
pub struct Dispatcher {
    stats: DispatchStats,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    /// Decodes and applies `raw`, reporting any failure to the caller.
    pub fn dispatch(&mut self, raw: &str, selections: &mut Selections) -> Result<Applied, EventError> {
        let envelope = decode(raw)?;
        apply(envelope, selections)
    }

    /// Like [`dispatch`](Self::dispatch), but failures end here: they are
    /// logged and the message is dropped.
    pub fn on_message(&mut self, raw: &str, selections: &mut Selections) -> Option<Applied> {
        if selections.config().debug {
            log::debug!("received CUI event `{}`", raw);
        } else {
            log::trace!("received CUI event `{}`", raw);
        }

        match self.dispatch(raw, selections) {
            Ok(applied) => {
                self.stats.applied += 1;
                Some(applied)
            }
            Err(e) => {
                self.stats.dropped += 1;
                log::debug!("dropping CUI event `{}`: {}", raw, e);
                None
            }
        }
    }

    /// Handles everything waiting in `queue`. Returns how many messages
    /// were taken.
    pub fn pump(&mut self, queue: &EventQueue, selections: &mut Selections) -> usize {
        let mut taken = 0;
        for raw in queue.drain() {
            self.on_message(&raw, selections);
            taken += 1;
        }
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::channel;
    use crate::selection::Slot;
    use selcui_protocol::{ProtocolError, RegionType};

    #[test]
    fn malformed_messages_are_dropped_and_counted() {
        let mut d = Dispatcher::new();
        let mut sel = Selections::default();

        assert!(d.on_message("s|cuboid", &mut sel).is_some());
        assert!(d.on_message("zz|1", &mut sel).is_none());
        assert!(d.on_message("p|0|x|2|3", &mut sel).is_none());
        assert!(d.on_message("", &mut sel).is_none());

        assert_eq!(d.stats(), DispatchStats { applied: 1, dropped: 3 });
        assert_eq!(sel.get(Slot::Primary).map(|r| r.kind()), Some(RegionType::Cuboid));
    }

    #[test]
    fn dispatch_surfaces_protocol_errors() {
        let mut d = Dispatcher::new();
        let mut sel = Selections::default();
        assert_eq!(
            d.dispatch("s|torus", &mut sel),
            Err(EventError::Protocol(ProtocolError::UnknownRegion("torus".into())))
        );
        assert!(sel.is_empty());
    }

    #[test]
    fn pump_applies_queued_messages_in_order() {
        let (tx, rx) = channel();
        tx.send("s|cuboid");
        tx.send("+s|cylinder");
        tx.send("s|ellipsoid");

        let mut d = Dispatcher::new();
        let mut sel = Selections::default();
        assert_eq!(d.pump(&rx, &mut sel), 3);
        assert_eq!(sel.get(Slot::Primary).map(|r| r.kind()), Some(RegionType::Ellipsoid));
        assert_eq!(sel.get(Slot::Multi).map(|r| r.kind()), Some(RegionType::Cylinder));
        assert_eq!(d.pump(&rx, &mut sel), 0);
    }
}
