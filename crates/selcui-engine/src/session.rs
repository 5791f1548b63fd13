//! Handshake timing around world joins and identity changes.

use selcui_protocol::handshake;

use crate::selection::Selections;

/// Ticks between an identity change and the repeated handshake.
pub const DELAYED_HANDSHAKE_TICKS: u32 = 10;

/// Makes the authority re-send the current selection.
pub const RESEND_COMMAND: &str = "we cui";

/// Clears the selection on the authority side.
pub const CLEAR_COMMAND: &str = "/sel";

/// Something the host should send to the authority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outgoing {
    /// Encoded `v|<version>` payload.
    Handshake(String),
    Command(&'static str),
}

impl Outgoing {
    pub fn handshake() -> Self {
        Outgoing::Handshake(handshake().encode())
    }
}

/// Which world and player the host is currently in. Opaque ids; only
/// equality matters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub world: Option<u64>,
    pub player: Option<u64>,
}

#[derive(Debug, Default)]
pub struct HandshakeScheduler {
    last: Identity,
    delayed: u32,
    promiscuous: bool,
}

impl HandshakeScheduler {
    pub fn new(promiscuous: bool) -> Self {
        Self { promiscuous, ..Self::default() }
    }

    pub fn on_join(&mut self) -> Vec<Outgoing> {
        log::debug!("joined game, sending initial handshake");
        vec![Outgoing::handshake()]
    }

    /// Called once per game tick.
    pub fn tick(&mut self, identity: Identity, selections: &mut Selections) -> Vec<Outgoing> {
        let mut out = Vec::new();

        if identity != self.last {
            self.last = identity;
            log::debug!("world change detected, sending new handshake");
            selections.clear_regions();
            out.push(Outgoing::handshake());
            self.delayed = DELAYED_HANDSHAKE_TICKS;
            if identity.player.is_some() && self.promiscuous {
                out.push(Outgoing::Command(RESEND_COMMAND));
            }
        }

        if self.delayed > 0 {
            self.delayed -= 1;
            if self.delayed == 0 {
                out.push(Outgoing::handshake());
            }
        }

        out
    }

    #[inline]
    pub fn pending_ticks(&self) -> u32 {
        self.delayed
    }
}

/// Clear-selection key: asks the authority to clear and, if configured,
/// drops the local regions right away.
pub fn clear_key(selections: &mut Selections) -> Outgoing {
    if selections.config().clear_all_on_key {
        selections.clear_regions();
    }
    Outgoing::Command(CLEAR_COMMAND)
}
