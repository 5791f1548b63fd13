use std::fmt;

/// One of the two concurrently tracked selections.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Slot {
    Primary,
    /// Addressed by a leading `+` on the wire.
    Multi,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Primary, Slot::Multi];

    #[inline]
    pub fn from_multi(multi: bool) -> Self {
        if multi { Slot::Multi } else { Slot::Primary }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Primary => f.write_str("primary"),
            Slot::Multi => f.write_str("multi"),
        }
    }
}
