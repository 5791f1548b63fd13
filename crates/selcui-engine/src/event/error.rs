use std::fmt;

use selcui_protocol::{EventKind, ProtocolError, RegionType};

use crate::selection::Slot;

/// Why a single wire message left the region model untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum EventError {
    Protocol(ProtocolError),
    /// The event needs a region but the slot is empty.
    NoSelection { slot: Slot },
    /// The slot holds a region of another shape; usually a stale message
    /// that arrived after a re-select.
    VariantMismatch {
        event: EventKind,
        expected: &'static [RegionType],
        actual: RegionType,
    },
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::Protocol(e) => write!(f, "protocol error: {}", e),
            EventError::NoSelection { slot } => write!(f, "no active {} selection", slot),
            EventError::VariantMismatch { event, expected, actual } => {
                write!(f, "{} event does not apply to a {} region (expected ", event, actual)?;
                for (i, kind) in expected.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" or ")?;
                    }
                    write!(f, "{}", kind)?;
                }
                f.write_str(")")
            }
        }
    }
}

impl std::error::Error for EventError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EventError::Protocol(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ProtocolError> for EventError {
    fn from(e: ProtocolError) -> Self {
        EventError::Protocol(e)
    }
}
