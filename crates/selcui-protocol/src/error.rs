use std::fmt;

/// A decode error for a single wire message.
///
/// Errors are local to one message: the caller drops the event and carries on.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolError {
    /// The message had no event key at all (`""`, `"+"`, `"|x"`).
    EmptyMessage,
    /// The event key is not in the registry.
    UnknownEvent(String),
    /// The argument vector length is outside the registered bounds.
    ArgumentCount {
        key: String,
        min: usize,
        max: usize,
        got: usize,
    },
    /// An accessor asked for an argument index past the end of the vector.
    MissingArgument { index: usize },
    /// An argument could not be parsed as the requested type.
    MalformedArgument {
        index: usize,
        value: String,
        expected: &'static str,
    },
    /// `s|<type>` named a region type the overlay does not know.
    UnknownRegion(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::EmptyMessage => write!(f, "empty message"),
            ProtocolError::UnknownEvent(key) => write!(f, "unknown event key {:?}", key),
            ProtocolError::ArgumentCount { key, min, max, got } => {
                if min == max {
                    write!(f, "event {:?} takes {} argument(s), got {}", key, min, got)
                } else {
                    write!(f, "event {:?} takes {}..={} arguments, got {}", key, min, max, got)
                }
            }
            ProtocolError::MissingArgument { index } => {
                write!(f, "missing argument #{}", index)
            }
            ProtocolError::MalformedArgument { index, value, expected } => {
                write!(f, "argument #{} ({:?}) is not a valid {}", index, value, expected)
            }
            ProtocolError::UnknownRegion(name) => write!(f, "unsupported region type {:?}", name),
        }
    }
}

impl std::error::Error for ProtocolError {}
