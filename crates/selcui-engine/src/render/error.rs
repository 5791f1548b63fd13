use std::fmt;

use super::format::PrimitiveKind;

/// Misuse of the sink state machine, or a backend failing to take a batch.
///
/// Not recoverable mid-frame: the frame orchestrator fails the backend over.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// `vertex` before any `color` on this sink.
    MissingColorState,
    /// `vertex` or `end_*` outside a primitive.
    NotActive,
    AlreadyActive { requested: PrimitiveKind, active: PrimitiveKind },
    MismatchedEnd { expected: PrimitiveKind, actual: PrimitiveKind },
    FlushWhileActive,
    Backend(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::MissingColorState => f.write_str("no colour has been set"),
            RenderError::NotActive => f.write_str("tried to draw when not active"),
            RenderError::AlreadyActive { requested, active } => write!(
                f,
                "tried to begin {} before {} was ended",
                requested, active
            ),
            RenderError::MismatchedEnd { expected, actual } => {
                write!(f, "expected to end {} but was in {}", expected, actual)
            }
            RenderError::FlushWhileActive => f.write_str("tried to flush while still active"),
            RenderError::Backend(msg) => write!(f, "backend error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// The backend chain has no candidates left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Exhausted,
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Exhausted => f.write_str("no render pipeline is available"),
        }
    }
}

impl std::error::Error for PipelineError {}
