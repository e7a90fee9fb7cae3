use thiserror::Error;

use crate::SharedError;

/// Errors that can occur in the event system.
///
/// - `UnhandledError`: an `"error"` event carrying an error was emitted and nothing consumed it.
/// - `EventConstruction`: the host could not build the event through either construction path.
#[derive(Debug, Clone, Error)]
pub enum EmitterError {
    /// Emitting Event:
    /// - `"error"` emitted with an error payload, no listeners and no host target.
    #[error("unhandled `error` event: {0}")]
    UnhandledError(SharedError),

    /// Emitting Event through a host target:
    /// - Both the modern constructor and the legacy two-step path failed.
    #[error("failed to construct event `{event}`: {reason}")]
    EventConstruction { event: String, reason: TargetError },
}

impl EmitterError {
    /// The error payload of an unhandled `"error"` event, if this is one.
    pub fn payload(&self) -> Option<&SharedError> {
        match self {
            EmitterError::UnhandledError(err) => Some(err),
            EmitterError::EventConstruction { .. } => None,
        }
    }
}

impl PartialEq for EmitterError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (EmitterError::UnhandledError(a), EmitterError::UnhandledError(b)) => {
                crate::value::same_allocation(a, b)
            }
            (
                EmitterError::EventConstruction { event: e1, reason: r1 },
                EmitterError::EventConstruction { event: e2, reason: r2 },
            ) => e1 == e2 && r1 == r2,
            _ => false,
        }
    }
}

/// Failures reported by a host event target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    /// The host does not expose the named operation.
    #[error("host does not support `{0}`")]
    Unsupported(&'static str),

    /// The host rejected the operation.
    #[error("host error: {0}")]
    Host(String),
}
