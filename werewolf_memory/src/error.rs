//! Error types for the werewolf_memory crate.

/// Errors raised by the session memory stores.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryError {
    /// A read referenced a player that was never recorded.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// A numeric argument was rejected before anything was recorded.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },
}

pub type MemoryResult<T> = Result<T, MemoryError>;

/// Reject NaN and infinities so scores stay totally ordered.
pub(crate) fn ensure_finite(argument: &'static str, value: f64) -> MemoryResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        tracing::warn!(argument, value, "rejected non-finite argument");
        Err(MemoryError::InvalidArgument {
            argument,
            reason: format!("expected a finite number, got {value}"),
        })
    }
}
