//! Error types for the pseudo-qubit network.

use thiserror::Error;

use crate::config::ConfigError;
use crate::network::RunState;

/// Errors produced by the network controller, gates, measurement and the
/// search procedures built on top of them.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NetError {
    /// A size or parameter that can never be valid (e.g. a zero-unit network).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The operation is not allowed in the controller's current run-state.
    #[error("Invalid state: expected {expected}, found {found}")]
    InvalidState {
        /// What the operation needed, e.g. "Idle" or "a live state vector".
        expected: String,
        /// The run-state actually observed.
        found: RunState,
    },

    /// A gate operand points past the end of the state vector.
    #[error("Slot {index} is out of range for a network of {len} units")]
    IndexOutOfRange {
        /// The offending slot index.
        index: usize,
        /// Number of slots in the live state vector.
        len: usize,
    },

    /// A search target whose length does not match the network size.
    #[error("Target pattern has {found} bits but the network has {expected} units")]
    TargetLength {
        /// Network size N.
        expected: usize,
        /// Length of the supplied target.
        found: usize,
    },

    /// Loading or validating a configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl NetError {
    pub(crate) fn invalid_state(expected: impl Into<String>, found: RunState) -> Self {
        NetError::InvalidState {
            expected: expected.into(),
            found,
        }
    }
}

/// Result type for network operations.
pub type NetResult<T> = Result<T, NetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NetError::InvalidConfiguration("network needs at least one unit".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: network needs at least one unit"
        );

        let err = NetError::invalid_state("Idle", RunState::Running);
        assert_eq!(err.to_string(), "Invalid state: expected Idle, found Running");

        let err = NetError::IndexOutOfRange { index: 7, len: 4 };
        assert_eq!(
            err.to_string(),
            "Slot 7 is out of range for a network of 4 units"
        );
    }

    #[test]
    fn test_config_error_is_transparent() {
        let err: NetError = ConfigError::ValidationError("bad".to_string()).into();
        assert_eq!(err.to_string(), "Validation error: bad");
    }
}
