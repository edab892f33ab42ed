//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate applied to the wrong number of qubits.
    #[error("Gate '{gate}' requires {expected} qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate: String,
        /// Expected number of qubits.
        expected: u32,
        /// Actual number of qubits provided.
        got: u32,
    },

    /// A named qubit reference reached a stage that requires resolved
    /// integer indices.
    #[error("Qubit reference '{0}' was not resolved to an index")]
    UnresolvedQubit(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
