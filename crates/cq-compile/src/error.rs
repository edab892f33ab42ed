//! Error types for the synthesis backend.
//!
//! Every error here is fatal for the statement or program being
//! processed: the backend is a set of pure functions, so retrying cannot
//! change the outcome, and no partial output is ever returned alongside
//! an error.

use cq_ir::IrError;
use thiserror::Error;

/// Errors that can occur during synthesis and routing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Decomposition requested for a gate outside the closed supported
    /// set.
    #[error("Unsupported gate '{0}' for decomposition")]
    UnsupportedGate(String),

    /// A statement shape the synthesizer does not understand.
    #[error("Unrecognized statement form '{rule}': {node}")]
    UnrecognizedStatement {
        /// The statement's rule tag.
        rule: String,
        /// Rendered form of the offending node.
        node: String,
    },

    /// A gate form the specializer does not understand.
    #[error("Unrecognized gate form '{rule}': {node}")]
    UnrecognizedGateForm {
        /// The statement's rule tag.
        rule: String,
        /// Rendered form of the offending node.
        node: String,
    },

    /// No path exists between the endpoints of a two-qubit interaction.
    #[error("No routing path between q{control} and q{target}")]
    NoRoutingPath {
        /// Control qubit index.
        control: u32,
        /// Target qubit index.
        target: u32,
    },

    /// A rotation angle could not be reduced to a concrete value.
    #[error("Angle expression '{0}' could not be evaluated")]
    AngleEvaluation(String),

    /// Measurement reached the synthesizer.
    ///
    /// Measurement handling is intentionally unimplemented upstream, and
    /// the backend must fail loudly rather than drop the statement.
    #[error("Measure is not implemented in the synthesis backend")]
    MeasureNotImplemented,

    /// IR-level error.
    #[error("IR error: {0}")]
    Ir(#[from] IrError),
}

/// Result type for synthesis operations.
pub type CompileResult<T> = Result<T, CompileError>;
