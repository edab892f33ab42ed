//! Qubit identifiers and references.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// Unique identifier for a qubit within a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub u32);

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

impl From<u32> for QubitId {
    fn from(id: u32) -> Self {
        QubitId(id)
    }
}

impl From<usize> for QubitId {
    fn from(id: usize) -> Self {
        QubitId(u32::try_from(id).expect("QubitId overflow: exceeds u32::MAX"))
    }
}

/// Reference to a logical qubit as written in the source program.
///
/// The upstream flattener assigns every declared qubit a fixed integer
/// index, so by the time a program reaches synthesis all references are
/// `Id`. `Named` survives only in pre-flattening IR and is rejected by
/// the backend via [`QubitRef::expect_resolved`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QubitRef {
    /// A resolved qubit index.
    Id(QubitId),
    /// An unresolved name from the surface syntax.
    Named(String),
}

impl QubitRef {
    /// Create a resolved reference.
    pub fn id(id: impl Into<QubitId>) -> Self {
        QubitRef::Id(id.into())
    }

    /// Create a named (unresolved) reference.
    pub fn named(name: impl Into<String>) -> Self {
        QubitRef::Named(name.into())
    }

    /// Get the resolved index, if any.
    pub fn resolved(&self) -> Option<QubitId> {
        match self {
            QubitRef::Id(id) => Some(*id),
            QubitRef::Named(_) => None,
        }
    }

    /// Get the resolved index or fail with [`IrError::UnresolvedQubit`].
    pub fn expect_resolved(&self) -> IrResult<QubitId> {
        match self {
            QubitRef::Id(id) => Ok(*id),
            QubitRef::Named(name) => Err(IrError::UnresolvedQubit(name.clone())),
        }
    }
}

impl fmt::Display for QubitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QubitRef::Id(id) => write!(f, "{id}"),
            QubitRef::Named(name) => write!(f, "{name}"),
        }
    }
}

impl From<QubitId> for QubitRef {
    fn from(id: QubitId) -> Self {
        QubitRef::Id(id)
    }
}

impl From<u32> for QubitRef {
    fn from(id: u32) -> Self {
        QubitRef::Id(QubitId(id))
    }
}
