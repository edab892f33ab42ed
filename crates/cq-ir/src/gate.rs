//! Quantum gate variants.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angle::AngleExpr;

/// A quantum gate.
///
/// This is a closed set: the CQ surface language has no user-defined
/// gates, so every pass matches exhaustively and unsupported cases are
/// compile errors rather than runtime fallbacks. Gates are immutable
/// value types and cheap to clone; the same `Gate` value may be shared
/// across any number of generated statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// T gate (fourth root of Z).
    T,
    /// sqrt(X) gate.
    SX,
    /// Rotation around the X axis.
    Rx(AngleExpr),
    /// Rotation around the Y axis.
    Ry(AngleExpr),
    /// Rotation around the Z axis.
    Rz(AngleExpr),
    /// SWAP gate.
    Swap,
    /// Controlled-X (CNOT) gate.
    Cnot,
}

impl Gate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::T => "t",
            Gate::SX => "sx",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::Swap => "swap",
            Gate::Cnot => "cnot",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            Gate::X
            | Gate::Y
            | Gate::Z
            | Gate::H
            | Gate::S
            | Gate::T
            | Gate::SX
            | Gate::Rx(_)
            | Gate::Ry(_)
            | Gate::Rz(_) => 1,
            Gate::Swap | Gate::Cnot => 2,
        }
    }

    /// Check if this gate belongs to the hardware-native basis.
    ///
    /// The elementary set is `{Rz, SX, X, CNOT}` plus `SWAP`, which only
    /// the router introduces.
    pub fn is_elementary(&self) -> bool {
        matches!(
            self,
            Gate::Rz(_) | Gate::SX | Gate::X | Gate::Cnot | Gate::Swap
        )
    }

    /// Get the rotation angle, if this is a rotation gate.
    pub fn angle(&self) -> Option<&AngleExpr> {
        match self {
            Gate::Rx(a) | Gate::Ry(a) | Gate::Rz(a) => Some(a),
            _ => None,
        }
    }

    /// Check if this gate carries an unresolved angle expression.
    pub fn is_symbolic(&self) -> bool {
        self.angle().is_some_and(AngleExpr::is_symbolic)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.angle() {
            Some(a) => write!(f, "{}({a})", self.name()),
            None => write!(f, "{}", self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_gate_properties() {
        assert_eq!(Gate::H.num_qubits(), 1);
        assert_eq!(Gate::Cnot.num_qubits(), 2);
        assert_eq!(Gate::Swap.name(), "swap");
        assert!(Gate::SX.is_elementary());
        assert!(!Gate::H.is_elementary());
        assert!(Gate::Rz(AngleExpr::constant(PI)).is_elementary());
    }

    #[test]
    fn test_symbolic() {
        assert!(!Gate::Rx(AngleExpr::constant(PI)).is_symbolic());
        assert!(Gate::Rx(AngleExpr::var("theta")).is_symbolic());
        assert!(!Gate::X.is_symbolic());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Gate::H), "h");
        assert_eq!(format!("{}", Gate::Rz(AngleExpr::constant(0.5))), "rz(0.5)");
    }
}
