//! Program statements.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::env::Lval;
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::{QubitId, QubitRef};

/// One gate application: a gate together with its ordered targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateUpdate {
    /// The gate being applied.
    pub gate: Gate,
    /// The qubits it acts on, in operand order.
    pub targets: Vec<QubitRef>,
}

impl GateUpdate {
    /// Create a gate update, validating operand arity.
    pub fn new(gate: Gate, targets: Vec<QubitRef>) -> IrResult<Self> {
        let expected = gate.num_qubits();
        let got = u32::try_from(targets.len()).unwrap_or(u32::MAX);
        if got != expected {
            return Err(IrError::ArityMismatch {
                gate: gate.name().to_string(),
                expected,
                got,
            });
        }
        Ok(Self { gate, targets })
    }

    /// Create a single-qubit update on a resolved target.
    ///
    /// Arity is correct by construction, so this cannot fail.
    pub fn single(gate: Gate, target: QubitId) -> Self {
        debug_assert_eq!(gate.num_qubits(), 1);
        Self {
            gate,
            targets: vec![QubitRef::Id(target)],
        }
    }

    /// Create a two-qubit update on resolved targets.
    pub fn two(gate: Gate, a: QubitId, b: QubitId) -> Self {
        debug_assert_eq!(gate.num_qubits(), 2);
        Self {
            gate,
            targets: vec![QubitRef::Id(a), QubitRef::Id(b)],
        }
    }

    /// Resolve all targets to integer indices.
    pub fn resolved_targets(&self) -> IrResult<Vec<QubitId>> {
        self.targets.iter().map(QubitRef::expect_resolved).collect()
    }
}

impl fmt::Display for GateUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gate)?;
        for (i, t) in self.targets.iter().enumerate() {
            write!(f, "{}{t}", if i == 0 { " " } else { ", " })?;
        }
        Ok(())
    }
}

/// A statement in a flat procedure body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// An unconditional gate application.
    Update(GateUpdate),
    /// A statement applied only when a classical guard holds.
    ///
    /// The guard may or may not be statically decidable; specialization
    /// discharges the static ones.
    Guarded {
        /// The guarded statement.
        inner: Box<Statement>,
        /// The classical condition.
        guard: Lval,
    },
    /// Measurement of a qubit into a classical bit.
    ///
    /// Measurement is not part of the synthesizable core. The variant is
    /// kept so the backend can fail loudly instead of dropping it.
    Measure {
        /// The measured qubit.
        source: Lval,
        /// The classical destination.
        result: Lval,
    },
    /// The empty statement.
    Skip,
}

impl Statement {
    /// Create an unconditional update statement.
    pub fn update(update: GateUpdate) -> Self {
        Statement::Update(update)
    }

    /// Wrap a statement in a classical guard.
    pub fn guarded(inner: Statement, guard: Lval) -> Self {
        Statement::Guarded {
            inner: Box::new(inner),
            guard,
        }
    }

    /// A short tag naming the statement shape, for diagnostics.
    pub fn rule(&self) -> &'static str {
        match self {
            Statement::Update(_) => "qupdate",
            Statement::Guarded { .. } => "qupdate-if",
            Statement::Measure { .. } => "measure",
            Statement::Skip => "skip",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Update(u) => write!(f, "{u}"),
            Statement::Guarded { inner, guard } => write!(f, "{inner} if {guard}"),
            Statement::Measure { source, result } => write!(f, "measure {source} -> {result}"),
            Statement::Skip => write!(f, "skip"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::AngleExpr;

    #[test]
    fn test_arity_validation() {
        let err = GateUpdate::new(Gate::Cnot, vec![QubitRef::from(0u32)]);
        assert!(matches!(err, Err(IrError::ArityMismatch { got: 1, .. })));

        let ok = GateUpdate::new(Gate::H, vec![QubitRef::from(0u32)]);
        assert!(ok.is_ok());
    }

    #[test]
    fn test_display() {
        let cx = GateUpdate::two(Gate::Cnot, QubitId(0), QubitId(3));
        assert_eq!(format!("{cx}"), "cnot q0, q3");

        let s = Statement::guarded(
            Statement::update(GateUpdate::single(
                Gate::Rz(AngleExpr::constant(0.5)),
                QubitId(1),
            )),
            Lval::new("c"),
        );
        assert_eq!(format!("{s}"), "rz(0.5) q1 if c");
        assert_eq!(s.rule(), "qupdate-if");
    }
}
