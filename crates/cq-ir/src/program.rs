//! Flat procedure programs.

use serde::{Deserialize, Serialize};

use crate::env::ClassicalValue;
use crate::qubit::QubitId;
use crate::statement::Statement;

/// A declaration in a procedure's flat block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    /// A qubit declaration with its flattener-assigned index.
    Qubit {
        /// Declared name.
        name: String,
        /// Fixed index assigned by the flattener.
        id: QubitId,
    },
    /// A classical declaration, with its value when statically known.
    Classical {
        /// Declared name.
        name: String,
        /// Statically-known value, if the partial evaluator resolved one.
        value: Option<ClassicalValue>,
    },
}

/// One flat procedure body: the unit of synthesis.
///
/// The parser and flattener produce exactly one of these per compilation
/// unit: a single procedure whose classical control flow has already
/// been evaluated away, leaving declarations and a linear statement
/// list. Statement order is semantically significant; no pass reorders
/// it. Passes rebuild the program rather than mutating it, so any two
/// pipeline stages can be composed, tested, and re-run in isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Procedure name.
    pub name: String,
    /// Procedure parameter names, carried through unchanged.
    pub params: Vec<String>,
    /// Declarations of the flat block, carried through unchanged.
    pub declarations: Vec<Declaration>,
    /// The statement list.
    pub statements: Vec<Statement>,
}

impl Program {
    /// Create an empty program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: vec![],
            declarations: vec![],
            statements: vec![],
        }
    }

    /// Add a qubit declaration.
    pub fn declare_qubit(&mut self, name: impl Into<String>, id: QubitId) -> &mut Self {
        self.declarations.push(Declaration::Qubit {
            name: name.into(),
            id,
        });
        self
    }

    /// Append a statement.
    pub fn push(&mut self, statement: Statement) -> &mut Self {
        self.statements.push(statement);
        self
    }

    /// Number of declared qubits.
    pub fn num_qubits(&self) -> u32 {
        u32::try_from(
            self.declarations
                .iter()
                .filter(|d| matches!(d, Declaration::Qubit { .. }))
                .count(),
        )
        .unwrap_or(u32::MAX)
    }

    /// Rebuild this program around a new statement list, keeping the
    /// procedure framing (name, parameters, declarations) unchanged.
    pub fn with_statements(&self, statements: Vec<Statement>) -> Self {
        Self {
            name: self.name.clone(),
            params: self.params.clone(),
            declarations: self.declarations.clone(),
            statements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::statement::GateUpdate;

    #[test]
    fn test_framing_preserved() {
        let mut program = Program::new("main");
        program.params.push("n".to_string());
        program.declare_qubit("a", QubitId(0));
        program.declare_qubit("b", QubitId(1));
        program.declarations.push(Declaration::Classical {
            name: "c".to_string(),
            value: Some(crate::env::ClassicalValue::Bit(true)),
        });
        program.push(Statement::update(GateUpdate::single(Gate::H, QubitId(0))));

        let rebuilt = program.with_statements(vec![]);
        assert_eq!(rebuilt.name, "main");
        assert_eq!(rebuilt.params, vec!["n".to_string()]);
        assert_eq!(rebuilt.declarations, program.declarations);
        assert!(rebuilt.statements.is_empty());
        assert_eq!(rebuilt.num_qubits(), 2);
    }

    #[test]
    fn test_json_snapshot() {
        let mut program = Program::new("bell");
        program.declare_qubit("a", QubitId(0));
        program.push(Statement::update(GateUpdate::single(Gate::H, QubitId(0))));

        let json = serde_json::to_string(&program).unwrap();
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, program);
    }
}
