//! Statement and program synthesis into the hardware-native gate set.
//!
//! Synthesis rewrites each gate update into the native basis
//! `{Rz, SX, X, CNOT}` and routes the result against the target
//! topology. The identity set here targets hardware execution and is
//! distinct from the generic rewriting table in [`crate::decompose`];
//! the two encode different bases for different callers and are kept as
//! separate code paths.

use std::f64::consts::PI;

use cq_ir::{AngleExpr, Gate, GateUpdate, IrError, Program, QubitRef, Statement};
use tracing::{debug, info, instrument, warn};

use crate::error::{CompileError, CompileResult};
use crate::routing::add_cnot_routing;
use crate::topology::Topology;

fn rz(angle: f64, target: &QubitRef) -> GateUpdate {
    GateUpdate {
        gate: Gate::Rz(AngleExpr::constant(angle)),
        targets: vec![target.clone()],
    }
}

fn sx(target: &QubitRef) -> GateUpdate {
    GateUpdate {
        gate: Gate::SX,
        targets: vec![target.clone()],
    }
}

fn x(target: &QubitRef) -> GateUpdate {
    GateUpdate {
        gate: Gate::X,
        targets: vec![target.clone()],
    }
}

/// The Ry(theta) expansion over `{Rz, SX}`.
///
/// The three leading SX applications realize the inverse X-rotation
/// conjugating the Rz. The 5-gate form is load-bearing: downstream
/// angle-exact analysis compares circuits gate for gate, so the shorter
/// algebraically-equal variant must not be substituted.
fn ry_expansion(theta: f64, target: &QubitRef) -> Vec<GateUpdate> {
    vec![
        sx(target),
        sx(target),
        sx(target),
        rz(theta, target),
        sx(target),
    ]
}

/// Rx(theta) as an Rz-conjugated Ry expansion.
fn rx_expansion(theta: f64, target: &QubitRef) -> Vec<GateUpdate> {
    let mut sequence = vec![rz(PI / 2.0, target)];
    sequence.extend(ry_expansion(theta, target));
    sequence.push(rz(-PI / 2.0, target));
    sequence
}

/// H as X followed by the Ry(pi/2) expansion.
fn h_expansion(target: &QubitRef) -> Vec<GateUpdate> {
    let mut sequence = vec![x(target)];
    sequence.extend(ry_expansion(PI / 2.0, target));
    sequence
}

/// Require a concrete angle. Symbolic angles must have been reduced by
/// specialization before synthesis runs.
fn angle_value(angle: &AngleExpr) -> CompileResult<f64> {
    angle.as_f64().ok_or_else(|| {
        warn!(angle = %angle, "symbolic angle reached synthesis");
        CompileError::AngleEvaluation(angle.to_string())
    })
}

/// Rewrite one gate update into the native basis.
fn synthesize_update(update: &GateUpdate) -> CompileResult<Vec<GateUpdate>> {
    let Some(target) = update.targets.first() else {
        return Err(CompileError::Ir(IrError::ArityMismatch {
            gate: update.gate.name().to_string(),
            expected: update.gate.num_qubits(),
            got: 0,
        }));
    };

    match &update.gate {
        Gate::H => Ok(h_expansion(target)),
        // NOT is an X rotation by pi.
        Gate::X => Ok(rx_expansion(PI, target)),
        Gate::Rx(angle) => Ok(rx_expansion(angle_value(angle)?, target)),
        Gate::Ry(angle) => Ok(ry_expansion(angle_value(angle)?, target)),
        Gate::Rz(angle) => Ok(vec![rz(angle_value(angle)?, target)]),

        // Already native; emitted unchanged. CNOTs are checked against
        // the topology by the routing pass.
        Gate::SX | Gate::Cnot | Gate::Swap => Ok(vec![update.clone()]),

        other @ (Gate::Y | Gate::Z | Gate::S | Gate::T) => {
            warn!(gate = %other, "no synthesis rule for gate");
            Err(CompileError::UnsupportedGate(other.name().to_string()))
        }
    }
}

/// Synthesize one statement, including CNOT routing.
///
/// Returns the routed elementary sequence replacing the statement. A
/// guarded update is accepted here because specialization has already
/// discharged every decidable guard; its update is synthesized and the
/// output is emitted unguarded. `skip` synthesizes to nothing.
/// Measurement fails with [`CompileError::MeasureNotImplemented`];
/// it is never a silent no-op.
pub fn synthesize_statement(
    statement: &Statement,
    topology: &Topology,
) -> CompileResult<Vec<Statement>> {
    match statement {
        Statement::Update(update) => {
            let updates = synthesize_update(update)?;
            let statements: Vec<Statement> =
                updates.into_iter().map(Statement::Update).collect();
            add_cnot_routing(&statements, topology)
        }

        Statement::Guarded { inner, .. } => match inner.as_ref() {
            Statement::Update(update) => {
                let updates = synthesize_update(update)?;
                let statements: Vec<Statement> =
                    updates.into_iter().map(Statement::Update).collect();
                add_cnot_routing(&statements, topology)
            }
            other => {
                warn!(rule = other.rule(), node = %other, "unsynthesizable guarded statement");
                Err(CompileError::UnrecognizedStatement {
                    rule: statement.rule().to_string(),
                    node: statement.to_string(),
                })
            }
        },

        Statement::Skip => Ok(vec![]),

        Statement::Measure { .. } => {
            warn!(node = %statement, "measure reached synthesis");
            Err(CompileError::MeasureNotImplemented)
        }
    }
}

/// Synthesize a whole program.
///
/// Statements are processed strictly in source order and their
/// elementary sequences concatenated; the procedure framing (name,
/// parameters, declarations) is copied unchanged, so the same printer
/// renders the program before and after synthesis.
#[instrument(skip(program, topology), fields(procedure = %program.name))]
pub fn synthesize_program(program: &Program, topology: &Topology) -> CompileResult<Program> {
    let mut statements = Vec::with_capacity(program.statements.len());

    for statement in &program.statements {
        let synthesized = synthesize_statement(statement, topology)?;
        debug!(
            statement = %statement,
            produced = synthesized.len(),
            "statement synthesized"
        );
        statements.extend(synthesized);
    }

    info!(
        input = program.statements.len(),
        output = statements.len(),
        "program synthesized"
    );
    Ok(program.with_statements(statements))
}
