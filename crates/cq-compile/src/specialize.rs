//! Compile-time specialization of classically-conditioned statements.
//!
//! Specialization runs upstream of synthesis, while gates may still
//! carry classical guards and symbolic angle expressions. Guards whose
//! condition is statically known in the environment are discharged:
//! a true guard unwraps the inner statement, a false guard collapses to
//! `skip`. Unknown guards are kept, with the inner statement reduced
//! recursively. The environment is borrowed read-only; ownership and
//! mutation belong to the partial evaluator driving this pass.

use cq_ir::{ClassicalEnv, Gate, GateUpdate, Statement};
use tracing::{debug, warn};

use crate::error::{CompileError, CompileResult};

/// Reduce a gate's angle expression to a concrete value under the
/// environment. Non-rotation gates pass through unchanged.
fn reduce_gate(gate: &Gate, env: &ClassicalEnv) -> CompileResult<Gate> {
    let reduce = |angle: &cq_ir::AngleExpr| -> CompileResult<cq_ir::AngleExpr> {
        match angle.eval(env) {
            Some(value) => Ok(value.into()),
            None => {
                warn!(gate = %gate, "angle expression did not reduce to a constant");
                Err(CompileError::AngleEvaluation(angle.to_string()))
            }
        }
    };

    Ok(match gate {
        Gate::Rx(a) => Gate::Rx(reduce(a)?),
        Gate::Ry(a) => Gate::Ry(reduce(a)?),
        Gate::Rz(a) => Gate::Rz(reduce(a)?),
        other => other.clone(),
    })
}

/// Specialize one statement under a classical environment.
///
/// Gate updates are reduced unconditionally: any angle expression is
/// evaluated down to a constant whether or not the update is guarded.
/// Statement shapes outside the specializer's domain fail with
/// [`CompileError::UnrecognizedGateForm`], logged before propagation.
pub fn specialize_statement(
    statement: &Statement,
    env: &ClassicalEnv,
) -> CompileResult<Statement> {
    match statement {
        Statement::Update(update) => Ok(Statement::Update(GateUpdate {
            gate: reduce_gate(&update.gate, env)?,
            targets: update.targets.clone(),
        })),

        Statement::Guarded { inner, guard } => match env.lookup(guard) {
            Some(value) => {
                if value.as_bool() {
                    debug!(guard = %guard, "guard statically true, unwrapping");
                    specialize_statement(inner, env)
                } else {
                    debug!(guard = %guard, "guard statically false, eliding");
                    Ok(Statement::Skip)
                }
            }
            None => Ok(Statement::Guarded {
                inner: Box::new(specialize_statement(inner, env)?),
                guard: guard.clone(),
            }),
        },

        Statement::Skip => Ok(Statement::Skip),

        other => {
            warn!(rule = other.rule(), node = %other, "no specialization rule matches");
            Err(CompileError::UnrecognizedGateForm {
                rule: other.rule().to_string(),
                node: other.to_string(),
            })
        }
    }
}

/// Specialize every statement of one block scope, in order.
pub fn specialize_block(
    statements: &[Statement],
    env: &ClassicalEnv,
) -> CompileResult<Vec<Statement>> {
    statements
        .iter()
        .map(|s| specialize_statement(s, env))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cq_ir::{AngleExpr, ClassicalValue, Lval, QubitId};
    use std::f64::consts::PI;

    fn h_update() -> Statement {
        Statement::update(GateUpdate::single(Gate::H, QubitId(0)))
    }

    #[test]
    fn test_static_true_guard_unwraps() {
        let mut env = ClassicalEnv::new();
        env.bind("c", ClassicalValue::Int(1));

        let guarded = Statement::guarded(h_update(), Lval::new("c"));
        let specialized = specialize_statement(&guarded, &env).unwrap();
        assert_eq!(specialized, h_update());
    }

    #[test]
    fn test_static_false_guard_elides() {
        let mut env = ClassicalEnv::new();
        env.bind("c", ClassicalValue::Bit(false));

        let guarded = Statement::guarded(h_update(), Lval::new("c"));
        let specialized = specialize_statement(&guarded, &env).unwrap();
        assert_eq!(specialized, Statement::Skip);
    }

    #[test]
    fn test_unknown_guard_kept_inner_reduced() {
        let env = ClassicalEnv::new();
        let inner = Statement::update(GateUpdate::single(
            Gate::Rz(AngleExpr::pi() / AngleExpr::constant(2.0)),
            QubitId(0),
        ));
        let guarded = Statement::guarded(inner, Lval::new("c"));

        let specialized = specialize_statement(&guarded, &env).unwrap();
        let expected = Statement::guarded(
            Statement::update(GateUpdate::single(
                Gate::Rz(AngleExpr::constant(PI / 2.0)),
                QubitId(0),
            )),
            Lval::new("c"),
        );
        assert_eq!(specialized, expected);
    }

    #[test]
    fn test_angle_reduced_from_environment() {
        let mut env = ClassicalEnv::new();
        env.bind("theta", ClassicalValue::Float(PI / 4.0));

        let update = Statement::update(GateUpdate::single(
            Gate::Rx(AngleExpr::var("theta")),
            QubitId(1),
        ));
        let specialized = specialize_statement(&update, &env).unwrap();
        assert_eq!(
            specialized,
            Statement::update(GateUpdate::single(
                Gate::Rx(AngleExpr::constant(PI / 4.0)),
                QubitId(1),
            ))
        );
    }

    #[test]
    fn test_unbound_angle_fails() {
        let env = ClassicalEnv::new();
        let update = Statement::update(GateUpdate::single(
            Gate::Ry(AngleExpr::var("missing")),
            QubitId(0),
        ));
        let err = specialize_statement(&update, &env).unwrap_err();
        assert!(matches!(err, CompileError::AngleEvaluation(_)));
    }

    #[test]
    fn test_measure_rejected() {
        let env = ClassicalEnv::new();
        let measure = Statement::Measure {
            source: Lval::new("a"),
            result: Lval::new("c"),
        };
        let err = specialize_statement(&measure, &env).unwrap_err();
        assert!(matches!(
            err,
            CompileError::UnrecognizedGateForm { rule, .. } if rule == "measure"
        ));
    }

    #[test]
    fn test_block_preserves_order() {
        let mut env = ClassicalEnv::new();
        env.bind("c", ClassicalValue::Int(0));

        let block = vec![
            h_update(),
            Statement::guarded(h_update(), Lval::new("c")),
            h_update(),
        ];
        let specialized = specialize_block(&block, &env).unwrap();
        assert_eq!(
            specialized,
            vec![h_update(), Statement::Skip, h_update()]
        );
    }
}
