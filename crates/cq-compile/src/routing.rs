//! CNOT routing against a hardware topology.

use cq_ir::{Gate, GateUpdate, IrError, QubitId, Statement};
use tracing::debug;

use crate::error::{CompileError, CompileResult};
use crate::topology::Topology;

/// Insert SWAP statements so every CNOT acts on topology-adjacent
/// qubits.
///
/// Statements are processed in order and output order is preserved
/// relative to input; the pass only inserts, never reorders or deletes.
/// A CNOT whose operands are already adjacent passes through untouched.
/// For a non-adjacent CNOT, one SWAP is emitted per edge of the shortest
/// path between control and target, and the CNOT itself is then
/// re-emitted on its original operand pair. A CNOT whose endpoints are
/// not connected at all fails with
/// [`CompileError::NoRoutingPath`]; it is never silently skipped.
pub fn add_cnot_routing(
    statements: &[Statement],
    topology: &Topology,
) -> CompileResult<Vec<Statement>> {
    let mut routed = Vec::with_capacity(statements.len());

    for statement in statements {
        if let Some((control, target)) = cnot_operands(statement)? {
            if !topology.has_edge(control.0, target.0) {
                let path = topology.shortest_path(control.0, target.0).ok_or(
                    CompileError::NoRoutingPath {
                        control: control.0,
                        target: target.0,
                    },
                )?;

                debug!(
                    control = control.0,
                    target = target.0,
                    swaps = path.len() - 1,
                    "inserting swap chain for non-adjacent cnot"
                );
                for pair in path.windows(2) {
                    routed.push(Statement::Update(GateUpdate::two(
                        Gate::Swap,
                        QubitId(pair[0]),
                        QubitId(pair[1]),
                    )));
                }
            }
            routed.push(statement.clone());
        } else {
            routed.push(statement.clone());
        }
    }

    Ok(routed)
}

/// Extract (control, target) if the statement is a CNOT update.
fn cnot_operands(statement: &Statement) -> CompileResult<Option<(QubitId, QubitId)>> {
    match statement {
        Statement::Update(update) if matches!(update.gate, Gate::Cnot) => {
            let targets = update.resolved_targets()?;
            match targets[..] {
                [control, target] => Ok(Some((control, target))),
                _ => Err(CompileError::Ir(IrError::ArityMismatch {
                    gate: update.gate.name().to_string(),
                    expected: 2,
                    got: u32::try_from(targets.len()).unwrap_or(u32::MAX),
                })),
            }
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cq_ir::AngleExpr;

    fn cnot(control: u32, target: u32) -> Statement {
        Statement::Update(GateUpdate::two(Gate::Cnot, QubitId(control), QubitId(target)))
    }

    fn swap(a: u32, b: u32) -> Statement {
        Statement::Update(GateUpdate::two(Gate::Swap, QubitId(a), QubitId(b)))
    }

    #[test]
    fn test_adjacent_cnot_untouched() {
        let topology = Topology::linear(2);
        let input = vec![cnot(0, 1)];
        let routed = add_cnot_routing(&input, &topology).unwrap();
        assert_eq!(routed, input);
    }

    #[test]
    fn test_swap_chain_for_distant_cnot() {
        // 0-1-2-3 line, cnot between the ends: the full path is swapped
        // and the cnot keeps its original operands.
        let topology = Topology::linear(4);
        let routed = add_cnot_routing(&[cnot(0, 3)], &topology).unwrap();
        assert_eq!(
            routed,
            vec![swap(0, 1), swap(1, 2), swap(2, 3), cnot(0, 3)]
        );
    }

    #[test]
    fn test_single_hop_swap() {
        let topology = Topology::linear(3);
        let routed = add_cnot_routing(&[cnot(0, 2)], &topology).unwrap();
        assert_eq!(routed, vec![swap(0, 1), swap(1, 2), cnot(0, 2)]);
    }

    #[test]
    fn test_non_cnot_statements_pass_through() {
        let topology = Topology::linear(2);
        let rz = Statement::Update(GateUpdate::single(
            Gate::Rz(AngleExpr::constant(0.25)),
            QubitId(0),
        ));
        let input = vec![rz.clone(), Statement::Skip, cnot(0, 1)];
        let routed = add_cnot_routing(&input, &topology).unwrap();
        assert_eq!(routed, input);
    }

    #[test]
    fn test_disconnected_endpoints_fail() {
        let mut topology = Topology::new(4);
        topology.add_edge(0, 1);
        topology.add_edge(2, 3);

        let err = add_cnot_routing(&[cnot(0, 3)], &topology).unwrap_err();
        assert!(matches!(
            err,
            CompileError::NoRoutingPath {
                control: 0,
                target: 3
            }
        ));
    }

    #[test]
    fn test_order_preserved_around_insertions() {
        let topology = Topology::linear(3);
        let rz = Statement::Update(GateUpdate::single(
            Gate::Rz(AngleExpr::constant(1.0)),
            QubitId(2),
        ));
        let routed = add_cnot_routing(&[rz.clone(), cnot(0, 2), rz.clone()], &topology).unwrap();
        assert_eq!(
            routed,
            vec![rz.clone(), swap(0, 1), swap(1, 2), cnot(0, 2), rz]
        );
    }
}
