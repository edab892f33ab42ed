//! CQ Synthesis and Routing Backend
//!
//! This crate turns a partially-evaluated CQ program (one procedure,
//! one flat block, classical control resolved) into a circuit over the
//! hardware-native gate set `{Rz, SX, X, CNOT}`, legal for a given qubit
//! connectivity graph.
//!
//! # Pipeline
//!
//! ```text
//! Program (flat, classical control resolved)
//!       │
//!       ├── specialize::specialize_statement   guards discharged,
//!       │                                      angles made concrete
//!       ▼
//! synthesis::synthesize_program
//!       │     per statement, in source order:
//!       ├── synthesis (native-basis expansion)
//!       ├── routing::add_cnot_routing (SWAP insertion)
//!       ▼
//! Program (elementary gates, topology-legal)
//! ```
//!
//! The generic decomposition table in [`decompose`] serves callers that
//! rewrite named gates (optionally controlled) outside the synthesis
//! path; it targets the same elementary set through different
//! identities and is intentionally a separate code path.
//!
//! # Example
//!
//! ```rust
//! use cq_compile::{synthesize_program, Topology};
//! use cq_ir::{Gate, GateUpdate, Program, QubitId, Statement};
//!
//! let mut program = Program::new("main");
//! program.declare_qubit("a", QubitId(0));
//! program.declare_qubit("b", QubitId(1));
//! program.push(Statement::update(GateUpdate::single(Gate::H, QubitId(0))));
//! program.push(Statement::update(GateUpdate::two(
//!     Gate::Cnot,
//!     QubitId(0),
//!     QubitId(1),
//! )));
//!
//! let topology = Topology::linear(2);
//! let synthesized = synthesize_program(&program, &topology).unwrap();
//!
//! // Every output gate is in the native set.
//! assert!(synthesized.statements.iter().all(|s| match s {
//!     Statement::Update(u) => u.gate.is_elementary(),
//!     _ => false,
//! }));
//! ```
//!
//! # Purity
//!
//! Every pass is a pure, synchronous function over borrowed immutable
//! input producing fresh output; errors are deterministic for a given
//! input and always fatal for the compilation unit. Hosts may
//! synthesize independent programs in parallel; statements within one
//! procedure are processed strictly in source order.

pub mod decompose;
pub mod error;
pub mod routing;
pub mod specialize;
pub mod synthesis;
pub mod topology;
pub mod unitary;

pub use decompose::{decompose_controlled, decompose_single};
pub use error::{CompileError, CompileResult};
pub use routing::add_cnot_routing;
pub use specialize::{specialize_block, specialize_statement};
pub use synthesis::{synthesize_program, synthesize_statement};
pub use topology::Topology;
pub use unitary::Unitary2x2;
