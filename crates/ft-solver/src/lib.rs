//! Flow-tracing attribution solver.
//!
//! Computes each zone's consumption-based intensity (carbon intensity or
//! fossil-fuel ratio) for one snapshot. Every valid zone gets one unknown
//! `x_i`; its row in the linear system states that the quantity flowing out
//! of the zone equals what its own generation and its imports bring in:
//!
//! ```text
//! x_i * (P_i + I_i) = sum_k f_k * P_ik + sum_j I_ij * x_j
//! ```
//!
//! The dense system is solved with an LU decomposition.

pub mod attribution;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod problem;
pub mod solve;

pub use attribution::{Attribution, production_weighted_factor};
pub use config::{SolverConfig, UntrackedImportPolicy};
pub use diagnostics::Diagnostic;
pub use error::{SolverError, SolverResult};
pub use problem::AttributionProblem;
pub use solve::{FlowAttributionSolver, solve, solve_batch};
