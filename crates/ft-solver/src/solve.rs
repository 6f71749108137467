//! Solve entry points.

use ft_factors::FactorTable;
use ft_grid::Snapshot;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::attribution::Attribution;
use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::problem::AttributionProblem;

/// Attribute every valid zone of one snapshot.
///
/// Fails only when the assembled system cannot be solved; invalid zones and
/// unknown factors or neighbors are reported in the returned [`Attribution`].
pub fn solve(
    snapshot: &Snapshot,
    factors: &FactorTable,
    config: &SolverConfig,
) -> SolverResult<Attribution> {
    snapshot.validate_structure()?;
    let problem = AttributionProblem::assemble(snapshot, factors, config)?;
    let attribution = problem.solve(config)?;
    debug!(
        datetime = ?snapshot.datetime,
        zones = attribution.len(),
        "snapshot attributed"
    );
    Ok(attribution)
}

/// Solve independent snapshots in parallel. Results keep input order.
pub fn solve_batch(
    snapshots: &[Snapshot],
    factors: &FactorTable,
    config: &SolverConfig,
) -> Vec<SolverResult<Attribution>> {
    let results: Vec<_> = snapshots
        .par_iter()
        .map(|snapshot| solve(snapshot, factors, config))
        .collect();

    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(snapshots = snapshots.len(), failed, "batch attribution finished");
    results
}

/// A factor table and policy bundled for repeated use.
#[derive(Debug, Clone)]
pub struct FlowAttributionSolver {
    factors: FactorTable,
    config: SolverConfig,
}

impl FlowAttributionSolver {
    pub fn new(factors: FactorTable) -> Self {
        Self::with_config(factors, SolverConfig::default())
    }

    pub fn with_config(factors: FactorTable, config: SolverConfig) -> Self {
        Self { factors, config }
    }

    pub fn factors(&self) -> &FactorTable {
        &self.factors
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn solve(&self, snapshot: &Snapshot) -> SolverResult<Attribution> {
        solve(snapshot, &self.factors, &self.config)
    }

    pub fn solve_batch(&self, snapshots: &[Snapshot]) -> Vec<SolverResult<Attribution>> {
        solve_batch(snapshots, &self.factors, &self.config)
    }
}
