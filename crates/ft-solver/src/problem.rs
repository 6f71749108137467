//! Linear system assembly for one snapshot.

use ft_factors::FactorTable;
use ft_grid::{ExclusionReason, IndexMap, Snapshot, Zone, ZoneStatus, classify};
use nalgebra::{DMatrix, DVector};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::attribution::Attribution;
use crate::config::{SolverConfig, UntrackedImportPolicy};
use crate::diagnostics::Diagnostic;
use crate::error::{SolverError, SolverResult};

/// Assembled `A x = b` for one snapshot.
///
/// Row `i` belongs to the `i`-th valid zone (snapshot order):
/// - `A[i][i] = -(production + net exchange) - exports`
/// - `A[i][j] = import from valid zone j`
/// - `b[i] = -sum(factor * production)`
#[derive(Debug, Clone)]
pub struct AttributionProblem {
    pub matrix: DMatrix<f64>,
    pub rhs: DVector<f64>,
    pub index: IndexMap,
    pub excluded: Vec<(String, ExclusionReason)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AttributionProblem {
    /// Filter the snapshot's zones and build the system.
    pub fn assemble(
        snapshot: &Snapshot,
        factors: &FactorTable,
        config: &SolverConfig,
    ) -> SolverResult<Self> {
        let statuses = classify(snapshot, config.validity, config.storage_keys.as_slice());

        let mut valid: Vec<&Zone> = Vec::new();
        let mut excluded = Vec::new();
        for (zone, status) in snapshot.zones().iter().zip(statuses) {
            match status {
                ZoneStatus::Valid => valid.push(zone),
                ZoneStatus::Excluded(reason) => {
                    debug!(zone = %zone.key, %reason, "zone left out of attribution");
                    excluded.push((zone.key.clone(), reason));
                }
            }
        }

        let index = IndexMap::new(valid.iter().map(|z| z.key.as_str()))?;
        let n = index.len();
        let mut matrix = DMatrix::zeros(n, n);
        let mut rhs = DVector::zeros(n);
        let mut diagnostics = Vec::new();

        for (i, zone) in valid.iter().enumerate() {
            let agg = zone.aggregates(config.storage_keys.as_slice());
            matrix[(i, i)] = -(agg.production + agg.net_exchange);

            // Own generation
            for (technology, value) in zone.positive_production() {
                if value <= 0.0 || config.is_storage(technology) {
                    continue;
                }
                match factors.factor(&zone.key, technology) {
                    Some(factor) => rhs[i] -= factor * value,
                    None => {
                        warn!(zone = %zone.key, technology, "footprint is unknown, skipping");
                        diagnostics.push(Diagnostic::UnknownFactor {
                            zone: zone.key.clone(),
                            technology: technology.to_string(),
                        });
                    }
                }
            }

            // Exchanges
            for (neighbor, &flow) in &zone.exchange {
                if flow == 0.0 {
                    continue;
                }
                let j = index.index_of(neighbor);
                if j.is_none() {
                    warn!(
                        zone = %zone.key,
                        neighbor = %neighbor,
                        flow,
                        "neighbor has no attributed value"
                    );
                    diagnostics.push(Diagnostic::UntrackedNeighbor {
                        zone: zone.key.clone(),
                        neighbor: neighbor.clone(),
                        flow,
                    });
                }

                if flow < 0.0 {
                    matrix[(i, i)] -= flow.abs();
                    continue;
                }
                match (j, config.untracked_imports) {
                    (Some(j), _) => matrix[(i, j)] += flow,
                    (None, UntrackedImportPolicy::ZeroFootprint) => {}
                    (None, UntrackedImportPolicy::SelfFootprint) => matrix[(i, i)] += flow,
                }
            }
        }

        debug!(
            unknowns = n,
            excluded = excluded.len(),
            diagnostics = diagnostics.len(),
            "attribution system assembled"
        );

        Ok(Self {
            matrix,
            rhs,
            index,
            excluded,
            diagnostics,
        })
    }

    /// Number of unknowns.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Solve with a dense LU decomposition.
    ///
    /// Rows are scaled to unit max-norm first, so the pivot ratio does not
    /// depend on how large each zone is.
    pub fn solve(self, config: &SolverConfig) -> SolverResult<Attribution> {
        let n = self.len();
        let mut values = BTreeMap::new();

        if n > 0 {
            let mut matrix = self.matrix;
            let mut rhs = self.rhs;
            for i in 0..n {
                let scale = matrix.row(i).amax();
                if scale > 0.0 {
                    matrix.row_mut(i).unscale_mut(scale);
                    rhs[i] /= scale;
                }
            }

            let lu = matrix.lu();
            let pivots = lu.u().diagonal().map(f64::abs);
            let (min, max) = (pivots.min(), pivots.max());
            if min == 0.0 || !min.is_finite() {
                return Err(SolverError::SingularMatrix { size: n });
            }
            let pivot_ratio = min / max;
            debug!(unknowns = n, pivot_ratio, "attribution system factorized");
            if pivot_ratio < config.min_pivot_ratio {
                return Err(SolverError::IllConditioned { size: n, pivot_ratio });
            }

            let x = lu
                .solve(&rhs)
                .ok_or(SolverError::SingularMatrix { size: n })?;

            for (i, key) in self.index.keys().iter().enumerate() {
                if !x[i].is_finite() {
                    return Err(SolverError::NonFiniteSolution { zone: key.clone() });
                }
                values.insert(key.clone(), x[i]);
            }
        }

        Ok(Attribution {
            values,
            excluded: self.excluded,
            diagnostics: self.diagnostics,
        })
    }
}
