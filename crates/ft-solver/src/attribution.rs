//! Solved attribution for one snapshot.

use ft_core::Real;
use ft_factors::FactorTable;
use ft_grid::{ExclusionReason, Snapshot};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::SolverConfig;
use crate::diagnostics::Diagnostic;

/// Zone key -> attributed value, plus what was left out and why.
///
/// Zones missing from `values` have an unknown value, not zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attribution {
    pub values: BTreeMap<String, Real>,
    pub excluded: Vec<(String, ExclusionReason)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Attribution {
    pub fn get(&self, zone: &str) -> Option<Real> {
        self.values.get(zone).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Real)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Total attributed quantity consumed across solved zones,
    /// `sum(x_i * consumption_i)`.
    pub fn consumed_total(&self, snapshot: &Snapshot, config: &SolverConfig) -> Real {
        self.consumption_weights(snapshot, config)
            .map(|(x, c)| x * c)
            .sum()
    }

    /// Consumption-weighted mean of the solved values. `None` when nothing
    /// is consumed.
    pub fn consumption_weighted_mean(
        &self,
        snapshot: &Snapshot,
        config: &SolverConfig,
    ) -> Option<Real> {
        let (num, den) = self
            .consumption_weights(snapshot, config)
            .fold((0.0, 0.0), |(num, den), (x, c)| (num + x * c, den + c));
        (den > 0.0).then(|| num / den)
    }

    fn consumption_weights<'a>(
        &'a self,
        snapshot: &'a Snapshot,
        config: &'a SolverConfig,
    ) -> impl Iterator<Item = (Real, Real)> + 'a {
        snapshot.zones().iter().filter_map(move |zone| {
            let x = self.get(&zone.key)?;
            let consumption = zone.aggregates(config.storage_keys.as_slice()).consumption();
            Some((x, consumption))
        })
    }
}

/// Production-weighted mean footprint of the given zones' own generation,
/// i.e. the production-based counterpart of the attributed values.
///
/// Only zones listed in `zones` count; technologies without a factor
/// contribute production but no footprint.
pub fn production_weighted_factor<'a>(
    snapshot: &Snapshot,
    factors: &FactorTable,
    config: &SolverConfig,
    zones: impl IntoIterator<Item = &'a str>,
) -> Option<Real> {
    let mut emitted = 0.0;
    let mut produced = 0.0;
    for key in zones {
        let Some(zone) = snapshot.zone(key) else {
            continue;
        };
        for (technology, value) in zone.positive_production() {
            if config.is_storage(technology) {
                continue;
            }
            produced += value;
            emitted += factors.factor(key, technology).unwrap_or(0.0) * value;
        }
    }
    (produced > 0.0).then(|| emitted / produced)
}
