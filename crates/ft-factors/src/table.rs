//! Footprint factor table schema.

use ft_core::Real;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Which quantity the factors (and therefore the solved values) express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// gCO2eq per kWh.
    #[default]
    CarbonIntensity,
    /// Share of fossil-fuelled generation, 0..1.
    FossilFuelRatio,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::CarbonIntensity => f.write_str("carbon intensity (gCO2eq/kWh)"),
            Metric::FossilFuelRatio => f.write_str("fossil fuel ratio"),
        }
    }
}

/// Technology -> footprint factor, with optional per-zone overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorTable {
    #[serde(default)]
    pub metric: Metric,
    #[serde(default)]
    pub defaults: BTreeMap<String, Real>,
    /// Zone key -> technology -> factor. Takes precedence over `defaults`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub zone_overrides: BTreeMap<String, BTreeMap<String, Real>>,
}

impl FactorTable {
    pub fn new(metric: Metric) -> Self {
        Self {
            metric,
            defaults: BTreeMap::new(),
            zone_overrides: BTreeMap::new(),
        }
    }

    /// Set the default factor of a technology.
    pub fn insert(&mut self, technology: impl Into<String>, factor: Real) -> &mut Self {
        self.defaults.insert(technology.into(), factor);
        self
    }

    /// Set a zone-specific factor for a technology.
    pub fn with_override(
        mut self,
        zone: impl Into<String>,
        technology: impl Into<String>,
        factor: Real,
    ) -> Self {
        self.zone_overrides
            .entry(zone.into())
            .or_default()
            .insert(technology.into(), factor);
        self
    }

    /// Factor for `technology` in `zone`; zone override first, then default.
    /// `None` when the technology is unknown.
    pub fn factor(&self, zone: &str, technology: &str) -> Option<Real> {
        self.zone_overrides
            .get(zone)
            .and_then(|o| o.get(technology))
            .or_else(|| self.defaults.get(technology))
            .copied()
    }
}

impl<K: Into<String>> FromIterator<(K, Real)> for FactorTable {
    fn from_iter<I: IntoIterator<Item = (K, Real)>>(iter: I) -> Self {
        Self {
            metric: Metric::default(),
            defaults: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            zone_overrides: BTreeMap::new(),
        }
    }
}
