//! Zone records and derived flow aggregates.

use ft_core::Real;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Technologies reported in the production mix that represent storage draw
/// rather than generation.
pub const DEFAULT_STORAGE_KEYS: &[&str] = &["battery storage", "hydro storage"];

/// One bidding/control area at a single timestamp.
///
/// `exchange` values are signed: positive = import into this zone from the
/// neighbor, negative = export from this zone to the neighbor.
///
/// The `total_*` fields are optional precomputed aggregates. When absent they
/// are derived from `production` and `exchange` (see [`Zone::aggregates`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    #[serde(rename = "countryCode", alias = "key", alias = "zoneKey")]
    pub key: String,
    /// Technology -> power. `None` means "not reported".
    #[serde(default)]
    pub production: BTreeMap<String, Option<Real>>,
    #[serde(default)]
    pub exchange: BTreeMap<String, Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_production: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_import: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_export: Option<Real>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_net_exchange: Option<Real>,
}

/// Flow totals for one zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregates {
    /// Sum of positive, non-storage production.
    pub production: Real,
    /// Sum of positive exchange values.
    pub import: Real,
    /// Sum of magnitudes of negative exchange values.
    pub export: Real,
    /// Signed import minus export.
    pub net_exchange: Real,
}

impl Aggregates {
    /// Everything available to the zone before exports.
    pub fn supply(&self) -> Real {
        self.production + self.import
    }

    /// Electricity consumed inside the zone.
    pub fn consumption(&self) -> Real {
        self.production + self.net_exchange
    }

    pub fn is_finite(&self) -> bool {
        self.production.is_finite()
            && self.import.is_finite()
            && self.export.is_finite()
            && self.net_exchange.is_finite()
    }
}

impl Zone {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            production: BTreeMap::new(),
            exchange: BTreeMap::new(),
            total_production: None,
            total_import: None,
            total_export: None,
            total_net_exchange: None,
        }
    }

    /// Add (or replace) one production entry.
    pub fn with_production(mut self, technology: impl Into<String>, value: Real) -> Self {
        self.production.insert(technology.into(), Some(value));
        self
    }

    /// Add (or replace) one signed exchange entry.
    pub fn with_exchange(mut self, neighbor: impl Into<String>, flow: Real) -> Self {
        self.exchange.insert(neighbor.into(), flow);
        self
    }

    /// Reported production entries, negative values clamped to zero.
    pub fn positive_production(&self) -> impl Iterator<Item = (&str, Real)> {
        self.production
            .iter()
            .filter_map(|(tech, value)| value.map(|v| (tech.as_str(), v.max(0.0))))
    }

    /// Flow totals, preferring the precomputed fields when present.
    pub fn aggregates<S: AsRef<str>>(&self, storage_keys: &[S]) -> Aggregates {
        let production = self.total_production.unwrap_or_else(|| {
            self.positive_production()
                .filter(|(tech, _)| !storage_keys.iter().any(|s| s.as_ref() == *tech))
                .map(|(_, v)| v)
                .sum()
        });
        let import = self
            .total_import
            .unwrap_or_else(|| self.exchange.values().filter(|v| **v > 0.0).sum());
        let export = self.total_export.unwrap_or_else(|| {
            self.exchange
                .values()
                .filter(|v| **v < 0.0)
                .map(|v| v.abs())
                .sum()
        });
        let net_exchange = self.total_net_exchange.unwrap_or(import - export);

        Aggregates {
            production,
            import,
            export,
            net_exchange,
        }
    }
}
