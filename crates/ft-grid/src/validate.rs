//! Zone validity filtering.
//!
//! Only zones passing these checks get an unknown in the linear system.
//! Excluded zones may still show up as exchange partners of valid zones.

use ft_core::{Tolerances, at_least};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::snapshot::Snapshot;
use crate::zone::{Aggregates, Zone};

/// How strictly a zone must be self-supplied to enter the solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidityRule {
    /// Zone must report positive production of its own.
    #[default]
    RequireProduction,
    /// Zones with no production are accepted as long as they import something.
    AllowImportOnly,
}

/// Why a zone was left out of the linear system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionReason {
    NoProduction,
    NoSupply,
    ExportExceedsSupply,
    NonFinite,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExclusionReason::NoProduction => "no production",
            ExclusionReason::NoSupply => "no production and no imports",
            ExclusionReason::ExportExceedsSupply => "exports exceed production plus imports",
            ExclusionReason::NonFinite => "non-finite totals",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneStatus {
    Valid,
    Excluded(ExclusionReason),
}

impl ZoneStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, ZoneStatus::Valid)
    }
}

/// Check one zone's aggregates against the rule.
pub fn check_aggregates(agg: &Aggregates, rule: ValidityRule, tol: Tolerances) -> ZoneStatus {
    if !agg.is_finite() {
        return ZoneStatus::Excluded(ExclusionReason::NonFinite);
    }
    match rule {
        ValidityRule::RequireProduction if agg.production <= 0.0 => {
            return ZoneStatus::Excluded(ExclusionReason::NoProduction);
        }
        ValidityRule::AllowImportOnly if agg.supply() <= 0.0 => {
            return ZoneStatus::Excluded(ExclusionReason::NoSupply);
        }
        _ => {}
    }
    if !at_least(agg.supply(), agg.export, tol) {
        return ZoneStatus::Excluded(ExclusionReason::ExportExceedsSupply);
    }
    ZoneStatus::Valid
}

/// Check a single zone.
pub fn check_zone<S: AsRef<str>>(
    zone: &Zone,
    rule: ValidityRule,
    storage_keys: &[S],
) -> ZoneStatus {
    check_aggregates(&zone.aggregates(storage_keys), rule, Tolerances::default())
}

/// Classify every zone of a snapshot, in snapshot order.
pub fn classify<S: AsRef<str>>(
    snapshot: &Snapshot,
    rule: ValidityRule,
    storage_keys: &[S],
) -> Vec<ZoneStatus> {
    snapshot
        .zones()
        .iter()
        .map(|zone| check_zone(zone, rule, storage_keys))
        .collect()
}
