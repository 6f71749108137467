//! Recoverable problems found while assembling the system.

use ft_core::Real;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A production entry was skipped because its technology has no factor.
    UnknownFactor { zone: String, technology: String },
    /// An exchange partner is not part of the solved set.
    UntrackedNeighbor {
        zone: String,
        neighbor: String,
        flow: Real,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownFactor { zone, technology } => {
                write!(f, "{zone}: footprint of '{technology}' is unknown")
            }
            Diagnostic::UntrackedNeighbor {
                zone,
                neighbor,
                flow,
            } => write!(f, "{zone}: neighbor {neighbor} ({flow:+}) has no attributed value"),
        }
    }
}
