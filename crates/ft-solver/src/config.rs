//! Solver policy knobs.

use ft_core::Real;
use ft_grid::{DEFAULT_STORAGE_KEYS, ValidityRule};
use serde::{Deserialize, Serialize};

/// How an import from a zone outside the solved set is valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UntrackedImportPolicy {
    /// The import dilutes the zone like footprint-free electricity.
    #[default]
    ZeroFootprint,
    /// The import is assumed to carry the importing zone's own value, so it
    /// neither dilutes nor enriches it.
    SelfFootprint,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub validity: ValidityRule,
    pub untracked_imports: UntrackedImportPolicy,
    /// Production keys that represent storage draw, not generation.
    pub storage_keys: Vec<String>,
    /// Smallest accepted `min |U_ii| / max |U_ii|` of the row-scaled LU
    /// factors. Below it the solve fails with `IllConditioned`.
    pub min_pivot_ratio: Real,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            validity: ValidityRule::default(),
            untracked_imports: UntrackedImportPolicy::default(),
            storage_keys: DEFAULT_STORAGE_KEYS.iter().map(|s| s.to_string()).collect(),
            min_pivot_ratio: 1e-10,
        }
    }
}

impl SolverConfig {
    pub fn is_storage(&self, technology: &str) -> bool {
        self.storage_keys.iter().any(|s| s == technology)
    }
}
