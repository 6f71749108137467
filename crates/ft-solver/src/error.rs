//! Error types for solver operations.

use ft_factors::FactorError;
use ft_grid::GridError;
use thiserror::Error;

/// Errors that end the solve of one snapshot.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Singular system: {size}x{size} matrix could not be factorized")]
    SingularMatrix { size: usize },

    /// Smallest LU pivot is too small relative to the largest once rows are
    /// scaled to unit max-norm.
    #[error("Ill-conditioned system: {size}x{size} matrix has pivot ratio {pivot_ratio:e}")]
    IllConditioned { size: usize, pivot_ratio: f64 },

    #[error("Non-finite value solved for zone '{zone}'")]
    NonFiniteSolution { zone: String },

    #[error("Snapshot error: {0}")]
    Grid(#[from] GridError),

    #[error("Factor table error: {0}")]
    Factors(#[from] FactorError),
}

pub type SolverResult<T> = Result<T, SolverError>;

