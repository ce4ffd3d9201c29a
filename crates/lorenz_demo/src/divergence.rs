//! Trajectory divergence analysis
//!
//! Measures how two trajectories started from nearby states separate over
//! time. For chaotic parameters the separation grows roughly exponentially
//! until it saturates at the attractor diameter (the butterfly effect).

use thiserror::Error;

use crate::lorenz::Trajectory;

/// Errors raised while comparing trajectories
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DivergenceError {
    /// The trajectories have different sample counts
    #[error("Trajectory lengths differ: {0} vs {1}")]
    LengthMismatch(usize, usize),
}

/// Per-sample Euclidean distance between two trajectories
///
/// # Errors
///
/// Returns [`DivergenceError::LengthMismatch`] when the trajectories were
/// not sampled on the same grid.
pub fn divergence(a: &Trajectory, b: &Trajectory) -> Result<Vec<f64>, DivergenceError> {
    if a.len() != b.len() {
        return Err(DivergenceError::LengthMismatch(a.len(), b.len()));
    }

    Ok(a.states
        .iter()
        .zip(&b.states)
        .map(|(sa, sb)| sa.distance(sb))
        .collect())
}
