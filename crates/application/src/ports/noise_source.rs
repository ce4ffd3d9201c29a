//! Noise source port
//!
//! The forecast perturbation is drawn through this interface rather than an
//! ambient global generator, so tests can fix the sequence and production
//! code can seed it from configuration.

#[cfg(test)]
use mockall::automock;

/// Port for the per-day forecast perturbation
#[cfg_attr(test, automock)]
pub trait NoiseSource {
    /// Draw the next perturbation value in Celsius
    fn sample(&mut self) -> f64;
}
