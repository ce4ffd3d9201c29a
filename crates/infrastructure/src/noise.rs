//! Gaussian perturbation source
//!
//! Standard-normal noise for the per-day forecast perturbation. The
//! generator is seedable so runs can be reproduced from configuration and
//! tests can fix the sequence.

use application::NoiseSource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};

/// Standard-normal noise over a seedable generator
#[derive(Debug)]
pub struct GaussianNoise {
    rng: StdRng,
}

impl GaussianNoise {
    /// Create a noise source seeded from operating-system entropy
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a reproducible noise source from a fixed seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl NoiseSource for GaussianNoise {
    fn sample(&mut self) -> f64 {
        StandardNormal.sample(&mut self.rng)
    }
}
