//! Seasonal regression model

mod harmonic;

pub use harmonic::{FittedHarmonicModel, HarmonicRegression, ModelError};
