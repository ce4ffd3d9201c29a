//! Application layer - use cases and orchestration
//!
//! Defines the ports the forecast pipeline depends on and the services that
//! orchestrate domain objects through them. Adapters in the infrastructure
//! layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
