//! SQLite persistence

mod forecast_store;

pub use forecast_store::{DatabaseError, SqliteForecastStore};
