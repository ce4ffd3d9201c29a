//! Historical data loading

mod csv_import;

pub use csv_import::{CsvObservationLoader, LoaderError};
