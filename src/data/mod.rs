pub mod csv;
pub mod resample;
pub mod types;
pub mod validator;

pub use csv::CsvConnector;
pub use resample::resample;
pub use types::{CandleSeries, DatasetMetadata, RequiredColumn, Timeframe};
pub use validator::DataValidator;
