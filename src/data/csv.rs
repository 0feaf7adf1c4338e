use crate::data::types::{ms_to_datetime, DatasetMetadata, RequiredColumn};
use crate::data::validator::DataValidator;
use crate::error::{Result, StratoptError};
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))
            .map_err(|e| StratoptError::DataLoading(format!("Failed to open CSV: {}", e)))?
            .finish()
            .map_err(|e| StratoptError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load and validate CSV file
    pub fn load_and_validate<P: AsRef<Path>>(
        path: P,
        min_rows: usize,
    ) -> Result<(DataFrame, HashMap<RequiredColumn, String>)> {
        let df = Self::load(&path)?;

        let column_map = DataValidator::validate_ohlcv(&df)?;
        DataValidator::validate_minimum_rows(&df, min_rows)?;

        // Warn about nulls but don't fail
        let null_report = DataValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        Ok((df, column_map))
    }

    /// Create metadata for a loaded DataFrame
    pub fn create_metadata<P: AsRef<Path>>(path: P, df: &DataFrame) -> Result<DatasetMetadata> {
        let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

        let date_range = match df.column("timestamp") {
            Ok(ts) => {
                let ts = ts.cast(&DataType::Int64)?;
                let ts = ts.i64()?;
                match (ts.min(), ts.max()) {
                    (Some(first), Some(last)) => {
                        ms_to_datetime(first).zip(ms_to_datetime(last))
                    }
                    _ => None,
                }
            }
            Err(_) => None,
        };

        Ok(DatasetMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_rows: df.height(),
            columns,
            date_range,
        })
    }
}
