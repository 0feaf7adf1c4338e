use crate::data::types::RequiredColumn;
use crate::error::{Result, StratoptError};
use polars::prelude::*;
use std::collections::HashMap;

pub struct DataValidator;

impl DataValidator {
    /// Validate that DataFrame has required OHLCV columns
    pub fn validate_ohlcv(df: &DataFrame) -> Result<HashMap<RequiredColumn, String>> {
        let mut column_map = HashMap::new();

        for required in RequiredColumn::all() {
            match required.resolve(df) {
                Some(col_name) => {
                    column_map.insert(required, col_name.to_string());
                }
                None => {
                    return Err(StratoptError::DataLoading(format!(
                        "Missing required column: {} (tried aliases: {:?})",
                        required.as_str(),
                        required.aliases()
                    )));
                }
            }
        }

        for (req_col, actual_name) in &column_map {
            let series = df.column(actual_name)?;
            if !matches!(
                series.dtype(),
                DataType::Float64
                    | DataType::Float32
                    | DataType::Int64
                    | DataType::Int32
                    | DataType::UInt64
                    | DataType::UInt32
            ) {
                return Err(StratoptError::DataLoading(format!(
                    "Column '{}' ({}) must be numeric, found {:?}",
                    actual_name,
                    req_col.as_str(),
                    series.dtype()
                )));
            }
        }

        Self::validate_ohlc_relationships(df, &column_map)?;

        Ok(column_map)
    }

    /// Every bar's high must bound its low, open and close from above, and the
    /// low must bound open and close from below.
    fn validate_ohlc_relationships(
        df: &DataFrame,
        column_map: &HashMap<RequiredColumn, String>,
    ) -> Result<()> {
        let get = |col: RequiredColumn| -> Result<Column> {
            let name = column_map.get(&col).expect("column map is complete");
            Ok(df.column(name)?.cast(&DataType::Float64)?)
        };

        let open = get(RequiredColumn::Open)?;
        let high = get(RequiredColumn::High)?;
        let low = get(RequiredColumn::Low)?;
        let close = get(RequiredColumn::Close)?;

        let open = open.f64()?;
        let high = high.f64()?;
        let low = low.f64()?;
        let close = close.f64()?;

        for i in 0..df.height() {
            if let (Some(o), Some(h), Some(l), Some(c)) =
                (open.get(i), high.get(i), low.get(i), close.get(i))
            {
                if h < l || h < o || h < c || l > o || l > c {
                    return Err(StratoptError::DataLoading(format!(
                        "Invalid OHLC data at row {}: open={}, high={}, low={}, close={}",
                        i, o, h, l, c
                    )));
                }
            }
        }

        Ok(())
    }

    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(StratoptError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Check for null values in all columns
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        let mut null_report = Vec::new();

        for series in df.get_columns() {
            let null_count = series.null_count();
            if null_count > 0 {
                null_report.push((series.name().to_string(), null_count));
            }
        }

        null_report
    }
}
