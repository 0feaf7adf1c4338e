use crate::error::{Result, StratoptError};
use chrono::{DateTime, TimeZone, Utc};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Required OHLCV columns for market data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredColumn {
    Open,
    High,
    Low,
    Close,
    Volume,
}

impl RequiredColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::High => "high",
            Self::Low => "low",
            Self::Close => "close",
            Self::Volume => "volume",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![Self::Open, Self::High, Self::Low, Self::Close, Self::Volume]
    }

    /// Common alternative column names
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Open => vec!["open", "Open", "OPEN", "o"],
            Self::High => vec!["high", "High", "HIGH", "h"],
            Self::Low => vec!["low", "Low", "LOW", "l"],
            Self::Close => vec!["close", "Close", "CLOSE", "c"],
            Self::Volume => vec!["volume", "Volume", "VOLUME", "vol", "Vol", "v"],
        }
    }

    /// Resolve the actual column name in a frame, trying aliases in order.
    pub fn resolve<'a>(&self, df: &'a DataFrame) -> Option<&'a str> {
        let columns = df.get_column_names();
        for alias in self.aliases() {
            if let Some(found) = columns.iter().find(|col| col.as_str() == alias) {
                return Some(found.as_str());
            }
        }
        None
    }
}

/// Candle timeframes supported by the resampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    H12,
    D1,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H4 => "4h",
            Self::H12 => "12h",
            Self::D1 => "1d",
        }
    }

    /// Bucket width in epoch milliseconds.
    pub fn millis(&self) -> i64 {
        match self {
            Self::M1 => 60_000,
            Self::M5 => 300_000,
            Self::M15 => 900_000,
            Self::M30 => 1_800_000,
            Self::H1 => 3_600_000,
            Self::H4 => 14_400_000,
            Self::H12 => 43_200_000,
            Self::D1 => 86_400_000,
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::M1,
            Self::M5,
            Self::M15,
            Self::M30,
            Self::H1,
            Self::H4,
            Self::H12,
            Self::D1,
        ]
    }
}

impl FromStr for Timeframe {
    type Err = StratoptError;

    fn from_str(s: &str) -> Result<Self> {
        Timeframe::all()
            .into_iter()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| {
                StratoptError::Configuration(format!(
                    "Unknown timeframe '{}' (expected one of {:?})",
                    s,
                    Timeframe::all().iter().map(|t| t.as_str()).collect::<Vec<_>>()
                ))
            })
    }
}

/// OHLCV columns extracted once from a DataFrame so per-individual backtests
/// never touch polars again.
#[derive(Debug, Clone)]
pub struct CandleSeries {
    pub open: Vec<f64>,
    pub high: Vec<f64>,
    pub low: Vec<f64>,
    pub close: Vec<f64>,
    pub volume: Vec<f64>,
}

impl CandleSeries {
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        Ok(Self {
            open: column_values(df, RequiredColumn::Open)?,
            high: column_values(df, RequiredColumn::High)?,
            low: column_values(df, RequiredColumn::Low)?,
            close: column_values(df, RequiredColumn::Close)?,
            volume: column_values(df, RequiredColumn::Volume)?,
        })
    }

    pub fn len(&self) -> usize {
        self.close.len()
    }

    pub fn is_empty(&self) -> bool {
        self.close.is_empty()
    }
}

fn column_values(df: &DataFrame, column: RequiredColumn) -> Result<Vec<f64>> {
    let name = column.resolve(df).ok_or_else(|| {
        StratoptError::DataLoading(format!("Missing required column: {}", column.as_str()))
    })?;
    let series = df.column(name)?.cast(&DataType::Float64)?;
    let values = series.f64()?;
    Ok((0..values.len()).map(|i| values.get(i).unwrap_or(0.0)).collect())
}

/// Metadata about loaded market data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_rows: usize,
    pub columns: Vec<String>,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

pub fn ms_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms).single()
}
