use crate::data::types::Timeframe;
use crate::error::{Result, StratoptError};
use polars::prelude::*;

/// Resample a raw OHLCV frame into a coarser fixed timeframe.
///
/// Requires an epoch-millisecond `timestamp` column. Buckets are aligned to
/// multiples of the timeframe width; within each bucket the open is the first
/// value, high the max, low the min, close the last, volume the sum.
pub fn resample(df: &DataFrame, timeframe: Timeframe) -> Result<DataFrame> {
    if df.column("timestamp").is_err() {
        return Err(StratoptError::DataLoading(
            "Resampling requires a 'timestamp' column in epoch milliseconds".to_string(),
        ));
    }

    let bucket = timeframe.millis();
    let out = df
        .clone()
        .lazy()
        .with_column(col("timestamp").cast(DataType::Int64))
        .sort(["timestamp"], SortMultipleOptions::default())
        .with_column((col("timestamp") - (col("timestamp") % lit(bucket))).alias("bucket"))
        .group_by_stable([col("bucket")])
        .agg([
            col("open").first(),
            col("high").max(),
            col("low").min(),
            col("close").last(),
            col("volume").sum(),
        ])
        .sort(["bucket"], SortMultipleOptions::default())
        .select([
            col("bucket").alias("timestamp"),
            col("open"),
            col("high"),
            col("low"),
            col("close"),
            col("volume"),
        ])
        .collect()?;

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn minute_candles() -> DataFrame {
        // Ten 1-minute candles spanning two 5-minute buckets.
        let timestamps: Vec<i64> = (0..10).map(|i| i * 60_000).collect();
        df! {
            "timestamp" => &timestamps,
            "open" => &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
            "high" => &[1.5, 2.5, 3.5, 4.5, 9.0, 6.5, 7.5, 8.5, 9.5, 10.5],
            "low" => &[0.5, 1.5, 2.5, 0.2, 4.5, 5.5, 6.5, 7.5, 8.5, 9.5],
            "close" => &[1.2, 2.2, 3.2, 4.2, 5.2, 6.2, 7.2, 8.2, 9.2, 10.2],
            "volume" => &[10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 20.0, 20.0, 20.0, 20.0],
        }
        .unwrap()
    }

    #[test]
    fn aggregates_five_minute_buckets() {
        let resampled = resample(&minute_candles(), Timeframe::M5).unwrap();
        assert_eq!(resampled.height(), 2);

        let open = resampled.column("open").unwrap().f64().unwrap();
        let high = resampled.column("high").unwrap().f64().unwrap();
        let low = resampled.column("low").unwrap().f64().unwrap();
        let close = resampled.column("close").unwrap().f64().unwrap();
        let volume = resampled.column("volume").unwrap().f64().unwrap();

        assert_eq!(open.get(0), Some(1.0));
        assert_eq!(high.get(0), Some(9.0));
        assert_eq!(low.get(0), Some(0.2));
        assert_eq!(close.get(0), Some(5.2));
        assert_eq!(volume.get(0), Some(50.0));

        assert_eq!(open.get(1), Some(6.0));
        assert_eq!(close.get(1), Some(10.2));
        assert_eq!(volume.get(1), Some(100.0));
    }

    #[test]
    fn requires_timestamp_column() {
        let df = df! { "close" => &[1.0, 2.0] }.unwrap();
        assert!(resample(&df, Timeframe::H1).is_err());
    }
}
