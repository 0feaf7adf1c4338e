use stratopt::data::types::{CandleSeries, Timeframe};
use stratopt::data::{resample, CsvConnector};
use std::io::Write;
use std::path::PathBuf;

/// Write a small 1-minute candle CSV and return its path.
fn write_sample_csv() -> PathBuf {
    let path = std::env::temp_dir().join(format!("stratopt_pipeline_{}.csv", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();

    writeln!(file, "timestamp,open,high,low,close,volume").unwrap();
    for i in 0..20i64 {
        let base = 100.0 + i as f64;
        writeln!(
            file,
            "{},{},{},{},{},{}",
            i * 60_000,
            base,
            base + 1.0,
            base - 1.0,
            base + 0.5,
            50 + i
        )
        .unwrap();
    }

    path
}

#[test]
fn csv_to_candle_series_pipeline() {
    let path = write_sample_csv();

    let (frame, columns) = CsvConnector::load_and_validate(&path, 10).unwrap();
    assert_eq!(frame.height(), 20);
    assert_eq!(columns.len(), 5);

    let metadata = CsvConnector::create_metadata(&path, &frame).unwrap();
    assert_eq!(metadata.num_rows, 20);
    let (first, last) = metadata.date_range.expect("timestamp column present");
    assert!(first < last);

    // Twenty 1-minute candles collapse into four 5-minute candles.
    let resampled = resample(&frame, Timeframe::M5).unwrap();
    assert_eq!(resampled.height(), 4);

    let series = CandleSeries::from_dataframe(&resampled).unwrap();
    assert_eq!(series.len(), 4);

    // First bucket: open of bar 0, close of bar 4, volume sum 50..=54.
    assert_eq!(series.open[0], 100.0);
    assert_eq!(series.close[0], 104.5);
    assert_eq!(series.volume[0], 260.0);
    // High of the first bucket is the last bar's high.
    assert_eq!(series.high[0], 105.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn validation_rejects_missing_volume() {
    let path = std::env::temp_dir().join(format!(
        "stratopt_pipeline_bad_{}.csv",
        std::process::id()
    ));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "timestamp,open,high,low,close").unwrap();
    writeln!(file, "0,100,101,99,100.5").unwrap();
    writeln!(file, "60000,100.5,102,100,101").unwrap();
    drop(file);

    let result = CsvConnector::load_and_validate(&path, 1);
    assert!(result.is_err());

    std::fs::remove_file(&path).ok();
}
