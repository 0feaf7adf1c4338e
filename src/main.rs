use anyhow::{Context, Result};
use stratopt::config::ConfigManager;
use stratopt::data::types::{CandleSeries, Timeframe};
use stratopt::data::{resample, CsvConnector};
use stratopt::engines::optimization::Nsga2;
use stratopt::strategies::{BacktestEvaluator, StrategyId};

fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "stratopt.toml".to_string());

    let manager = ConfigManager::new();
    manager
        .load_from_file(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path))?;
    let config = manager.get();

    let strategy: StrategyId = config.optimizer.strategy.parse()?;
    let timeframe: Timeframe = config.data.timeframe.parse()?;

    let (frame, _columns) = CsvConnector::load_and_validate(&config.data.csv_path, 2)?;
    let metadata = CsvConnector::create_metadata(&config.data.csv_path, &frame)?;
    log::info!(
        "Loaded {} rows from {} (range: {:?})",
        metadata.num_rows,
        metadata.file_path,
        metadata.date_range
    );

    let frame = resample(&frame, timeframe)?;
    if frame.height() < config.data.min_rows {
        anyhow::bail!(
            "Only {} candles after resampling to {}, minimum {} required",
            frame.height(),
            timeframe.as_str(),
            config.data.min_rows
        );
    }

    let series = CandleSeries::from_dataframe(&frame)?;
    log::info!(
        "Optimizing '{}' over {} {} candles ({} individuals, {} generations)",
        strategy,
        series.len(),
        timeframe.as_str(),
        config.optimizer.population_size,
        config.optimizer.generations
    );

    let space = strategy.parameter_space()?;
    let evaluator = BacktestEvaluator::new(strategy, series);
    let mut engine = Nsga2::new(
        config.optimizer.clone(),
        space,
        Box::new(evaluator),
        strategy.repair(),
    )?;

    let population = engine.run()?;
    for individual in &population {
        println!("{}", individual);
    }

    Ok(())
}
