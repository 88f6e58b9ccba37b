use crate::analyzers::{calculate_rolling_trends, get_top_records, pivot_monthly};
use crate::cli::args::{Cli, Commands, OutputArgs};
use crate::error::Result;
use crate::models::ObservationTable;
use crate::processors::{filter_by_year_range, IntegrityChecker, YearRange};
use crate::settings::Settings;
use crate::source::WeatherDataLoader;
use crate::utils::progress::ProgressReporter;
use crate::writers::{OutputFormat, TableWriter};
use chrono::{DateTime, Local};
use std::fs;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("Using settings: {:?}", settings);

    let loader = WeatherDataLoader::new(&settings)?;

    match cli.command {
        Commands::Fetch => {
            let table = load_with_progress(&loader)?;

            let checker = IntegrityChecker::new();
            let report = checker.check_integrity(&table);
            println!("{}", checker.generate_summary(&report));
            println!("Cache: {}", loader.cache_path().display());
        }

        Commands::Trends {
            years,
            window,
            output,
        } => {
            let table = load_with_progress(&loader)?;
            let range = years.to_range()?;
            let filtered = filter_by_year_range(&table, range);
            let window = window.unwrap_or(settings.trend_window);

            print_heading(
                &output,
                &format!("Annual averages with {}-year rolling trend", window),
                &filtered,
                range,
            );
            let annual = calculate_rolling_trends(&filtered, window)?;
            writer_for(&output).write_output(&annual, output.output.as_deref())?;
        }

        Commands::Top {
            column,
            n,
            years,
            output,
        } => {
            let table = load_with_progress(&loader)?;
            let range = years.to_range()?;
            let filtered = filter_by_year_range(&table, range);
            let n = n.unwrap_or(settings.top_n);

            print_heading(
                &output,
                &format!("Top {} months by {}", n, column),
                &filtered,
                range,
            );
            let top = get_top_records(&filtered, column, n);
            writer_for(&output).write_output(&top, output.output.as_deref())?;
        }

        Commands::Heatmap {
            column,
            years,
            output,
        } => {
            let table = load_with_progress(&loader)?;
            let range = years.to_range()?;
            let filtered = filter_by_year_range(&table, range);

            print_heading(
                &output,
                &format!("Monthly {} by year", column),
                &filtered,
                range,
            );
            let pivot = pivot_monthly(&filtered, column);
            writer_for(&output).write_output(&pivot, output.output.as_deref())?;
        }

        Commands::Info => {
            println!("Source: {}", loader.source_url());
            println!("Cache file: {}", loader.cache_path().display());

            if !loader.is_cached() {
                println!("Cache status: not downloaded yet (run `fetch`)");
                return Ok(());
            }

            let modified: DateTime<Local> = fs::metadata(loader.cache_path())?.modified()?.into();
            println!("Cached at: {}", modified.format("%Y-%m-%d %H:%M:%S"));

            let table = loader.load_weather_data()?;
            let checker = IntegrityChecker::new();
            println!("\n{}", checker.generate_summary(&checker.check_integrity(&table)));
        }
    }

    Ok(())
}

/// Load observations, showing a spinner when a download is needed.
fn load_with_progress(loader: &WeatherDataLoader) -> Result<ObservationTable> {
    if loader.is_cached() {
        return loader.load_weather_data();
    }

    let progress = ProgressReporter::new_spinner(&format!(
        "Downloading station data from {}...",
        loader.source_url()
    ));
    let result = loader.load_weather_data();
    match &result {
        Ok(table) => progress.finish_with_message(&format!(
            "Downloaded {} observations",
            table.len()
        )),
        Err(_) => progress.finish_and_clear(),
    }
    result
}

fn writer_for(output: &OutputArgs) -> TableWriter {
    TableWriter::new()
        .with_format(output.format)
        .with_precision(output.precision)
}

/// Title line for terminal tables only, so CSV and JSON stay machine readable.
fn print_heading(output: &OutputArgs, title: &str, table: &ObservationTable, range: YearRange) {
    if output.format != OutputFormat::Table || output.output.is_some() {
        return;
    }
    match range.resolve(table) {
        Some((min, max)) => println!("{} ({} - {}, {} measurements)\n", title, min, max, table.len()),
        None => println!("{} (no data in selected years)\n", title),
    }
}
