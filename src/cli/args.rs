use crate::error::Result;
use crate::models::Column;
use crate::processors::YearRange;
use crate::writers::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "weather-trends")]
#[command(about = "Historic weather trends for the Cambridge NIAB station")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "Configuration file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the station data (from cache, or download it) and summarise it
    Fetch,

    /// Annual averages with a rolling mean-temperature trend
    Trends {
        #[command(flatten)]
        years: YearArgs,

        #[arg(short, long, help = "Rolling window in years [default: from config, 10]")]
        window: Option<usize>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Months with the highest values in a column
    Top {
        #[arg(short, long, value_parser = parse_column, help = "Column to rank: tmax, tmin, af, rain, sun")]
        column: Column,

        #[arg(short, long, help = "Number of rows [default: from config, 10]")]
        n: Option<usize>,

        #[command(flatten)]
        years: YearArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Year by month grid of a column
    Heatmap {
        #[arg(short, long, value_parser = parse_column, default_value = "tmax")]
        column: Column,

        #[command(flatten)]
        years: YearArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show cache location and a summary of the cached data
    Info,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct YearArgs {
    #[arg(long, help = "First year to include")]
    pub min_year: Option<i32>,

    #[arg(long, help = "Last year to include")]
    pub max_year: Option<i32>,
}

impl YearArgs {
    pub fn to_range(self) -> Result<YearRange> {
        YearRange::new(self.min_year, self.max_year)
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    #[arg(short, long, help = "Write to file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(long, default_value_t = 2, help = "Decimal places in table output")]
    pub precision: usize,
}

fn parse_column(value: &str) -> std::result::Result<Column, String> {
    value.parse::<Column>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_top_command() {
        let cli = Cli::try_parse_from([
            "weather-trends",
            "top",
            "--column",
            "rain",
            "-n",
            "3",
            "--min-year",
            "1990",
            "--format",
            "csv",
            "--precision",
            "1",
        ])
        .unwrap();

        match cli.command {
            Commands::Top {
                column,
                n,
                years,
                output,
            } => {
                assert_eq!(column, Column::Rain);
                assert_eq!(n, Some(3));
                assert_eq!(years.min_year, Some(1990));
                assert_eq!(years.max_year, None);
                assert_eq!(output.format, OutputFormat::Csv);
                assert_eq!(output.precision, 1);
            }
            _ => panic!("expected top command"),
        }
    }

    #[test]
    fn test_heatmap_defaults_to_tmax() {
        let cli = Cli::try_parse_from(["weather-trends", "heatmap", "-v"]).unwrap();

        assert!(cli.verbose);
        match cli.command {
            Commands::Heatmap { column, output, .. } => {
                assert_eq!(column, Column::Tmax);
                assert_eq!(output.format, OutputFormat::Table);
                assert_eq!(output.precision, 2);
            }
            _ => panic!("expected heatmap command"),
        }
    }

    #[test]
    fn test_unknown_column_rejected() {
        assert!(Cli::try_parse_from(["weather-trends", "top", "--column", "snow"]).is_err());
    }
}
