use crate::error::Result;
use crate::utils::constants::{
    CACHE_DIR_NAME, CACHE_FILE_NAME, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOP_N,
    DEFAULT_TREND_WINDOW, ENV_PREFIX, FALLBACK_CACHE_DIR, HEADER_LINES, STATION_DATA_URL,
};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

/// Runtime settings.
///
/// Sources, lowest priority first: built-in defaults, an optional TOML file,
/// then `WEATHER_TRENDS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Settings {
    #[validate(url)]
    pub source_url: String,

    pub cache_path: PathBuf,

    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,

    pub header_lines: usize,

    #[validate(range(min = 1))]
    pub trend_window: usize,

    #[validate(range(min = 1))]
    pub top_n: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_url: STATION_DATA_URL.to_string(),
            cache_path: default_cache_path(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            header_lines: HEADER_LINES,
            trend_window: DEFAULT_TREND_WINDOW,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Settings {
    /// Load layered settings, reading `config_file` when given.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// `<user cache dir>/weather-trends/cambridge.csv`, or `./data/cambridge.csv`
/// when the platform has no cache directory.
pub fn default_cache_path() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
        .join(CACHE_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.trend_window, 10);
        assert_eq!(settings.header_lines, 7);
        assert!(settings.cache_path.ends_with("cambridge.csv"));
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "trend_window = 5")?;
        writeln!(file, "cache_path = \"/tmp/weather-test/cache.csv\"")?;

        let settings = Settings::load(Some(file.path()))?;

        assert_eq!(settings.trend_window, 5);
        assert_eq!(settings.cache_path, PathBuf::from("/tmp/weather-test/cache.csv"));
        assert_eq!(settings.top_n, DEFAULT_TOP_N);
        Ok(())
    }

    #[test]
    fn test_invalid_values_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "trend_window = 0")?;

        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(WeatherError::Validation(_))));
        Ok(())
    }

    #[test]
    fn test_environment_overrides_defaults() -> Result<()> {
        // no other test reads request_timeout_secs from the environment
        std::env::set_var("WEATHER_TRENDS_REQUEST_TIMEOUT_SECS", "42");
        let result = Settings::load(None);
        std::env::remove_var("WEATHER_TRENDS_REQUEST_TIMEOUT_SECS");

        let settings = result?;
        assert_eq!(settings.request_timeout_secs, 42);
        assert_eq!(settings.request_timeout(), Duration::from_secs(42));
        assert_eq!(settings.trend_window, DEFAULT_TREND_WINDOW);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = Settings::load(Some(Path::new("/nonexistent/weather-trends.toml")));
        assert!(matches!(result, Err(WeatherError::Config(_))));
    }
}
