/// Met Office historic station data (Cambridge NIAB)
pub const STATION_DATA_URL: &str =
    "https://www.metoffice.gov.uk/pub/data/weather/uk/climate/stationdata/cambridgedata.txt";

/// Station text layout
pub const HEADER_LINES: usize = 7;
pub const COLUMN_COUNT: usize = 7;
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = ["yyyy", "mm", "tmax", "tmin", "af", "rain", "sun"];

/// Tokens meaning "no measurement"
pub const MISSING_VALUE_SENTINELS: [&str; 3] = ["*", "---", "---*"];

/// Cache location
pub const CACHE_DIR_NAME: &str = "weather-trends";
pub const CACHE_FILE_NAME: &str = "cambridge.csv";
pub const FALLBACK_CACHE_DIR: &str = "data";

/// Processing defaults
pub const DEFAULT_TREND_WINDOW: usize = 10;
pub const DEFAULT_TOP_N: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "WEATHER_TRENDS";
