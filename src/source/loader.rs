use crate::error::Result;
use crate::models::ObservationTable;
use crate::readers::{CacheReader, StationTextReader};
use crate::settings::Settings;
use crate::source::fetcher::StationDataFetcher;
use crate::writers::CacheWriter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Cache-or-download access to the station observations.
///
/// A present cache file is trusted as-is and the network is never touched.
/// Otherwise the station text is downloaded once, parsed, written to the
/// cache and returned. The cache file has no locking: two processes loading
/// at the same time may both download and the last writer wins.
pub struct WeatherDataLoader {
    cache_path: PathBuf,
    fetcher: StationDataFetcher,
    reader: StationTextReader,
}

impl WeatherDataLoader {
    pub fn new(settings: &Settings) -> Result<Self> {
        let fetcher = StationDataFetcher::new(&settings.source_url, settings.request_timeout())?;

        Ok(Self {
            cache_path: settings.cache_path.clone(),
            fetcher,
            reader: StationTextReader::with_header_lines(settings.header_lines),
        })
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn source_url(&self) -> &str {
        self.fetcher.url()
    }

    /// Only a regular file counts as a cache.
    pub fn is_cached(&self) -> bool {
        fs::metadata(&self.cache_path)
            .map(|m| m.is_file())
            .unwrap_or(false)
    }

    pub fn load_weather_data(&self) -> Result<ObservationTable> {
        if self.is_cached() {
            info!("Cache hit at {:?}", self.cache_path);
            return CacheReader::new().read(&self.cache_path);
        }

        warn!(
            "Cache miss at {:?}. Downloading and processing.",
            self.cache_path
        );
        let body = self.fetcher.fetch()?;
        let table = self.reader.parse_bytes(&body);

        CacheWriter::new().write(&table, &self.cache_path)?;
        Ok(table)
    }
}

/// Load observations using the default settings.
pub fn load_weather_data() -> Result<ObservationTable> {
    WeatherDataLoader::new(&Settings::default())?.load_weather_data()
}
