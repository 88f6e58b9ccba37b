use crate::error::{Result, WeatherError};
use crate::models::ObservationTable;
use crate::utils::constants::COLUMN_NAMES;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Persists an [`ObservationTable`] as CSV with a `yyyy,mm,tmax,tmin,af,rain,sun`
/// header. Missing values are written as empty fields.
pub struct CacheWriter;

impl CacheWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write the cache file, creating its directory if needed.
    ///
    /// The table is written to a temporary file next to the target and then
    /// renamed over it, so an interrupted run never leaves a partial cache.
    pub fn write(&self, table: &ObservationTable, path: &Path) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| WeatherError::CacheDirCreation(dir.to_path_buf(), e))?;

        let mut temp_file =
            NamedTempFile::new_in(dir).map_err(|e| WeatherError::CacheWrite(path.to_path_buf(), e))?;
        self.write_to(table, &mut temp_file)?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|e| WeatherError::CacheWrite(path.to_path_buf(), e))?;
        temp_file
            .persist(path)
            .map_err(|e| WeatherError::CacheWrite(path.to_path_buf(), e.error))?;

        info!("Cached {} observations to {:?}", table.len(), path);
        Ok(())
    }

    pub fn write_to<W: Write>(&self, table: &ObservationTable, writer: W) -> Result<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(COLUMN_NAMES)?;
        for observation in table {
            csv_writer.serialize(observation)?;
        }
        csv_writer.flush()?;

        Ok(())
    }
}

impl Default for CacheWriter {
    fn default() -> Self {
        Self::new()
    }
}
