use crate::error::Result;
use crate::models::{Observation, ObservationTable};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Reads the CSV cache written by [`crate::writers::CacheWriter`].
///
/// The cache is trusted as-is. Fields that do not hold a number load as `None`
/// and rows without a readable year or month are dropped.
pub struct CacheReader;

impl CacheReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<ObservationTable> {
        let file = File::open(path)?;
        let table = self.read_from(file)?;
        info!("Loaded {} observations from cache {:?}", table.len(), path);
        Ok(table)
    }

    pub fn read_from<R: Read>(&self, reader: R) -> Result<ObservationTable> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        // the record iterator swallows header read failures
        csv_reader.headers()?;

        let mut rows = Vec::new();
        for (index, result) in csv_reader.deserialize::<Observation>().enumerate() {
            match result {
                Ok(observation) => rows.push(observation),
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => debug!("Skipping unreadable cache row {}: {}", index + 1, e),
            }
        }

        Ok(ObservationTable::new(rows))
    }
}

impl Default for CacheReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_with_nulls() -> Result<()> {
        let data = "yyyy,mm,tmax,tmin,af,rain,sun
1959,1,12.3,2.1,5,45.6,60.2
1959,2,8.0,,3,,70.1
";
        let table = CacheReader::new().read_from(data.as_bytes())?;

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].tmax, Some(12.3));
        assert_eq!(table.rows()[1].tmin, None);
        assert_eq!(table.rows()[1].rain, None);
        assert_eq!(table.rows()[1].sun, Some(70.1));
        Ok(())
    }

    #[test]
    fn test_bad_values_coerce_to_null() -> Result<()> {
        let data = "yyyy,mm,tmax,tmin,af,rain,sun
1960,3,oops,1.0,0,12.0,---
";
        let table = CacheReader::new().read_from(data.as_bytes())?;

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].tmax, None);
        assert_eq!(table.rows()[0].sun, None);
        assert_eq!(table.rows()[0].rain, Some(12.0));
        Ok(())
    }

    #[test]
    fn test_unreadable_path_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = CacheReader::new().read(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_rows_without_year_are_skipped() -> Result<()> {
        let data = "yyyy,mm,tmax,tmin,af,rain,sun
,1,1.0,1.0,1,1.0,1.0
1961,4,13.0,4.0,1,50.0,150.0
";
        let table = CacheReader::new().read_from(data.as_bytes())?;

        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].year, 1961);
        Ok(())
    }
}
