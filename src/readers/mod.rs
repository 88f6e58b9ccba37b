pub mod cache_reader;
pub mod station_text_reader;

pub use cache_reader::CacheReader;
pub use station_text_reader::{parse_value, StationTextReader};
