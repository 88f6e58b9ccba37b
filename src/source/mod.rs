pub mod error;
pub mod fetcher;
pub mod loader;

pub use error::RetrievalError;
pub use fetcher::StationDataFetcher;
pub use loader::{load_weather_data, WeatherDataLoader};
