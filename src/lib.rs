pub mod analyzers;
pub mod cli;
pub mod error;
pub mod models;
pub mod processors;
pub mod readers;
pub mod settings;
pub mod source;
pub mod utils;
pub mod writers;

pub use error::{Result, WeatherError};
pub use source::{load_weather_data, RetrievalError, WeatherDataLoader};
