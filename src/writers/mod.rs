pub mod cache_writer;
pub mod table_writer;

pub use cache_writer::CacheWriter;
pub use table_writer::{Cell, OutputFormat, TableWriter, TabularData};
