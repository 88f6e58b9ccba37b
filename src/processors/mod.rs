pub mod integrity_checker;
pub mod year_filter;

pub use integrity_checker::{IntegrityChecker, IntegrityReport};
pub use year_filter::{filter_by_year_range, YearRange};
