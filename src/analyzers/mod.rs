pub mod annual;
pub mod monthly_pivot;
pub mod records;

pub use annual::{calculate_annual_averages, calculate_rolling_trends};
pub use monthly_pivot::pivot_monthly;
pub use records::get_top_records;
