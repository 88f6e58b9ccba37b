pub mod annual;
pub mod observation;
pub mod pivot;

pub use annual::{AnnualAverage, AnnualTable};
pub use observation::{Column, Observation, ObservationTable};
pub use pivot::{month_label, MonthlyPivot, PivotRow};
