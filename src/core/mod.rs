mod allocation;
mod amortization;
mod error;
mod investment;
mod overlay;
mod projection;
mod types;

pub use amortization::{compute_schedule, fixed_monthly_payment};
pub use error::{MAX_LOAN_LENGTH_YEARS, ParameterError};
pub use investment::compute_series;
pub use overlay::OverlayController;
pub use projection::{axis_bounds, project};
pub use types::{
    AllocationSource, AllocationState, AxisBounds, ChartArea, CrosshairLine, Dataset,
    InvestmentParameters, LoanParameters, MonthlyRecord, PointerEvent, PointerState, Projection,
    ProjectionSummary, SeriesKind,
};
