use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanParameters {
    pub principal: f64,
    pub loan_length_years: u32,
    pub annual_interest_rate_percent: f64,
    pub additional_principal: f64,
}

impl LoanParameters {
    pub fn total_months(&self) -> u32 {
        self.loan_length_years.saturating_mul(12)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvestmentParameters {
    pub investment_start: f64,
    pub additional_investment: f64,
    pub annual_roi_percent: f64,
}

/// Which absolute amount the user just edited.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AllocationSource {
    Principal,
    Investment,
}

/// Split of the combined monthly "additional payment" budget.
///
/// `investment_proportion_percent` is `None` while the budget is zero, since the
/// proportion is undefined there; display layers skip it in that case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationState {
    pub additional_payment: f64,
    pub additional_principal: f64,
    pub additional_investment: f64,
    pub investment_proportion_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    pub month: u32,
    pub current_interest: f64,
    pub current_principal: f64,
    pub net_payment: f64,
    pub total_interest: f64,
    pub total_principal: f64,
}

/// Drawable area of the chart in viewport pixels. `top < bottom`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ChartArea {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ChartArea {
    /// Edges count as inside. NaN coordinates never do.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Month under `x` on a linear horizontal axis spanning `0..=x_max` months.
    pub fn month_at(&self, x: f64, x_max: u32) -> Option<u32> {
        let width = self.right - self.left;
        if width.is_nan() || width <= 0.0 || !self.contains(x, self.top) {
            return None;
        }
        let fraction = (x - self.left) / width;
        Some((fraction * f64::from(x_max)).round() as u32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PointerEvent {
    Move { x: f64, y: f64 },
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerState {
    pub x: f64,
    pub y: f64,
    pub inside_chart_area: bool,
    pub should_draw_crosshair: bool,
}

/// Vertical reference line, stroked from `from_y` (bottom) up to `to_y` (top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrosshairLine {
    pub x: f64,
    pub from_y: f64,
    pub to_y: f64,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeriesKind {
    OutstandingBalance,
    PortfolioValue,
    CumulativeInterest,
}

impl SeriesKind {
    pub fn label(self) -> &'static str {
        match self {
            SeriesKind::OutstandingBalance => "Outstanding Balance",
            SeriesKind::PortfolioValue => "Portfolio Value by Month",
            SeriesKind::CumulativeInterest => "Total Interest Paid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub kind: SeriesKind,
    pub label: &'static str,
    pub data: Vec<f64>,
}

impl Dataset {
    pub fn new(kind: SeriesKind, data: Vec<f64>) -> Self {
        Self {
            kind,
            label: kind.label(),
            data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisBounds {
    pub y_max: f64,
    pub x_max: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub monthly_payment: f64,
    pub payoff_month: Option<u32>,
    pub months_saved: u32,
    pub total_interest: f64,
    pub final_portfolio_value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub months: Vec<u32>,
    pub outstanding_balance: Vec<f64>,
    pub portfolio_value: Vec<f64>,
    pub cumulative_interest: Vec<f64>,
    pub axis_bounds: AxisBounds,
    pub summary: ProjectionSummary,
}

impl Projection {
    /// Series in the order the chart draws them.
    pub fn datasets(&self) -> Vec<Dataset> {
        vec![
            Dataset::new(
                SeriesKind::OutstandingBalance,
                self.outstanding_balance.clone(),
            ),
            Dataset::new(SeriesKind::PortfolioValue, self.portfolio_value.clone()),
            Dataset::new(
                SeriesKind::CumulativeInterest,
                self.cumulative_interest.clone(),
            ),
        ]
    }
}
