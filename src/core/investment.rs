use super::amortization::{MAX_PREALLOCATED_MONTHS, monthly_rate};
use super::types::InvestmentParameters;

/// Portfolio value at the end of each month. Contributions land before that
/// month's growth is applied. Always exactly `months` entries.
pub fn compute_series(inv: &InvestmentParameters, months: u32) -> Vec<f64> {
    let rate = monthly_rate(inv.annual_roi_percent);
    let mut value = inv.investment_start;
    let mut series = Vec::with_capacity(months.min(MAX_PREALLOCATED_MONTHS) as usize);
    for _ in 0..months {
        value += inv.additional_investment;
        value += value * rate;
        series.push(value);
    }
    series
}
