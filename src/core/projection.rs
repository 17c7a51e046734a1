use tracing::debug;

use super::amortization::{compute_schedule, fixed_monthly_payment};
use super::investment::compute_series;
use super::types::{
    AllocationState, AxisBounds, InvestmentParameters, LoanParameters, Projection,
    ProjectionSummary,
};

/// Run both projections over the loan's horizon.
///
/// When an allocation is given its split overrides `loan.additional_principal`
/// and `inv.additional_investment`; otherwise those fields are used as entered.
pub fn project(
    loan: &LoanParameters,
    inv: &InvestmentParameters,
    allocation: Option<&AllocationState>,
) -> Projection {
    let (loan, inv) = match allocation {
        Some(split) => (
            LoanParameters {
                additional_principal: split.additional_principal,
                ..*loan
            },
            InvestmentParameters {
                additional_investment: split.additional_investment,
                ..*inv
            },
        ),
        None => (*loan, *inv),
    };

    let horizon = loan.total_months();
    let schedule = compute_schedule(&loan);
    let portfolio_value = compute_series(&inv, horizon);

    let outstanding_balance = schedule
        .iter()
        .map(|record| (loan.principal - record.total_principal).max(0.0))
        .collect();
    let cumulative_interest = schedule.iter().map(|record| record.total_interest).collect();

    let last = schedule.last();
    let paid_off = last.is_some_and(|record| record.total_principal >= loan.principal - 1e-6);
    let payoff_month = last.filter(|_| paid_off).map(|record| record.month);
    let summary = ProjectionSummary {
        monthly_payment: fixed_monthly_payment(&loan),
        payoff_month,
        months_saved: payoff_month.map_or(0, |month| horizon - month),
        total_interest: last.map_or(0.0, |record| record.total_interest),
        final_portfolio_value: portfolio_value.last().copied().unwrap_or(inv.investment_start),
    };
    let axis_bounds = axis_bounds(&loan, &portfolio_value);

    debug!(
        horizon,
        schedule_months = schedule.len(),
        y_max = axis_bounds.y_max,
        "projection recomputed"
    );

    Projection {
        months: (1..=horizon).collect(),
        outstanding_balance,
        portfolio_value,
        cumulative_interest,
        axis_bounds,
        summary,
    }
}

/// Chart bounds derived from the parameters: headroom above the larger of the
/// loan and the final portfolio, and a quarter of the term past the horizon.
pub fn axis_bounds(loan: &LoanParameters, portfolio_value: &[f64]) -> AxisBounds {
    let loan_ceiling = loan.principal * 1.1;
    let y_max = portfolio_value
        .last()
        .copied()
        .filter(|value| value.is_finite())
        .map_or(loan_ceiling, |value| value.max(loan_ceiling));
    let years = loan.loan_length_years;
    AxisBounds {
        y_max,
        x_max: years.saturating_add(years / 4).saturating_mul(12),
    }
}
