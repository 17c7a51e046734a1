use super::types::{LoanParameters, MonthlyRecord};

pub(crate) const MAX_PREALLOCATED_MONTHS: u32 = 1_200;

pub(crate) fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 12.0 / 100.0
}

/// Fixed monthly payment from the annuity formula, excluding additional principal.
pub fn fixed_monthly_payment(loan: &LoanParameters) -> f64 {
    let months = loan.total_months();
    if months == 0 {
        return 0.0;
    }
    let n = f64::from(months);
    let r = monthly_rate(loan.annual_interest_rate_percent);
    if r.abs() < 1e-12 {
        return loan.principal / n;
    }

    let growth = (1.0 + r).powf(n);
    let payment = loan.principal * (r * growth) / (growth - 1.0);
    if payment.is_finite() {
        payment
    } else {
        loan.principal / n
    }
}

/// Month-by-month schedule, stopping early once the balance is paid off.
///
/// The final month's principal is capped at the remaining balance, so the
/// cumulative principal never exceeds the amount borrowed.
pub fn compute_schedule(loan: &LoanParameters) -> Vec<MonthlyRecord> {
    let months = loan.total_months();
    let payment = fixed_monthly_payment(loan);
    let r = monthly_rate(loan.annual_interest_rate_percent);
    let extra = loan.additional_principal.max(0.0);

    let mut schedule = Vec::with_capacity(months.min(MAX_PREALLOCATED_MONTHS) as usize);
    let mut outstanding_balance = loan.principal;
    let mut total_interest = 0.0;
    let mut total_principal = 0.0;

    for month in 1..=months {
        let interest_paid = outstanding_balance * r;
        let principal_paid = (payment - interest_paid + extra).min(outstanding_balance);
        total_interest += interest_paid;
        total_principal += principal_paid;

        schedule.push(MonthlyRecord {
            month,
            current_interest: interest_paid,
            current_principal: principal_paid,
            net_payment: interest_paid + principal_paid,
            total_interest,
            total_principal,
        });

        outstanding_balance -= principal_paid;
        if outstanding_balance <= 0.0 {
            break;
        }
    }

    schedule
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_loan() -> LoanParameters {
        LoanParameters {
            principal: 1_000_000.0,
            loan_length_years: 30,
            annual_interest_rate_percent: 2.0,
            additional_principal: 0.0,
        }
    }

    #[test]
    fn thirty_year_two_percent_schedule_matches_standard_amortization() {
        let schedule = compute_schedule(&sample_loan());
        assert_eq!(schedule.len(), 360);

        let first = schedule[0];
        assert_eq!(first.month, 1);
        assert_approx_tol(first.current_interest, 1_666.67, 0.01);
        assert_approx_tol(first.net_payment, 3_696.19, 0.01);

        let last = schedule[schedule.len() - 1];
        assert_eq!(last.month, 360);
        assert_approx_tol(last.total_principal, 1_000_000.0, 1e-4);
        assert_approx_tol(last.total_interest, 3_696.194_726_888 * 360.0 - 1_000_000.0, 1e-3);
    }

    #[test]
    fn additional_principal_pays_off_early_without_overshoot() {
        let mut loan = sample_loan();
        loan.additional_principal = 1_000.0;
        let schedule = compute_schedule(&loan);

        assert_eq!(schedule.len(), 264);
        let last = schedule[schedule.len() - 1];
        assert_approx_tol(last.total_principal, loan.principal, 1e-6);
        assert!(last.current_principal < fixed_monthly_payment(&loan) + 1_000.0);
    }

    #[test]
    fn zero_rate_uses_straight_line_payment() {
        let mut loan = sample_loan();
        loan.principal = 36_000.0;
        loan.loan_length_years = 3;
        loan.annual_interest_rate_percent = 0.0;

        assert_eq!(fixed_monthly_payment(&loan), 1_000.0);
        let schedule = compute_schedule(&loan);
        assert_eq!(schedule.len(), 36);
        for record in &schedule {
            assert_eq!(record.current_interest, 0.0);
            assert_approx_tol(record.current_principal, 1_000.0, 1e-9);
            assert!(record.net_payment.is_finite());
        }
    }

    #[test]
    fn zero_length_loan_yields_empty_schedule() {
        let mut loan = sample_loan();
        loan.loan_length_years = 0;
        assert_eq!(fixed_monthly_payment(&loan), 0.0);
        assert!(compute_schedule(&loan).is_empty());
    }

    #[test]
    fn huge_extra_payment_clears_loan_in_first_month() {
        let mut loan = sample_loan();
        loan.additional_principal = 5_000_000.0;
        let schedule = compute_schedule(&loan);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].total_principal, loan.principal);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_schedule_totals_are_monotone_and_bounded(
            principal in 1_000u32..3_000_000,
            years in 1u32..41,
            rate_bp in 0u32..1500,
            extra in 0u32..5_000
        ) {
            let loan = LoanParameters {
                principal: principal as f64,
                loan_length_years: years,
                annual_interest_rate_percent: rate_bp as f64 / 100.0,
                additional_principal: extra as f64,
            };
            let schedule = compute_schedule(&loan);
            prop_assert!(!schedule.is_empty());
            prop_assert!(schedule.len() <= (years * 12) as usize);

            let mut prev_interest = 0.0;
            let mut prev_principal = 0.0;
            for (idx, record) in schedule.iter().enumerate() {
                prop_assert_eq!(record.month, idx as u32 + 1);
                prop_assert!(record.total_interest.is_finite());
                prop_assert!(record.total_interest >= prev_interest);
                prop_assert!(record.total_principal >= prev_principal);
                prev_interest = record.total_interest;
                prev_principal = record.total_principal;
            }

            let last = schedule[schedule.len() - 1];
            prop_assert!(last.total_principal <= loan.principal * (1.0 + 1e-12));
            prop_assert!(loan.principal - last.total_principal >= -1e-6);
        }
    }
}
