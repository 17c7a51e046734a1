use super::types::{AllocationSource, AllocationState};

impl AllocationState {
    /// Budget with everything routed to extra principal.
    pub fn new(additional_payment: f64) -> Self {
        let mut state = Self {
            additional_payment: additional_payment.max(0.0),
            additional_principal: 0.0,
            additional_investment: 0.0,
            investment_proportion_percent: None,
        };
        state.set_from_proportion(0.0);
        state
    }

    /// Proportion is `None` when the budget is zero.
    pub fn with_proportion(additional_payment: f64, investment_percent: f64) -> Self {
        let mut state = Self::new(additional_payment);
        state.set_from_proportion(investment_percent);
        state
    }

    /// Apply an edit to one absolute amount and rebalance the other side.
    ///
    /// The edited amount is clamped into `0..=additional_payment` so both sides
    /// stay non-negative.
    pub fn set_from_absolute(&mut self, source: AllocationSource, amount: f64) {
        let edited = amount.clamp(0.0, self.additional_payment);
        let other = self.additional_payment - edited;
        match source {
            AllocationSource::Principal => {
                self.additional_principal = edited;
                self.additional_investment = other;
            }
            AllocationSource::Investment => {
                self.additional_investment = edited;
                self.additional_principal = other;
            }
        }
        self.investment_proportion_percent = self.derived_proportion();
    }

    pub fn set_from_proportion(&mut self, investment_percent: f64) {
        let percent = investment_percent.clamp(0.0, 100.0);
        self.additional_principal = self.additional_payment * (100.0 - percent) / 100.0;
        self.additional_investment = self.additional_payment - self.additional_principal;
        self.investment_proportion_percent = if self.additional_payment > 0.0 {
            Some(percent)
        } else {
            None
        };
    }

    /// Change the combined budget, keeping the current split ratio.
    pub fn set_additional_payment(&mut self, additional_payment: f64) {
        let percent = self.investment_proportion_percent.unwrap_or(0.0);
        self.additional_payment = additional_payment.max(0.0);
        self.set_from_proportion(percent);
    }

    fn derived_proportion(&self) -> Option<f64> {
        if self.additional_payment > 0.0 {
            Some(self.additional_investment / self.additional_payment * 100.0)
        } else {
            None
        }
    }
}
