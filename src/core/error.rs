use thiserror::Error;

use super::types::{AllocationState, ChartArea, InvestmentParameters, LoanParameters};

pub const MAX_LOAN_LENGTH_YEARS: u32 = 100;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
    #[error("{field} must be > 0")]
    NotPositive { field: &'static str },
    #[error("{field} must be >= 0")]
    Negative { field: &'static str },
    #[error("{field} must be between 0 and 100")]
    PercentOutOfRange { field: &'static str },
    #[error("{field} must be between 1 and {max}")]
    YearsOutOfRange { field: &'static str, max: u32 },
    #[error("chart area must be finite with top <= bottom and left <= right")]
    InvalidChartArea,
}

fn finite(field: &'static str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ParameterError> {
    if finite(field, value)? < 0.0 {
        return Err(ParameterError::Negative { field });
    }
    Ok(())
}

impl LoanParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        if finite("principal", self.principal)? <= 0.0 {
            return Err(ParameterError::NotPositive { field: "principal" });
        }
        if !(1..=MAX_LOAN_LENGTH_YEARS).contains(&self.loan_length_years) {
            return Err(ParameterError::YearsOutOfRange {
                field: "loanLengthYears",
                max: MAX_LOAN_LENGTH_YEARS,
            });
        }
        non_negative("annualInterestRatePercent", self.annual_interest_rate_percent)?;
        non_negative("additionalPrincipal", self.additional_principal)
    }
}

impl InvestmentParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        non_negative("investmentStart", self.investment_start)?;
        non_negative("additionalInvestment", self.additional_investment)?;
        finite("annualROIPercent", self.annual_roi_percent)?;
        Ok(())
    }
}

impl AllocationState {
    pub fn validate(&self) -> Result<(), ParameterError> {
        non_negative("additionalPayment", self.additional_payment)?;
        non_negative("additionalPrincipal", self.additional_principal)?;
        non_negative("additionalInvestment", self.additional_investment)?;
        if let Some(percent) = self.investment_proportion_percent {
            if !(0.0..=100.0).contains(&finite("investmentProportion", percent)?) {
                return Err(ParameterError::PercentOutOfRange {
                    field: "investmentProportion",
                });
            }
        }
        Ok(())
    }
}

impl ChartArea {
    pub fn validate(&self) -> Result<(), ParameterError> {
        let edges = [self.top, self.bottom, self.left, self.right];
        if edges.iter().all(|v| v.is_finite()) && self.top <= self.bottom && self.left <= self.right
        {
            Ok(())
        } else {
            Err(ParameterError::InvalidChartArea)
        }
    }
}
