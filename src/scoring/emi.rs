//! Equated monthly installment amortization
//!
//! Standard reducing-balance EMI: P * r * (1+r)^n / ((1+r)^n - 1) with r the
//! monthly rate. Totals are derived from the unrounded installment so the
//! rounding error does not compound across the schedule.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Amortization summary for one loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmiSchedule {
    /// Monthly installment, rounded to 2 decimals
    pub monthly_emi: f64,
    /// Interest paid over the full term
    pub total_interest: f64,
    /// Principal plus interest over the full term
    pub total_repayment: f64,
    /// Financed principal
    pub principal: f64,
    /// Annual rate in percent
    pub annual_rate: f64,
    /// Term in months
    pub duration_months: u32,
}

/// Compute the EMI schedule for a loan
///
/// A zero rate degenerates to straight-line principal repayment.
pub fn calculate_emi(
    principal: f64,
    annual_rate: f64,
    duration_months: u32,
) -> Result<EmiSchedule, EngineError> {
    if !(principal > 0.0) {
        return Err(EngineError::validation(
            "loan_amount",
            format!("principal must be positive, got {principal}"),
        ));
    }
    if duration_months == 0 {
        return Err(EngineError::validation(
            "loan_duration_months",
            "duration must be at least 1 month".to_string(),
        ));
    }
    if annual_rate < 0.0 {
        return Err(EngineError::validation(
            "annual_rate",
            format!("rate must not be negative, got {annual_rate}"),
        ));
    }

    let months = f64::from(duration_months);
    let monthly_rate = annual_rate / (12.0 * 100.0);

    let emi = if monthly_rate == 0.0 {
        principal / months
    } else {
        let growth = (1.0 + monthly_rate).powi(duration_months as i32);
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let total_repayment = emi * months;
    let total_interest = total_repayment - principal;

    Ok(EmiSchedule {
        monthly_emi: round2(emi),
        total_interest: round2(total_interest),
        total_repayment: round2(total_repayment),
        principal,
        annual_rate,
        duration_months,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
