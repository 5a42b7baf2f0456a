//! Risk-based interest rate pricing
//!
//! Annual rate = policy base rate + credit risk premium + employment
//! adjustment + tenure adjustment, clamped to the product rate corridor.
//! The premium keys off the midpoint of the estimated score band.

use crate::profile::EmploymentStatus;
use crate::scoring::credit_score::CreditScoreBand;

/// Prices a loan from the credit band and applicant attributes
pub struct InterestRateCalculator;

impl InterestRateCalculator {
    /// Central bank repo rate, percent
    pub const REPO_RATE: f64 = 6.50;

    /// Bank spread over repo, percent
    pub const BANK_SPREAD: f64 = 4.40;

    /// Product floor rate, percent
    pub const MIN_RATE: f64 = 10.50;

    /// Product cap rate, percent
    pub const MAX_RATE: f64 = 18.00;

    /// Base lending rate before risk adjustments
    pub fn base_rate() -> f64 {
        Self::REPO_RATE + Self::BANK_SPREAD
    }

    /// Annual interest rate in percent, rounded to 2 decimals
    ///
    /// The approval probability is accepted for interface parity with the
    /// scoring pipeline; pricing is driven by the credit band alone.
    pub fn calculate(
        _approval_probability: f64,
        band: &CreditScoreBand,
        employment: EmploymentStatus,
        loan_duration_months: u32,
    ) -> f64 {
        let midpoint = band.midpoint();

        let risk_premium = if midpoint >= 800.0 {
            0.00
        } else if midpoint >= 750.0 {
            0.60
        } else if midpoint >= 700.0 {
            1.60
        } else if midpoint >= 650.0 {
            2.85
        } else if midpoint >= 600.0 {
            4.50
        } else {
            6.60
        };

        let employment_adjustment = match employment {
            EmploymentStatus::Employed => -0.25,
            EmploymentStatus::SelfEmployed => 0.50,
            EmploymentStatus::Unemployed => 1.00,
        };

        let tenure_adjustment = if loan_duration_months > 180 {
            0.50
        } else if loan_duration_months > 84 {
            0.25
        } else {
            0.0
        };

        let rate = Self::base_rate() + risk_premium + employment_adjustment + tenure_adjustment;
        let clamped = rate.clamp(Self::MIN_RATE, Self::MAX_RATE);
        (clamped * 100.0).round() / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::CreditRating;

    fn band(min: u16, max: u16, rating: CreditRating) -> CreditScoreBand {
        CreditScoreBand { min, max, rating }
    }

    #[test]
    fn test_base_rate_is_repo_plus_spread() {
        assert!((InterestRateCalculator::base_rate() - 10.90).abs() < 1e-9);
    }

    #[test]
    fn test_excellent_salaried_gets_floor_adjacent_rate() {
        // 10.90 + 0.00 - 0.25 = 10.65
        let rate = InterestRateCalculator::calculate(
            0.9,
            &band(800, 900, CreditRating::Excellent),
            EmploymentStatus::Employed,
            36,
        );
        assert!((rate - 10.65).abs() < 1e-9);
    }

    #[test]
    fn test_good_self_employed_long_tenure() {
        // midpoint 700: 10.90 + 1.60 + 0.50 + 0.25 = 13.25
        let rate = InterestRateCalculator::calculate(
            0.6,
            &band(680, 720, CreditRating::Good),
            EmploymentStatus::SelfEmployed,
            120,
        );
        assert!((rate - 13.25).abs() < 1e-9);
    }

    #[test]
    fn test_rate_is_capped() {
        // midpoint 450: 10.90 + 6.60 + 1.00 + 0.50 = 19.00 -> cap 18.00
        let rate = InterestRateCalculator::calculate(
            0.2,
            &band(400, 500, CreditRating::VeryPoor),
            EmploymentStatus::Unemployed,
            240,
        );
        assert!((rate - InterestRateCalculator::MAX_RATE).abs() < 1e-9);
    }

    #[test]
    fn test_rate_never_below_floor() {
        let rate = InterestRateCalculator::calculate(
            0.95,
            &band(880, 900, CreditRating::Excellent),
            EmploymentStatus::Employed,
            12,
        );
        assert!(rate >= InterestRateCalculator::MIN_RATE);
    }

    #[test]
    fn test_better_band_prices_cheaper() {
        let fair = InterestRateCalculator::calculate(
            0.5,
            &band(640, 680, CreditRating::Fair),
            EmploymentStatus::Employed,
            60,
        );
        let very_good = InterestRateCalculator::calculate(
            0.5,
            &band(740, 780, CreditRating::VeryGood),
            EmploymentStatus::Employed,
            60,
        );
        assert!(very_good < fair);
    }
}
