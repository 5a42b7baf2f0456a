//! Rule-based approval probability
//!
//! Deterministic scorecard used when no trained model artifact is on disk,
//! and as the recovery path when model inference fails. Starts from a
//! neutral base and shifts by loan burden, debt load, employment, tenure,
//! housing, education and income level.

use crate::profile::{ApplicantProfile, EducationLevel, EmploymentStatus, HomeOwnership};

/// Probability floor of the scorecard
const MIN_PROBABILITY: f64 = 0.10;

/// Probability ceiling of the scorecard
const MAX_PROBABILITY: f64 = 0.98;

/// Score an application without a trained model
pub fn rule_based_probability(profile: &ApplicantProfile) -> f64 {
    let mut probability: f64 = 0.65;

    let annual_income = profile.annual_income();
    let loan_to_income = if annual_income > 0.0 {
        profile.loan_amount / annual_income
    } else {
        10.0
    };
    probability += if loan_to_income <= 1.0 {
        0.20
    } else if loan_to_income <= 2.0 {
        0.15
    } else if loan_to_income <= 3.0 {
        0.10
    } else if loan_to_income <= 4.0 {
        0.05
    } else if loan_to_income <= 5.0 {
        0.00
    } else if loan_to_income <= 6.0 {
        -0.10
    } else {
        -0.25
    };

    let debt_to_income = profile.debt_to_income();
    probability += if debt_to_income <= 0.15 {
        0.15
    } else if debt_to_income <= 0.25 {
        0.10
    } else if debt_to_income <= 0.35 {
        0.05
    } else if debt_to_income <= 0.45 {
        -0.05
    } else {
        -0.20
    };

    probability += match profile.employment {
        EmploymentStatus::Employed => 0.10,
        EmploymentStatus::SelfEmployed => 0.05,
        EmploymentStatus::Unemployed => -0.35,
    };

    probability += if profile.job_tenure_years >= 5 {
        0.10
    } else if profile.job_tenure_years >= 3 {
        0.07
    } else if profile.job_tenure_years >= 2 {
        0.05
    } else if profile.job_tenure_years >= 1 {
        0.02
    } else {
        -0.05
    };

    probability += match profile.home_ownership {
        HomeOwnership::Own => 0.08,
        HomeOwnership::Mortgage => 0.03,
        HomeOwnership::Rent | HomeOwnership::Other => 0.0,
    };

    probability += match profile.education {
        EducationLevel::PhD | EducationLevel::Master => 0.05,
        EducationLevel::Bachelor => 0.03,
        EducationLevel::Associate | EducationLevel::HighSchool => 0.0,
    };

    probability += if profile.monthly_income >= 100_000.0 {
        0.10
    } else if profile.monthly_income >= 75_000.0 {
        0.07
    } else if profile.monthly_income >= 50_000.0 {
        0.05
    } else if profile.monthly_income >= 30_000.0 {
        0.02
    } else {
        0.0
    };

    probability.clamp(MIN_PROBABILITY, MAX_PROBABILITY)
}
