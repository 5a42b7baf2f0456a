//! Co-applicant recommendation and income blending
//!
//! A co-applicant is only suggested in the borderline probability band
//! where combined income can actually move the outcome. Supplementary
//! income is haircut before blending since the co-applicant carries their
//! own obligations.

use serde::{Deserialize, Serialize};

/// Whether to suggest adding a co-applicant, and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoApplicantRecommendation {
    /// True when a co-applicant is likely to improve the outcome
    pub suggested: bool,
    /// Operative reason, empty for clearly strong applications
    pub reason: String,
}

/// Evaluates co-applicant need and blends household income
pub struct CoApplicantEvaluator;

impl CoApplicantEvaluator {
    /// Fraction of co-applicant income counted towards repayment capacity
    pub const INCOME_WEIGHT: f64 = 0.7;

    /// Upper probability bound of the borderline band
    pub const STRONG_THRESHOLD: f64 = 0.75;

    /// Lower probability bound of the borderline band
    pub const VIABLE_THRESHOLD: f64 = 0.50;

    /// Decide whether the application would benefit from a co-applicant
    pub fn evaluate(
        probability: f64,
        monthly_emi: f64,
        monthly_income: f64,
        loan_amount: f64,
        annual_income: f64,
    ) -> CoApplicantRecommendation {
        let emi_ratio = if monthly_income > 0.0 {
            monthly_emi / monthly_income
        } else {
            1.0
        };
        let loan_ratio = if annual_income > 0.0 {
            loan_amount / annual_income
        } else {
            10.0
        };

        if probability >= Self::STRONG_THRESHOLD {
            return CoApplicantRecommendation {
                suggested: false,
                reason: String::new(),
            };
        }

        if probability >= Self::VIABLE_THRESHOLD {
            if emi_ratio > 0.40 {
                return CoApplicantRecommendation {
                    suggested: true,
                    reason: format!(
                        "EMI ({:.1}% of income) exceeds safe threshold (40%). \
                         Co-applicant can help reduce burden.",
                        emi_ratio * 100.0
                    ),
                };
            }
            if loan_ratio > 5.0 {
                return CoApplicantRecommendation {
                    suggested: true,
                    reason: format!(
                        "Loan amount is {loan_ratio:.1}x your annual income. \
                         Co-applicant can strengthen application."
                    ),
                };
            }
            return CoApplicantRecommendation {
                suggested: true,
                reason: "Your application is borderline. Adding a co-applicant may improve \
                         approval chances."
                    .to_string(),
            };
        }

        CoApplicantRecommendation {
            suggested: false,
            reason: "Application does not meet minimum criteria for co-applicant consideration."
                .to_string(),
        }
    }

    /// Household repayment income: applicant plus weighted co-applicant
    pub fn effective_income(applicant_monthly: f64, coapplicant_monthly: f64) -> f64 {
        applicant_monthly + Self::INCOME_WEIGHT * coapplicant_monthly
    }
}
