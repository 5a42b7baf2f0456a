//! Analysis report assembly
//!
//! The serialized shape returned to callers: decision, probabilities, credit
//! band, pricing, amortization, income ratios, co-applicant guidance,
//! explanations and the channel next steps. Percentages are reported on the
//! 0-100 scale.

use serde::Serialize;

use crate::decision::ExplanationFactor;
use crate::profile::{ApplicantProfile, CreditRating, Decision, EmploymentStatus};
use crate::scoring::jitter;

/// Credit band section of the report
#[derive(Debug, Clone, Serialize)]
pub struct CreditScoreSummary {
    pub min: u16,
    pub max: u16,
    pub rating: CreditRating,
    /// "min-max" rendering of the band
    pub display: String,
}

/// Pricing section of the report
#[derive(Debug, Clone, Serialize)]
pub struct InterestRateSummary {
    /// Annual rate in percent
    pub annual: f64,
    /// Monthly rate in percent, 3 decimals
    pub monthly: f64,
}

/// Amortization section, whole-rupee figures
#[derive(Debug, Clone, Serialize)]
pub struct EmiSummary {
    pub monthly: f64,
    pub total_interest: f64,
    pub total_repayment: f64,
}

/// Echo of the requested loan terms
#[derive(Debug, Clone, Serialize)]
pub struct LoanDetails {
    pub amount: f64,
    pub duration_months: u32,
    pub duration_years: f64,
}

/// Income ratio section, percentages on the 0-100 scale
#[derive(Debug, Clone, Serialize)]
pub struct IncomeAnalysis {
    pub monthly_income: f64,
    pub annual_income: f64,
    pub debt_to_income_ratio: f64,
    pub emi_to_income_ratio: f64,
}

/// Co-applicant section of the report
#[derive(Debug, Clone, Serialize)]
pub struct CoApplicantSummary {
    pub suggested: bool,
    pub reason: String,
    /// True when the request already carried co-applicant income
    pub provided: bool,
}

/// Full analysis report for one application
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    /// ISO-8601 timestamp of the evaluation
    pub application_date: String,
    pub decision: Decision,
    pub decision_reason: String,
    /// Customer-facing score after presentation shaping
    pub approval_probability: f64,
    /// Raw model probability in percent
    pub ml_probability: f64,
    pub credit_score: CreditScoreSummary,
    pub interest_rate: InterestRateSummary,
    pub emi: EmiSummary,
    pub loan_details: LoanDetails,
    pub income_analysis: IncomeAnalysis,
    pub coapplicant: CoApplicantSummary,
    pub explanations: Vec<ExplanationFactor>,
    /// KYC is only triggered by an approval
    pub kyc_required: bool,
    pub next_steps: Vec<String>,
}

/// Channel instructions per decision
pub fn next_steps(decision: Decision) -> Vec<String> {
    let steps: &[&str] = match decision {
        Decision::Approved => &[
            "Proceed with E-KYC using Aadhaar-linked OTP.",
            "Upload Form-16 and 3 months' bank statement for credit audit.",
            "E-sign the Digitized Loan Agreement (DLA) via Protean/NSDL.",
            "Final disbursement to designated Savings Account within 4 working hours.",
        ],
        Decision::PendingReview => &[
            "Case referred to Centralized Processing Cell (CPC) for manual appraisal.",
            "Keep original salary slips and employment ID ready for physical verification.",
            "A Credit Officer may visit your residence/office for verification.",
            "Final decision will be communicated via SMS/Email within 48-72 hours.",
        ],
        Decision::Rejected => &[
            "Review Credit Information Report (CIR) from CIBIL/Experian for discrepancies.",
            "Reduce existing credit card utilization below 30% to improve score.",
            "Regularize any overdue payments in existing loan accounts.",
            "Re-apply after 6 months with improved financial credentials.",
        ],
    };
    steps.iter().map(|step| (*step).to_string()).collect()
}

/// Customer-facing score on the 0-100 scale
///
/// Starts from the model probability, nudges for visible strengths and
/// weaknesses, adds a small per-applicant presentation offset, caps
/// stressed applications at 35 and clamps to the published band. Never
/// shows 0 or 100.
pub(crate) fn presentation_score(
    probability: f64,
    profile: &ApplicantProfile,
    emi_to_income: f64,
) -> f64 {
    let mut score = probability * 100.0;

    if profile.employment == EmploymentStatus::Employed && profile.job_tenure_years >= 3 {
        score += 1.5;
    }

    let debt_to_income = profile.debt_to_income();
    if debt_to_income < 0.25 {
        score += 1.0;
    } else if debt_to_income > 0.45 {
        score -= 2.0;
    }

    score += jitter::display_jitter(profile.monthly_income, profile.loan_amount, profile.age);

    if emi_to_income > 0.55 {
        score = score.min(35.0);
    }

    round1(score.clamp(10.2, 97.8))
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
