//! Lightweight eligibility prescreen
//!
//! A model-only screen for channel frontends: probability thresholds map
//! straight to a status, and the factors are simple profile checks rather
//! than attribution. No pricing, amortization or rule cascade. Without a
//! trained model the prescreen abstains to manual review instead of
//! guessing.

use log::warn;
use serde::Serialize;

use crate::decision::ExplanationFactor;
use crate::error::EngineError;
use crate::profile::{ApplicantProfile, ApplicationRequest, Decision, HomeOwnership, Impact};

use super::analysis::{LoanAdvisor, ScoringStrategy};

/// Score at or above which the prescreen approves, percent
const APPROVE_THRESHOLD: f64 = 75.0;

/// Score at or above which the prescreen refers to review, percent
const REVIEW_THRESHOLD: f64 = 45.0;

/// Prescreen verdict for one application
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningOutcome {
    pub status: Decision,
    /// Model score in percent, 2 decimals
    pub confidence: f64,
    pub decision_factors: Vec<ExplanationFactor>,
    pub recommendation: String,
}

impl LoanAdvisor {
    /// Screen an application without pricing it
    ///
    /// Validation errors propagate; inference errors degrade to a manual
    /// review outcome so the channel always gets an answer.
    pub fn prescreen(&self, request: &ApplicationRequest) -> Result<ScreeningOutcome, EngineError> {
        let profile = request.to_profile()?;

        let (model, encoder) = match &self.strategy {
            ScoringStrategy::ModelBacked { model, encoder } => (model, encoder),
            ScoringStrategy::RuleBased => {
                return Ok(ScreeningOutcome {
                    status: Decision::PendingReview,
                    confidence: 50.0,
                    decision_factors: vec![ExplanationFactor {
                        factor: "System".to_string(),
                        impact: Impact::Neutral,
                        description: "Model not available".to_string(),
                        weight: 0.0,
                    }],
                    recommendation: "Application requires manual review".to_string(),
                });
            }
        };

        let probability = match encoder
            .encode(&profile, &model.feature_names)
            .and_then(|features| model.probability(&features))
        {
            Ok(probability) => probability,
            Err(err) => {
                warn!("prescreen inference failed: {err}");
                return Ok(ScreeningOutcome {
                    status: Decision::PendingReview,
                    confidence: 50.0,
                    decision_factors: vec![ExplanationFactor {
                        factor: "Error".to_string(),
                        impact: Impact::Negative,
                        description: err.to_string(),
                        weight: 0.0,
                    }],
                    recommendation: "Application requires manual review due to processing error"
                        .to_string(),
                });
            }
        };

        let score = probability * 100.0;
        let status = if score >= APPROVE_THRESHOLD {
            Decision::Approved
        } else if score >= REVIEW_THRESHOLD {
            Decision::PendingReview
        } else {
            Decision::Rejected
        };

        Ok(ScreeningOutcome {
            status,
            confidence: round2(score),
            decision_factors: screening_factors(&profile),
            recommendation: recommendation(status, score),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn recommendation(status: Decision, score: f64) -> String {
    match status {
        Decision::Approved => format!(
            "Congratulations! Your loan application is approved with {score:.1}% confidence. \
             Please complete the KYC process to proceed."
        ),
        Decision::PendingReview => format!(
            "Your application ({score:.1}% score) requires additional review. A loan officer \
             will assess your application within 24-48 hours."
        ),
        Decision::Rejected => "We regret to inform you that your application could not be \
                               approved at this time. Consider improving your credit score or \
                               reducing the loan amount."
            .to_string(),
    }
}

/// Five fixed profile checks, one factor each
fn screening_factors(profile: &ApplicantProfile) -> Vec<ExplanationFactor> {
    let mut factors = Vec::with_capacity(5);

    let score = profile.credit_score_or_default();
    factors.push(if score >= 750 {
        factor(
            "Credit Score",
            Impact::Positive,
            format!("Excellent credit score ({score})"),
            0.25,
        )
    } else if score >= 650 {
        factor(
            "Credit Score",
            Impact::Positive,
            format!("Good credit score ({score})"),
            0.15,
        )
    } else {
        factor(
            "Credit Score",
            Impact::Negative,
            format!("Low credit score ({score})"),
            0.20,
        )
    });

    let annual_income = profile.annual_income();
    let loan_ratio = if annual_income > 0.0 {
        profile.loan_amount / annual_income
    } else {
        1.0
    };
    factors.push(if loan_ratio <= 0.3 {
        factor(
            "Income Ratio",
            Impact::Positive,
            "Loan amount is well within income capacity".to_string(),
            0.20,
        )
    } else if loan_ratio <= 0.5 {
        factor(
            "Income Ratio",
            Impact::Neutral,
            "Moderate loan-to-income ratio".to_string(),
            0.05,
        )
    } else {
        factor(
            "Income Ratio",
            Impact::Negative,
            "High loan-to-income ratio".to_string(),
            0.15,
        )
    });

    factors.push(if profile.experience_years >= 5 {
        factor(
            "Work Experience",
            Impact::Positive,
            format!("{} years of experience", profile.experience_years),
            0.10,
        )
    } else if profile.experience_years >= 2 {
        factor(
            "Work Experience",
            Impact::Neutral,
            format!("{} years of experience", profile.experience_years),
            0.03,
        )
    } else {
        factor(
            "Work Experience",
            Impact::Negative,
            "Limited work experience".to_string(),
            0.08,
        )
    });

    factors.push(if profile.previous_defaults {
        factor(
            "Payment History",
            Impact::Negative,
            "Previous loan defaults on record".to_string(),
            0.25,
        )
    } else {
        factor(
            "Payment History",
            Impact::Positive,
            "No previous defaults".to_string(),
            0.15,
        )
    });

    factors.push(match profile.home_ownership {
        HomeOwnership::Own => factor(
            "Home Ownership",
            Impact::Positive,
            "Owns home (asset security)".to_string(),
            0.10,
        ),
        HomeOwnership::Mortgage => factor(
            "Home Ownership",
            Impact::Neutral,
            "Has mortgage (existing liability)".to_string(),
            0.02,
        ),
        HomeOwnership::Rent | HomeOwnership::Other => factor(
            "Home Ownership",
            Impact::Neutral,
            "Renting residence".to_string(),
            0.0,
        ),
    });

    factors
}

fn factor(name: &str, impact: Impact, description: String, weight: f64) -> ExplanationFactor {
    ExplanationFactor {
        factor: name.to_string(),
        impact,
        description,
        weight,
    }
}
