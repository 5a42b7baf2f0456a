//! Feature attribution and heuristic explanations
//!
//! Two paths produce the same factor shape. When the model scored the
//! application, per-feature logit contributions are translated into ranked,
//! human-readable factors. When the scorecard decided, a fixed heuristic
//! set is derived from the profile instead.

use serde::{Deserialize, Serialize};

use crate::model::FeatureEncoder;
use crate::profile::{ApplicantProfile, EducationLevel, EmploymentStatus, HomeOwnership, Impact};

/// One ranked factor behind a decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplanationFactor {
    /// Display name of the driver
    pub factor: String,
    /// Direction of the contribution
    pub impact: Impact,
    /// One-sentence narrative
    pub description: String,
    /// Contribution magnitude, larger means more influential
    pub weight: f64,
}

/// Builds explanation factors for both scoring paths
pub struct ExplanationGenerator;

impl ExplanationGenerator {
    /// Contributions below this magnitude are treated as noise
    const ATTRIBUTION_THRESHOLD: f64 = 0.0001;

    /// Maximum factors reported from model attribution
    const MAX_ATTRIBUTED: usize = 8;

    /// Maximum factors reported from the heuristic path
    const MAX_HEURISTIC: usize = 6;

    /// Translate model attribution into ranked factors
    ///
    /// `weights` is aligned with `feature_names`. Descriptions quote the
    /// applicant's own figures, not the encoded values.
    pub fn from_attribution(
        weights: &[f64],
        feature_names: &[String],
        encoder: &FeatureEncoder,
        profile: &ApplicantProfile,
    ) -> Vec<ExplanationFactor> {
        let mut material: Vec<(&String, f64)> = feature_names
            .iter()
            .zip(weights.iter().copied())
            .filter(|(_, weight)| weight.abs() > Self::ATTRIBUTION_THRESHOLD)
            .collect();

        if material.is_empty() {
            // nothing cleared the noise floor, report the strongest raw signals
            let mut all: Vec<(&String, f64)> =
                feature_names.iter().zip(weights.iter().copied()).collect();
            all.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
            return all
                .into_iter()
                .take(5)
                .map(|(name, weight)| ExplanationFactor {
                    factor: name.clone(),
                    impact: impact_of(weight),
                    description: "Contributing factor".to_string(),
                    weight: round6(weight.abs()),
                })
                .collect();
        }

        material.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        material
            .into_iter()
            .take(Self::MAX_ATTRIBUTED)
            .map(|(name, weight)| ExplanationFactor {
                factor: display_name(name, encoder),
                impact: impact_of(weight),
                description: feature_description(name, weight, profile),
                weight: round6(weight.abs()),
            })
            .collect()
    }

    /// Derive factors from the profile alone
    pub fn from_profile(profile: &ApplicantProfile) -> Vec<ExplanationFactor> {
        let mut factors = Vec::new();

        if profile.monthly_income >= 75_000.0 {
            factors.push(ExplanationFactor {
                factor: "Strong Income".to_string(),
                impact: Impact::Positive,
                description: format!(
                    "Monthly income of Rs. {} demonstrates strong repayment capacity",
                    format_amount(profile.monthly_income)
                ),
                weight: 0.35,
            });
        } else if profile.monthly_income < 25_000.0 {
            factors.push(ExplanationFactor {
                factor: "Limited Income".to_string(),
                impact: Impact::Negative,
                description: format!(
                    "Monthly income of Rs. {} may limit loan eligibility",
                    format_amount(profile.monthly_income)
                ),
                weight: 0.30,
            });
        }

        let debt_to_income = profile.debt_to_income();
        if debt_to_income < 0.25 {
            factors.push(ExplanationFactor {
                factor: "Low Debt Burden".to_string(),
                impact: Impact::Positive,
                description: format!(
                    "Debt-to-income ratio of {:.1}% indicates healthy financial management",
                    debt_to_income * 100.0
                ),
                weight: 0.25,
            });
        } else if debt_to_income > 0.40 {
            factors.push(ExplanationFactor {
                factor: "High Debt Burden".to_string(),
                impact: Impact::Negative,
                description: format!(
                    "Debt-to-income ratio of {:.1}% exceeds recommended threshold",
                    debt_to_income * 100.0
                ),
                weight: 0.28,
            });
        }

        if profile.employment == EmploymentStatus::Employed && profile.job_tenure_years >= 2 {
            factors.push(ExplanationFactor {
                factor: "Stable Employment".to_string(),
                impact: Impact::Positive,
                description: format!(
                    "Employed with {} years at current job shows stability",
                    profile.job_tenure_years
                ),
                weight: 0.20,
            });
        } else if profile.employment == EmploymentStatus::Unemployed {
            factors.push(ExplanationFactor {
                factor: "Employment Status".to_string(),
                impact: Impact::Negative,
                description: "Currently not employed - income verification required".to_string(),
                weight: 0.45,
            });
        }

        let annual_income = profile.annual_income();
        let loan_ratio = if annual_income > 0.0 {
            profile.loan_amount / annual_income
        } else {
            10.0
        };
        if loan_ratio < 3.0 {
            factors.push(ExplanationFactor {
                factor: "Conservative Loan Request".to_string(),
                impact: Impact::Positive,
                description: format!(
                    "Loan amount is {loan_ratio:.1}x annual income - within safe limits"
                ),
                weight: 0.18,
            });
        } else if loan_ratio > 6.0 {
            factors.push(ExplanationFactor {
                factor: "High Loan Amount".to_string(),
                impact: Impact::Negative,
                description: format!(
                    "Loan amount is {loan_ratio:.1}x annual income - above recommended limits"
                ),
                weight: 0.22,
            });
        }

        if profile.home_ownership == HomeOwnership::Own {
            factors.push(ExplanationFactor {
                factor: "Property Owner".to_string(),
                impact: Impact::Positive,
                description: "Home ownership provides collateral security".to_string(),
                weight: 0.15,
            });
        }

        if matches!(
            profile.education,
            EducationLevel::PhD | EducationLevel::Master | EducationLevel::Bachelor
        ) {
            factors.push(ExplanationFactor {
                factor: "Educational Background".to_string(),
                impact: Impact::Positive,
                description: format!(
                    "{} qualification indicates career growth potential",
                    profile.education.model_value()
                ),
                weight: 0.12,
            });
        }

        if profile.dependents >= 4 {
            factors.push(ExplanationFactor {
                factor: "High Dependents".to_string(),
                impact: Impact::Negative,
                description: format!(
                    "{} dependents increase monthly financial obligations",
                    profile.dependents
                ),
                weight: 0.10,
            });
        }

        factors.truncate(Self::MAX_HEURISTIC);
        factors
    }
}

fn impact_of(weight: f64) -> Impact {
    if weight > 0.0 {
        Impact::Positive
    } else {
        Impact::Negative
    }
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

/// Readable factor name for an encoded feature
///
/// One-hot features render as "column: category", numeric features just
/// swap underscores for spaces.
fn display_name(feature_name: &str, encoder: &FeatureEncoder) -> String {
    if let Some((column, category)) = encoder.split_feature(feature_name) {
        format!("{}: {category}", column.replace('_', " "))
    } else {
        feature_name.replace('_', " ")
    }
}

/// Narrative line for a feature, quoting the applicant's raw figures
fn feature_description(feature_name: &str, weight: f64, profile: &ApplicantProfile) -> String {
    let verb = if weight > 0.0 { "increases" } else { "decreases" };

    if feature_name.contains("person_income") {
        format!(
            "Annual income of Rs. {} {verb} repayment capacity assessment.",
            format_amount(profile.annual_income())
        )
    } else if feature_name.contains("loan_amnt") {
        format!(
            "Requested loan of Rs. {} {verb} debt-to-ratio stress level.",
            format_amount(profile.loan_amount)
        )
    } else if feature_name.contains("credit_score") {
        format!(
            "Credit Score of {} {verb} creditworthiness confidence.",
            profile.credit_score_or_default()
        )
    } else if feature_name.contains("person_emp_exp") {
        format!(
            "Employment vintage of {} years {verb} career stability index.",
            profile.experience_years
        )
    } else if feature_name.contains("loan_percent_income") {
        format!("EMI-to-Income impact {verb} debt serviceability.")
    } else if feature_name.contains("cb_person_cred_hist_length") {
        format!(
            "Credit history record of {:.1} years {verb} reliability rating.",
            profile.credit_history_years()
        )
    } else if feature_name.contains("previous_loan_defaults") {
        format!("Past repayment behavior {verb} integrity assessment.")
    } else {
        format!(
            "Financial parameter '{}' {verb} risk-weightage.",
            feature_name.replace('_', " ")
        )
    }
}

/// Comma-grouped whole-rupee rendering
fn format_amount(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
