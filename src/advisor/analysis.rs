//! Application analysis orchestration
//!
//! `LoanAdvisor` wires the pipeline together: validate, band the credit
//! score, score approval probability, price the loan, amortize, weigh a
//! co-applicant, run the decision cascade and assemble the report. The
//! scoring strategy is injected so deployments without a trained model run
//! the deterministic scorecard instead.

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use log::{info, warn};

use crate::decision::{DecisionEngine, ExplanationFactor, ExplanationGenerator};
use crate::error::EngineError;
use crate::model::{ApprovalModel, FeatureEncoder, ScoringArtifacts, DEFAULT_MODEL_DIR};
use crate::profile::{ApplicantProfile, ApplicationRequest, Decision};
use crate::scoring::{
    calculate_emi, rule_based_probability, CoApplicantEvaluator, CreditScoreEstimator,
    InterestRateCalculator,
};

use super::report::{
    self, AnalysisResult, CoApplicantSummary, CreditScoreSummary, EmiSummary, IncomeAnalysis,
    InterestRateSummary, LoanDetails,
};

/// Probability multiplier applied when co-applicant income is present
const COAPPLICANT_PROBABILITY_BOOST: f64 = 1.15;

/// Ceiling for the boosted probability
const BOOSTED_PROBABILITY_CAP: f64 = 0.95;

/// How approval probability is computed
pub enum ScoringStrategy {
    /// Trained classifier plus its fitted encoder
    ModelBacked {
        model: ApprovalModel,
        encoder: FeatureEncoder,
    },
    /// Deterministic scorecard, no artifacts required
    RuleBased,
}

/// Probability with the attribution that produced it, when available
pub(crate) struct ScoredApplication {
    pub probability: f64,
    pub attribution: Option<Vec<f64>>,
}

impl ScoringStrategy {
    /// Score a profile, falling back to the scorecard on inference errors
    pub(crate) fn score(&self, profile: &ApplicantProfile) -> ScoredApplication {
        match self {
            ScoringStrategy::ModelBacked { model, encoder } => {
                let inference = encoder
                    .encode(profile, &model.feature_names)
                    .and_then(|features| {
                        let probability = model.probability(&features)?;
                        let attribution = model.attribution(&features)?;
                        Ok((probability, attribution))
                    });
                match inference {
                    Ok((probability, attribution)) => ScoredApplication {
                        probability,
                        attribution: Some(attribution),
                    },
                    Err(err) => {
                        warn!("model inference failed, using rule-based scorecard: {err}");
                        ScoredApplication {
                            probability: rule_based_probability(profile),
                            attribution: None,
                        }
                    }
                }
            }
            ScoringStrategy::RuleBased => ScoredApplication {
                probability: rule_based_probability(profile),
                attribution: None,
            },
        }
    }

    /// Explanations matching the path that actually scored the application
    pub(crate) fn explain(
        &self,
        scored: &ScoredApplication,
        profile: &ApplicantProfile,
    ) -> Vec<ExplanationFactor> {
        match (self, &scored.attribution) {
            (ScoringStrategy::ModelBacked { model, encoder }, Some(weights)) => {
                ExplanationGenerator::from_attribution(
                    weights,
                    &model.feature_names,
                    encoder,
                    profile,
                )
            }
            _ => ExplanationGenerator::from_profile(profile),
        }
    }
}

/// End-to-end application evaluator
pub struct LoanAdvisor {
    pub(crate) strategy: ScoringStrategy,
}

impl LoanAdvisor {
    /// Build an advisor with an explicit scoring strategy
    pub fn new(strategy: ScoringStrategy) -> Self {
        Self { strategy }
    }

    /// Load artifacts from a directory, degrading to the scorecard when
    /// they are missing or unreadable
    pub fn from_artifact_dir(path: &Path) -> Self {
        match ScoringArtifacts::load_from(path) {
            Ok(artifacts) => {
                info!(
                    "loaded {} with {} features",
                    artifacts.model.model_type,
                    artifacts.model.feature_names.len()
                );
                Self::new(ScoringStrategy::ModelBacked {
                    model: artifacts.model,
                    encoder: artifacts.encoder,
                })
            }
            Err(err) => {
                warn!("scoring artifacts unavailable, using rule-based scorecard: {err}");
                Self::new(ScoringStrategy::RuleBased)
            }
        }
    }

    /// Load artifacts from the default directory
    pub fn from_default_artifacts() -> Self {
        Self::from_artifact_dir(Path::new(DEFAULT_MODEL_DIR))
    }

    /// True when a trained model is scoring applications
    pub fn is_model_backed(&self) -> bool {
        matches!(self.strategy, ScoringStrategy::ModelBacked { .. })
    }

    /// Evaluate one application end to end
    pub fn analyze(&self, request: &ApplicationRequest) -> Result<AnalysisResult, EngineError> {
        let profile = request.to_profile()?;
        let application_date = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let band = CreditScoreEstimator::estimate(&profile);
        let scored = self.strategy.score(&profile);

        let annual_rate = InterestRateCalculator::calculate(
            scored.probability,
            &band,
            profile.employment,
            profile.loan_duration_months,
        );
        let schedule = calculate_emi(profile.loan_amount, annual_rate, profile.loan_duration_months)?;

        let mut emi_to_income = if profile.monthly_income > 0.0 {
            schedule.monthly_emi / profile.monthly_income
        } else {
            1.0
        };

        let annual_income = profile.annual_income();
        let recommendation = CoApplicantEvaluator::evaluate(
            scored.probability,
            schedule.monthly_emi,
            profile.monthly_income,
            profile.loan_amount,
            annual_income,
        );

        // declared co-applicant income relieves the EMI burden and lifts
        // the probability, capped well short of certainty
        let coapplicant_provided = profile.coapplicant_income > 0.0;
        let mut probability = scored.probability;
        if coapplicant_provided {
            let effective = CoApplicantEvaluator::effective_income(
                profile.monthly_income,
                profile.coapplicant_income,
            );
            emi_to_income = if effective > 0.0 {
                schedule.monthly_emi / effective
            } else {
                1.0
            };
            probability = (probability * COAPPLICANT_PROBABILITY_BOOST).min(BOOSTED_PROBABILITY_CAP);
        }

        let loan_to_income = if annual_income > 0.0 {
            profile.loan_amount / annual_income
        } else {
            10.0
        };

        let outcome = DecisionEngine::decide(
            probability,
            emi_to_income,
            band.rating,
            profile.loan_duration_months,
            loan_to_income,
            &profile,
        );

        let explanations = self.strategy.explain(&scored, &profile);
        let approval_probability = report::presentation_score(probability, &profile, emi_to_income);

        Ok(AnalysisResult {
            application_date,
            decision: outcome.decision,
            decision_reason: outcome.reason,
            approval_probability,
            ml_probability: report::round1(probability * 100.0),
            credit_score: CreditScoreSummary {
                min: band.min,
                max: band.max,
                rating: band.rating,
                display: band.display(),
            },
            interest_rate: InterestRateSummary {
                annual: annual_rate,
                monthly: report::round3(annual_rate / 12.0),
            },
            emi: EmiSummary {
                monthly: schedule.monthly_emi.round(),
                total_interest: schedule.total_interest.round(),
                total_repayment: schedule.total_repayment.round(),
            },
            loan_details: LoanDetails {
                amount: profile.loan_amount,
                duration_months: profile.loan_duration_months,
                duration_years: f64::from(profile.loan_duration_months) / 12.0,
            },
            income_analysis: IncomeAnalysis {
                monthly_income: profile.monthly_income,
                annual_income,
                debt_to_income_ratio: report::round1(profile.debt_to_income() * 100.0),
                emi_to_income_ratio: report::round1(emi_to_income * 100.0),
            },
            coapplicant: CoApplicantSummary {
                suggested: recommendation.suggested,
                reason: recommendation.reason,
                provided: coapplicant_provided,
            },
            explanations,
            kyc_required: outcome.decision == Decision::Approved,
            next_steps: report::next_steps(outcome.decision),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CategoricalEncoding, NumericScaler};
    use crate::profile::{
        EducationLevel, EmploymentStatus, Gender, HomeOwnership, LoanPurpose, MaritalStatus,
    };

    fn request(
        monthly_income: f64,
        loan_amount: f64,
        duration: u32,
        credit_score: Option<u16>,
        coapplicant_income: f64,
    ) -> ApplicationRequest {
        ApplicationRequest {
            age: 32,
            employment_status: EmploymentStatus::Employed,
            monthly_income,
            loan_amount,
            loan_duration_months: duration,
            monthly_debt: 10_000.0,
            coapplicant_income,
            credit_score,
            gender: Gender::Male,
            education_level: EducationLevel::Bachelor,
            experience: 8,
            job_tenure: 4,
            loan_purpose: LoanPurpose::Personal,
            marital_status: MaritalStatus::Married,
            dependents: 1,
            home_ownership: HomeOwnership::Own,
            previous_defaults: false,
        }
    }

    fn tiny_model_advisor() -> LoanAdvisor {
        let encoder = FeatureEncoder {
            categorical: vec![CategoricalEncoding {
                column: "previous_loan_defaults_on_file".to_string(),
                categories: vec!["No".to_string(), "Yes".to_string()],
            }],
            numeric: vec![NumericScaler {
                column: "credit_score".to_string(),
                mean: 650.0,
                std: 100.0,
            }],
        };
        let model = ApprovalModel {
            model_type: "logistic_regression".to_string(),
            trained_at: None,
            feature_names: vec![
                "previous_loan_defaults_on_file_No".to_string(),
                "previous_loan_defaults_on_file_Yes".to_string(),
                "credit_score".to_string(),
            ],
            coefficients: vec![0.8, -0.8, 1.2],
            intercept: 0.4,
        };
        LoanAdvisor::new(ScoringStrategy::ModelBacked { model, encoder })
    }

    #[test]
    fn test_analyze_strong_profile_approves() {
        let advisor = LoanAdvisor::new(ScoringStrategy::RuleBased);
        let result = advisor
            .analyze(&request(120_000.0, 400_000.0, 36, Some(780), 0.0))
            .unwrap();

        assert_eq!(result.decision, Decision::Approved);
        assert!(result.kyc_required);
        assert!(result.decision_reason.contains("Fast-Track"));
        assert_eq!(result.ml_probability, 98.0);
        assert!(result.approval_probability >= 10.2 && result.approval_probability <= 97.8);
        assert_eq!(result.credit_score.rating, crate::profile::CreditRating::VeryGood);
        assert!((result.interest_rate.annual - 11.25).abs() < 1e-9);
        assert!(result.emi.monthly > 0.0);
        assert!(!result.explanations.is_empty());
        assert!(!result.coapplicant.suggested);
        assert!(result.next_steps[0].starts_with("Proceed with E-KYC"));
    }

    #[test]
    fn test_analyze_rejects_invalid_request() {
        let advisor = LoanAdvisor::new(ScoringStrategy::RuleBased);
        let mut bad = request(50_000.0, 400_000.0, 36, None, 0.0);
        bad.monthly_income = 0.0;
        let err = advisor.analyze(&bad).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Validation {
                field: "monthly_income",
                ..
            }
        ));
    }

    #[test]
    fn test_analyze_overstretched_loan_rejected_on_foir() {
        let advisor = LoanAdvisor::new(ScoringStrategy::RuleBased);
        let result = advisor
            .analyze(&request(30_000.0, 1_500_000.0, 36, None, 0.0))
            .unwrap();

        assert_eq!(result.decision, Decision::Rejected);
        assert!(result.decision_reason.contains("FOIR"));
        assert!(!result.kyc_required);
        // the stressed-application cap holds the display score down
        assert!(result.approval_probability <= 35.0);
        assert!(result.next_steps[0].contains("Credit Information Report"));
    }

    #[test]
    fn test_coapplicant_income_boosts_probability_and_relieves_emi() {
        let advisor = LoanAdvisor::new(ScoringStrategy::RuleBased);
        let alone = advisor
            .analyze(&request(40_000.0, 600_000.0, 48, None, 0.0))
            .unwrap();
        let joint = advisor
            .analyze(&request(40_000.0, 600_000.0, 48, None, 20_000.0))
            .unwrap();

        // scorecard saturates at 0.98, the boost caps at 0.95
        assert_eq!(alone.ml_probability, 98.0);
        assert_eq!(joint.ml_probability, 95.0);
        assert!(joint.coapplicant.provided);
        assert!(!alone.coapplicant.provided);
        assert!(joint.income_analysis.emi_to_income_ratio < alone.income_analysis.emi_to_income_ratio);
        // annual income reports the applicant's own income either way
        assert_eq!(joint.income_analysis.annual_income, 480_000.0);
        assert_eq!(joint.income_analysis.monthly_income, 40_000.0);
    }

    #[test]
    fn test_analyze_with_model_uses_attribution_explanations() {
        let advisor = tiny_model_advisor();
        let result = advisor
            .analyze(&request(85_000.0, 400_000.0, 48, Some(750), 0.0))
            .unwrap();

        // logit 0.4 + 0.8 + 1.2 = 2.4 -> p = 0.9168
        assert_eq!(result.ml_probability, 91.7);
        assert_eq!(result.decision, Decision::Approved);
        assert_eq!(result.explanations[0].factor, "credit score");
        assert_eq!(
            result.explanations[1].factor,
            "previous loan defaults on file: No"
        );
        assert_eq!(result.explanations.len(), 2);
    }

    #[test]
    fn test_rule_based_strategy_explains_from_profile() {
        let advisor = LoanAdvisor::new(ScoringStrategy::RuleBased);
        let result = advisor
            .analyze(&request(85_000.0, 400_000.0, 48, Some(750), 0.0))
            .unwrap();
        assert!(result
            .explanations
            .iter()
            .any(|factor| factor.factor == "Strong Income"));
    }

    #[test]
    fn test_missing_artifact_directory_degrades() {
        let advisor = LoanAdvisor::from_artifact_dir(Path::new("data/no_such_dir"));
        assert!(!advisor.is_model_backed());
        // still fully functional on the scorecard
        let result = advisor
            .analyze(&request(85_000.0, 400_000.0, 48, None, 0.0))
            .unwrap();
        assert!(result.ml_probability > 0.0);
    }

    #[test]
    fn test_default_artifacts_load() {
        let advisor = LoanAdvisor::from_default_artifacts();
        assert!(advisor.is_model_backed());
    }

    #[test]
    fn test_sample_applications_all_analyze() {
        let advisor = LoanAdvisor::from_default_artifacts();
        let applications = crate::profile::load_sample_applications().unwrap();
        assert!(applications.len() >= 5);
        for request in &applications {
            let result = advisor.analyze(request);
            assert!(result.is_ok(), "sample application failed: {:?}", result.err());
        }
    }

    #[test]
    fn test_report_wire_format() {
        let advisor = tiny_model_advisor();
        let result = advisor
            .analyze(&request(85_000.0, 400_000.0, 48, Some(750), 0.0))
            .unwrap();
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["decision"], "APPROVED");
        assert_eq!(value["credit_score"]["rating"], "Very Good");
        assert_eq!(value["credit_score"]["display"], "730-770");
        assert_eq!(value["loan_details"]["duration_months"], 48);
        assert!((value["loan_details"]["duration_years"].as_f64().unwrap() - 4.0).abs() < 1e-9);
        assert_eq!(value["kyc_required"], true);
        assert_eq!(value["next_steps"].as_array().unwrap().len(), 4);
        assert_eq!(value["explanations"][0]["impact"], "positive");
        assert!(value["application_date"].as_str().unwrap().contains('T'));
        assert!(value["income_analysis"]["debt_to_income_ratio"].is_number());
        assert!(value["interest_rate"]["monthly"].is_number());
        assert!(value["emi"]["total_repayment"].is_number());
        assert_eq!(value["coapplicant"]["provided"], false);
    }

    #[test]
    fn test_advisor_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LoanAdvisor>();
    }
}
