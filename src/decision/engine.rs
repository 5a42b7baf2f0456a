//! Ordered decision rule cascade
//!
//! Hard regulatory rejections first, then documentation and verification
//! holds, then the probability thresholds. The first matching rule decides;
//! later rules never see an application a prior rule has already settled.

use crate::profile::{ApplicantProfile, CreditRating, Decision, EmploymentStatus, LoanPurpose};

/// A decision with its operative reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub decision: Decision,
    pub reason: String,
}

impl DecisionOutcome {
    fn new(decision: Decision, reason: impl Into<String>) -> Self {
        Self {
            decision,
            reason: reason.into(),
        }
    }
}

/// Applies the underwriting rule cascade
pub struct DecisionEngine;

impl DecisionEngine {
    /// FOIR above this is a hard rejection
    pub const MAX_FOIR: f64 = 0.55;

    /// FOIR above this routes to manual review
    pub const REVIEW_FOIR: f64 = 0.45;

    /// Loan-to-annual-income above this is a hard rejection
    pub const MAX_LOAN_TO_INCOME: f64 = 10.0;

    /// Statutory minimum age for loan agreements
    pub const MIN_AGE: u8 = 21;

    /// Probability at or above which the application fast-tracks
    pub const FAST_TRACK_PROBABILITY: f64 = 0.70;

    /// Probability at or above which the application is referable
    pub const REVIEW_PROBABILITY: f64 = 0.40;

    /// Run the cascade, first match wins
    ///
    /// The credit rating and loan duration are accepted for interface
    /// parity with the scoring pipeline; the cascade reads the bureau
    /// score and purpose off the profile directly.
    pub fn decide(
        probability: f64,
        emi_to_income: f64,
        _credit_rating: CreditRating,
        _loan_duration_months: u32,
        loan_to_income: f64,
        profile: &ApplicantProfile,
    ) -> DecisionOutcome {
        let bureau_score = profile.credit_score_or_default();

        if emi_to_income > Self::MAX_FOIR {
            return DecisionOutcome::new(
                Decision::Rejected,
                format!(
                    "Fixed Obligation to Income Ratio (FOIR) of {:.1}% exceeds RBI maximum \
                     permissible limit of 55%.",
                    emi_to_income * 100.0
                ),
            );
        }

        if loan_to_income > Self::MAX_LOAN_TO_INCOME {
            return DecisionOutcome::new(
                Decision::Rejected,
                format!(
                    "Total loan exposure ({loan_to_income:.1}x annual income) exceeds bank's \
                     risk appetite for unsecured personal loans."
                ),
            );
        }

        if profile.age < Self::MIN_AGE {
            return DecisionOutcome::new(
                Decision::Rejected,
                "Applicant age below statutory minimum of 21 years for personal loan agreements.",
            );
        }

        if profile.employment == EmploymentStatus::SelfEmployed && profile.job_tenure_years < 3 {
            return DecisionOutcome::new(
                Decision::PendingReview,
                "Self-employed applicants require minimum 3 years of ITR filings for income \
                 stability verification.",
            );
        }

        if emi_to_income > Self::REVIEW_FOIR {
            return DecisionOutcome::new(
                Decision::PendingReview,
                format!(
                    "High FOIR ({:.1}%) detected. Manual verification of non-salary income \
                     sources required.",
                    emi_to_income * 100.0
                ),
            );
        }

        if profile.employment == EmploymentStatus::Employed && profile.job_tenure_years < 1 {
            return DecisionOutcome::new(
                Decision::PendingReview,
                "Current employment duration is less than 1 year - requires Form 16 and \
                 previous employer discharge letter.",
            );
        }

        if profile.loan_purpose == LoanPurpose::Medical
            && (0.40..0.75).contains(&probability)
        {
            return DecisionOutcome::new(
                Decision::PendingReview,
                "Medical Expense Loan requires verification of hospital estimate or treatment \
                 quotation as per RBI healthcare financing guidelines.",
            );
        }

        if profile.loan_purpose == LoanPurpose::DebtConsolidation
            && (0.40..0.75).contains(&probability)
        {
            return DecisionOutcome::new(
                Decision::PendingReview,
                "Debt Consolidation request requires payoff statement from existing lenders \
                 and updated CIBIL report for liability verification.",
            );
        }

        if bureau_score >= 700 && (0.45..0.70).contains(&probability) {
            return DecisionOutcome::new(
                Decision::PendingReview,
                "Applicant has strong CIBIL score but borderline AI assessment. Case escalated \
                 to Senior Credit Manager for discretionary approval.",
            );
        }

        if probability >= Self::FAST_TRACK_PROBABILITY {
            return DecisionOutcome::new(
                Decision::Approved,
                "Application provisionally approved under RBI Fast-Track scheme. Subject to \
                 KYC and digital documentation.",
            );
        }

        if probability >= Self::REVIEW_PROBABILITY {
            return DecisionOutcome::new(
                Decision::PendingReview,
                "Credit assessment indicates borderline eligibility. Case referred to Nodal \
                 Bank Manager for final appraisal.",
            );
        }

        DecisionOutcome::new(
            Decision::Rejected,
            "Credit scoring model indicates high risk-weightage. Application does not meet \
             minimum credit benchmark.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{
        ApplicationRequest, EducationLevel, Gender, HomeOwnership, MaritalStatus,
    };

    fn profile(
        age: u8,
        employment: EmploymentStatus,
        job_tenure: u8,
        purpose: LoanPurpose,
        credit_score: Option<u16>,
    ) -> ApplicantProfile {
        ApplicationRequest {
            age,
            employment_status: employment,
            monthly_income: 70_000.0,
            loan_amount: 500_000.0,
            loan_duration_months: 48,
            monthly_debt: 10_000.0,
            coapplicant_income: 0.0,
            credit_score,
            gender: Gender::Male,
            education_level: EducationLevel::Bachelor,
            experience: 8,
            job_tenure,
            loan_purpose: purpose,
            marital_status: MaritalStatus::Married,
            dependents: 1,
            home_ownership: HomeOwnership::Rent,
            previous_defaults: false,
        }
        .to_profile()
        .unwrap()
    }

    fn salaried() -> ApplicantProfile {
        profile(32, EmploymentStatus::Employed, 4, LoanPurpose::Personal, None)
    }

    #[test]
    fn test_foir_breach_rejects_even_strong_scores() {
        let outcome =
            DecisionEngine::decide(0.92, 0.60, CreditRating::Excellent, 48, 2.0, &salaried());
        assert_eq!(outcome.decision, Decision::Rejected);
        assert!(outcome
            .reason
            .starts_with("Fixed Obligation to Income Ratio (FOIR) of 60.0%"));
    }

    #[test]
    fn test_exposure_breach_rejects() {
        let outcome =
            DecisionEngine::decide(0.80, 0.30, CreditRating::Good, 48, 12.0, &salaried());
        assert_eq!(outcome.decision, Decision::Rejected);
        assert!(outcome.reason.starts_with("Total loan exposure (12.0x"));
    }

    #[test]
    fn test_underage_applicant_rejected() {
        let young = profile(20, EmploymentStatus::Employed, 1, LoanPurpose::Personal, None);
        let outcome = DecisionEngine::decide(0.80, 0.30, CreditRating::Good, 48, 2.0, &young);
        assert_eq!(outcome.decision, Decision::Rejected);
        assert!(outcome.reason.contains("statutory minimum of 21 years"));
    }

    #[test]
    fn test_self_employed_without_itr_history_held() {
        let applicant =
            profile(35, EmploymentStatus::SelfEmployed, 2, LoanPurpose::Personal, None);
        let outcome = DecisionEngine::decide(0.85, 0.30, CreditRating::Good, 48, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.contains("3 years of ITR filings"));
    }

    #[test]
    fn test_review_band_foir_held() {
        let outcome = DecisionEngine::decide(0.85, 0.50, CreditRating::Good, 48, 2.0, &salaried());
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.starts_with("High FOIR (50.0%)"));
    }

    #[test]
    fn test_new_job_needs_discharge_letter() {
        let fresher = profile(28, EmploymentStatus::Employed, 0, LoanPurpose::Personal, None);
        let outcome = DecisionEngine::decide(0.85, 0.30, CreditRating::Good, 48, 2.0, &fresher);
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.contains("less than 1 year"));
    }

    #[test]
    fn test_medical_loan_in_band_needs_estimate() {
        let applicant = profile(32, EmploymentStatus::Employed, 4, LoanPurpose::Medical, None);
        let outcome = DecisionEngine::decide(0.50, 0.30, CreditRating::Good, 48, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.starts_with("Medical Expense Loan"));
    }

    #[test]
    fn test_medical_loan_above_band_fast_tracks() {
        let applicant = profile(32, EmploymentStatus::Employed, 4, LoanPurpose::Medical, None);
        let outcome = DecisionEngine::decide(0.80, 0.30, CreditRating::Good, 48, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::Approved);
    }

    #[test]
    fn test_foir_breach_beats_medical_documentation_hold() {
        // matches both the FOIR rejection and the medical review band;
        // the earlier rule must win
        let applicant = profile(32, EmploymentStatus::Employed, 4, LoanPurpose::Medical, None);
        let outcome = DecisionEngine::decide(0.50, 0.60, CreditRating::Good, 48, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::Rejected);
        assert!(outcome.reason.contains("FOIR"));
    }

    #[test]
    fn test_clean_salaried_application_approves() {
        let applicant =
            profile(32, EmploymentStatus::Employed, 4, LoanPurpose::Personal, Some(750));
        let outcome = DecisionEngine::decide(0.85, 0.20, CreditRating::Good, 36, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::Approved);
        assert!(outcome.reason.contains("Fast-Track"));
    }

    #[test]
    fn test_debt_consolidation_in_band_needs_payoff_statement() {
        let applicant =
            profile(32, EmploymentStatus::Employed, 4, LoanPurpose::DebtConsolidation, None);
        let outcome = DecisionEngine::decide(0.60, 0.30, CreditRating::Good, 48, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.starts_with("Debt Consolidation request"));
    }

    #[test]
    fn test_strong_cibil_borderline_escalates() {
        let applicant =
            profile(32, EmploymentStatus::Employed, 4, LoanPurpose::Personal, Some(720));
        let outcome = DecisionEngine::decide(0.55, 0.30, CreditRating::Good, 48, 2.0, &applicant);
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.contains("Senior Credit Manager"));
    }

    #[test]
    fn test_unreported_score_defaults_below_escalation() {
        // default bureau score of 650 keeps the escalation rule dormant
        let outcome = DecisionEngine::decide(0.55, 0.30, CreditRating::Fair, 48, 2.0, &salaried());
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.contains("Nodal Bank Manager"));
    }

    #[test]
    fn test_fast_track_approval() {
        let outcome = DecisionEngine::decide(0.80, 0.30, CreditRating::Good, 48, 2.0, &salaried());
        assert_eq!(outcome.decision, Decision::Approved);
        assert!(outcome.reason.contains("RBI Fast-Track scheme"));
    }

    #[test]
    fn test_borderline_refers_to_nodal_manager() {
        let outcome = DecisionEngine::decide(0.45, 0.30, CreditRating::Fair, 48, 2.0, &salaried());
        assert_eq!(outcome.decision, Decision::PendingReview);
        assert!(outcome.reason.contains("Nodal Bank Manager"));
    }

    #[test]
    fn test_low_probability_rejected() {
        let outcome = DecisionEngine::decide(0.20, 0.30, CreditRating::Poor, 48, 2.0, &salaried());
        assert_eq!(outcome.decision, Decision::Rejected);
        assert!(outcome.reason.contains("minimum credit benchmark"));
    }

    #[test]
    fn test_threshold_boundaries() {
        let at_fast_track =
            DecisionEngine::decide(0.70, 0.30, CreditRating::Good, 48, 2.0, &salaried());
        assert_eq!(at_fast_track.decision, Decision::Approved);

        let at_review =
            DecisionEngine::decide(0.40, 0.30, CreditRating::Fair, 48, 2.0, &salaried());
        assert_eq!(at_review.decision, Decision::PendingReview);

        let at_max_foir =
            DecisionEngine::decide(0.80, 0.55, CreditRating::Good, 48, 2.0, &salaried());
        assert_ne!(at_max_foir.decision, Decision::Rejected);
    }
}
