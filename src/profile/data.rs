//! Applicant data structures matching the application intake format

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Default education level when the application omits it
fn default_education() -> EducationLevel {
    EducationLevel::Bachelor
}

/// Default years of professional experience
fn default_experience() -> u8 {
    5
}

/// Default years at the current job
fn default_job_tenure() -> u8 {
    2
}

/// Default loan purpose
fn default_purpose() -> LoanPurpose {
    LoanPurpose::Personal
}

/// Default marital status
fn default_marital_status() -> MaritalStatus {
    MaritalStatus::Single
}

/// Default home ownership status
fn default_home_ownership() -> HomeOwnership {
    HomeOwnership::Rent
}

/// Default gender when the application omits it
fn default_gender() -> Gender {
    Gender::Male
}

/// Gender of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Employment status of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmploymentStatus {
    /// Salaried employment
    Employed,
    /// Business or professional income
    #[serde(rename = "Self-Employed", alias = "Self Employed", alias = "SelfEmployed")]
    SelfEmployed,
    /// No current income source
    Unemployed,
}

/// Highest education level, normalized to the credit bureau vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School", alias = "HighSchool")]
    HighSchool,
    Associate,
    #[serde(alias = "Bachelor's", alias = "Bachelors")]
    Bachelor,
    #[serde(alias = "Master's", alias = "Masters")]
    Master,
    #[serde(alias = "Doctorate")]
    PhD,
}

impl EducationLevel {
    /// Spelling used by the model dataset
    pub fn model_value(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Associate => "Associate",
            EducationLevel::Bachelor => "Bachelor",
            EducationLevel::Master => "Master",
            EducationLevel::PhD => "PhD",
        }
    }
}

/// Home ownership status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HomeOwnership {
    #[serde(alias = "OWN")]
    Own,
    #[serde(alias = "MORTGAGE")]
    Mortgage,
    #[serde(alias = "RENT")]
    Rent,
    #[serde(alias = "OTHER")]
    Other,
}

impl HomeOwnership {
    /// Uppercase spelling used by the model dataset
    pub fn model_value(&self) -> &'static str {
        match self {
            HomeOwnership::Own => "OWN",
            HomeOwnership::Mortgage => "MORTGAGE",
            HomeOwnership::Rent => "RENT",
            HomeOwnership::Other => "OTHER",
        }
    }
}

/// Declared purpose of the loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanPurpose {
    #[serde(alias = "PERSONAL")]
    Personal,
    #[serde(alias = "EDUCATION")]
    Education,
    #[serde(alias = "MEDICAL")]
    Medical,
    #[serde(alias = "VENTURE", alias = "Business")]
    Venture,
    #[serde(
        rename = "Home Improvement",
        alias = "HomeImprovement",
        alias = "HOMEIMPROVEMENT"
    )]
    HomeImprovement,
    #[serde(
        rename = "Debt Consolidation",
        alias = "DebtConsolidation",
        alias = "DEBTCONSOLIDATION",
        alias = "DEBT_CONSOLIDATION"
    )]
    DebtConsolidation,
}

impl LoanPurpose {
    /// Uppercase spelling used by the model dataset
    pub fn model_value(&self) -> &'static str {
        match self {
            LoanPurpose::Personal => "PERSONAL",
            LoanPurpose::Education => "EDUCATION",
            LoanPurpose::Medical => "MEDICAL",
            LoanPurpose::Venture => "VENTURE",
            LoanPurpose::HomeImprovement => "HOMEIMPROVEMENT",
            LoanPurpose::DebtConsolidation => "DEBTCONSOLIDATION",
        }
    }
}

/// Marital status of the applicant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
}

/// Credit rating bands on the 300-900 bureau scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditRating {
    /// 800-900
    Excellent,
    /// 750-799
    #[serde(rename = "Very Good")]
    VeryGood,
    /// 700-749
    Good,
    /// 650-699
    Fair,
    /// 550-649
    Poor,
    /// 300-549
    #[serde(rename = "Very Poor")]
    VeryPoor,
}

impl CreditRating {
    /// Human-readable rating label
    pub fn as_str(&self) -> &'static str {
        match self {
            CreditRating::Excellent => "Excellent",
            CreditRating::VeryGood => "Very Good",
            CreditRating::Good => "Good",
            CreditRating::Fair => "Fair",
            CreditRating::Poor => "Poor",
            CreditRating::VeryPoor => "Very Poor",
        }
    }
}

/// Terminal outcome of an application evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Approved,
    Rejected,
    PendingReview,
}

impl Decision {
    /// Wire spelling of the decision
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Approved => "APPROVED",
            Decision::Rejected => "REJECTED",
            Decision::PendingReview => "PENDING_REVIEW",
        }
    }
}

/// Direction of an explanation factor's contribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Positive,
    Negative,
    Neutral,
}

/// A raw application as posted by the intake layer
///
/// Required fields have no default; everything else carries the documented
/// default so partial applications stay scoreable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRequest {
    /// Applicant age in years
    pub age: u8,

    /// Employment status
    pub employment_status: EmploymentStatus,

    /// Gross monthly income
    pub monthly_income: f64,

    /// Requested loan principal
    pub loan_amount: f64,

    /// Requested repayment term in months
    #[serde(alias = "loan_duration")]
    pub loan_duration_months: u32,

    /// Existing monthly debt obligations
    #[serde(default, alias = "monthly_debt_payments")]
    pub monthly_debt: f64,

    /// Monthly income of a co-applicant, 0 when applying alone
    #[serde(default)]
    pub coapplicant_income: f64,

    /// Self-reported bureau score (300-900) when the applicant knows it
    #[serde(default, alias = "cibil_score")]
    pub credit_score: Option<u16>,

    #[serde(default = "default_gender")]
    pub gender: Gender,

    #[serde(default = "default_education")]
    pub education_level: EducationLevel,

    /// Total years of professional experience
    #[serde(default = "default_experience")]
    pub experience: u8,

    /// Years at the current job
    #[serde(default = "default_job_tenure")]
    pub job_tenure: u8,

    #[serde(default = "default_purpose")]
    pub loan_purpose: LoanPurpose,

    #[serde(default = "default_marital_status")]
    pub marital_status: MaritalStatus,

    /// Number of financial dependents
    #[serde(default, alias = "number_of_dependents")]
    pub dependents: u8,

    #[serde(default = "default_home_ownership", alias = "home_ownership_status")]
    pub home_ownership: HomeOwnership,

    /// Whether the applicant has a past loan default on file
    #[serde(default, alias = "previous_loan_defaults")]
    pub previous_defaults: bool,
}

impl ApplicationRequest {
    /// Validate the request and produce an immutable profile
    ///
    /// Rejects what can never be scored (non-positive income or principal,
    /// out-of-range term or age, malformed bureau score). Young-but-adult
    /// applicants pass validation; the statutory age rule belongs to the
    /// decision cascade.
    pub fn to_profile(&self) -> Result<ApplicantProfile, EngineError> {
        if !self.monthly_income.is_finite() || self.monthly_income <= 0.0 {
            return Err(EngineError::validation(
                "monthly_income",
                "must be a positive amount",
            ));
        }
        if !self.loan_amount.is_finite() || self.loan_amount <= 0.0 {
            return Err(EngineError::validation(
                "loan_amount",
                "must be a positive amount",
            ));
        }
        if self.loan_duration_months == 0 || self.loan_duration_months > 480 {
            return Err(EngineError::validation(
                "loan_duration_months",
                "must be between 1 and 480 months",
            ));
        }
        if self.age < 18 || self.age > 100 {
            return Err(EngineError::validation(
                "age",
                "must be between 18 and 100 years",
            ));
        }
        if !self.monthly_debt.is_finite() || self.monthly_debt < 0.0 {
            return Err(EngineError::validation(
                "monthly_debt",
                "must be zero or a positive amount",
            ));
        }
        if !self.coapplicant_income.is_finite() || self.coapplicant_income < 0.0 {
            return Err(EngineError::validation(
                "coapplicant_income",
                "must be zero or a positive amount",
            ));
        }
        if let Some(score) = self.credit_score {
            if !(300..=900).contains(&score) {
                return Err(EngineError::validation(
                    "credit_score",
                    "must be on the 300-900 bureau scale",
                ));
            }
        }

        Ok(ApplicantProfile {
            age: self.age,
            gender: self.gender,
            education: self.education_level,
            employment: self.employment_status,
            experience_years: self.experience,
            job_tenure_years: self.job_tenure,
            monthly_income: self.monthly_income,
            monthly_debt: self.monthly_debt,
            loan_amount: self.loan_amount,
            loan_duration_months: self.loan_duration_months,
            loan_purpose: self.loan_purpose,
            marital_status: self.marital_status,
            dependents: self.dependents,
            home_ownership: self.home_ownership,
            manual_credit_score: self.credit_score,
            coapplicant_income: self.coapplicant_income,
            previous_defaults: self.previous_defaults,
        })
    }
}

/// A validated applicant profile
///
/// Built once per evaluation from an [`ApplicationRequest`]; derived ratios
/// are methods so the struct cannot drift out of sync with its inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    /// Applicant age in years
    pub age: u8,

    /// Gender of the applicant
    pub gender: Gender,

    /// Highest education level
    pub education: EducationLevel,

    /// Employment status
    pub employment: EmploymentStatus,

    /// Total years of professional experience
    pub experience_years: u8,

    /// Years at the current job
    pub job_tenure_years: u8,

    /// Gross monthly income
    pub monthly_income: f64,

    /// Existing monthly debt obligations
    pub monthly_debt: f64,

    /// Requested loan principal
    pub loan_amount: f64,

    /// Requested repayment term in months
    pub loan_duration_months: u32,

    /// Declared purpose of the loan
    pub loan_purpose: LoanPurpose,

    /// Marital status
    pub marital_status: MaritalStatus,

    /// Number of financial dependents
    pub dependents: u8,

    /// Home ownership status
    pub home_ownership: HomeOwnership,

    /// Self-reported bureau score, if provided
    pub manual_credit_score: Option<u16>,

    /// Monthly income of a co-applicant (0 = applying alone)
    pub coapplicant_income: f64,

    /// Past loan default on file
    pub previous_defaults: bool,
}

impl ApplicantProfile {
    /// Annualized gross income
    pub fn annual_income(&self) -> f64 {
        self.monthly_income * 12.0
    }

    /// Debt-to-income ratio; degenerate income reads as fully leveraged
    pub fn debt_to_income(&self) -> f64 {
        if self.monthly_income > 0.0 {
            self.monthly_debt / self.monthly_income
        } else {
            1.0
        }
    }

    /// Bureau score used by rules and the model: manual score or the
    /// population median of 650
    pub fn credit_score_or_default(&self) -> u16 {
        self.manual_credit_score.unwrap_or(650)
    }

    /// Approximate credit history length in years, anchored at age 21
    pub fn credit_history_years(&self) -> f64 {
        f64::from(self.age.saturating_sub(21))
    }

    /// Loan principal as a share of annual income; degenerate income maps
    /// to the dataset's midpoint of 0.5
    pub fn loan_percent_income(&self) -> f64 {
        let annual = self.annual_income();
        if annual > 0.0 {
            self.loan_amount / annual
        } else {
            0.5
        }
    }
}
