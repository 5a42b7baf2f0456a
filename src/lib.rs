//! Loan Engine - Risk and pricing decision engine for unsecured personal loans
//!
//! This library provides:
//! - Credit score band estimation on the 300-900 bureau scale
//! - Approval scoring via an exported classifier, with a scorecard fallback
//! - Risk-based interest pricing and EMI amortization
//! - Co-applicant evaluation and household income blending
//! - An ordered underwriting rule cascade with explainable outcomes

pub mod error;
pub mod profile;
pub mod scoring;
pub mod model;
pub mod decision;
pub mod advisor;

// Re-export commonly used types
pub use advisor::{AnalysisResult, LoanAdvisor, ScoringStrategy, ScreeningOutcome};
pub use error::EngineError;
pub use profile::{ApplicantProfile, ApplicationRequest, CreditRating, Decision};
pub use scoring::{calculate_emi, CreditScoreBand, CreditScoreEstimator, InterestRateCalculator};
