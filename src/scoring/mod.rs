//! Scoring primitives: credit banding, pricing, amortization and the
//! rule-based scorecard

pub mod coapplicant;
pub mod credit_score;
pub mod emi;
pub mod fallback;
pub mod interest;
pub(crate) mod jitter;

pub use coapplicant::{CoApplicantEvaluator, CoApplicantRecommendation};
pub use credit_score::{CreditScoreBand, CreditScoreEstimator};
pub use emi::{calculate_emi, EmiSchedule};
pub use fallback::rule_based_probability;
pub use interest::InterestRateCalculator;
