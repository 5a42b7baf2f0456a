//! Orchestration: the advisor, its reports and the prescreen

pub mod analysis;
pub mod prescreen;
pub mod report;

pub use analysis::{LoanAdvisor, ScoringStrategy};
pub use prescreen::ScreeningOutcome;
pub use report::{
    AnalysisResult, CoApplicantSummary, CreditScoreSummary, EmiSummary, IncomeAnalysis,
    InterestRateSummary, LoanDetails,
};
