//! Decision rules and decision explanations

pub mod engine;
pub mod explain;

pub use engine::{DecisionEngine, DecisionOutcome};
pub use explain::{ExplanationFactor, ExplanationGenerator};
