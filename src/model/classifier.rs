//! Logistic approval classifier
//!
//! The model artifact is an exported logistic regression: one coefficient
//! per encoded feature plus an intercept, with the positive class meaning
//! approval. Inference is a dot product and a sigmoid; attribution is the
//! per-feature contribution to the logit.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

fn default_model_type() -> String {
    "logistic_regression".to_string()
}

/// Exported classifier weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalModel {
    /// Family tag carried by the exporter
    #[serde(default = "default_model_type")]
    pub model_type: String,
    /// Export timestamp, informational only
    #[serde(default)]
    pub trained_at: Option<String>,
    /// Encoded feature layout the coefficients are aligned to
    pub feature_names: Vec<String>,
    /// One weight per feature
    pub coefficients: Vec<f64>,
    /// Logit offset
    pub intercept: f64,
}

impl ApprovalModel {
    /// Check the artifact is internally coherent
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.feature_names.is_empty() {
            return Err(EngineError::Artifact(
                "model artifact declares no features".to_string(),
            ));
        }
        if self.feature_names.len() != self.coefficients.len() {
            return Err(EngineError::Artifact(format!(
                "model artifact is inconsistent: {} feature names but {} coefficients",
                self.feature_names.len(),
                self.coefficients.len()
            )));
        }
        Ok(())
    }

    /// Approval probability for an encoded feature vector
    pub fn probability(&self, features: &[f64]) -> Result<f64, EngineError> {
        if features.len() != self.coefficients.len() {
            return Err(EngineError::Model(format!(
                "feature vector length {} does not match model width {}",
                features.len(),
                self.coefficients.len()
            )));
        }

        let logit: f64 = self.intercept
            + self
                .coefficients
                .iter()
                .zip(features)
                .map(|(weight, value)| weight * value)
                .sum::<f64>();
        Ok(sigmoid(logit))
    }

    /// Per-feature logit contributions, aligned with `feature_names`
    pub fn attribution(&self, features: &[f64]) -> Result<Vec<f64>, EngineError> {
        if features.len() != self.coefficients.len() {
            return Err(EngineError::Model(format!(
                "feature vector length {} does not match model width {}",
                features.len(),
                self.coefficients.len()
            )));
        }

        Ok(self
            .coefficients
            .iter()
            .zip(features)
            .map(|(weight, value)| weight * value)
            .collect())
    }
}

fn sigmoid(logit: f64) -> f64 {
    1.0 / (1.0 + (-logit).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tiny_model() -> ApprovalModel {
        ApprovalModel {
            model_type: "logistic_regression".to_string(),
            trained_at: None,
            feature_names: vec![
                "previous_loan_defaults_on_file_No".to_string(),
                "previous_loan_defaults_on_file_Yes".to_string(),
                "credit_score".to_string(),
            ],
            coefficients: vec![0.8, -0.8, 1.2],
            intercept: 0.4,
        }
    }

    #[test]
    fn test_probability_matches_hand_computation() {
        // logit = 0.4 + 0.8*1 + 1.2*1 = 2.4
        let p = tiny_model().probability(&[1.0, 0.0, 1.0]).unwrap();
        assert_abs_diff_eq!(p, 0.916_827, epsilon = 1e-6);
    }

    #[test]
    fn test_probability_is_bounded() {
        let low = tiny_model().probability(&[0.0, 1.0, -8.0]).unwrap();
        assert!(low > 0.0 && low < 0.05);

        let high = tiny_model().probability(&[1.0, 0.0, 8.0]).unwrap();
        assert!(high > 0.95 && high < 1.0);
    }

    #[test]
    fn test_attribution_is_weight_times_value() {
        let weights = tiny_model().attribution(&[1.0, 0.0, 1.0]).unwrap();
        assert_eq!(weights.len(), 3);
        assert_abs_diff_eq!(weights[0], 0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(weights[1], 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(weights[2], 1.2, epsilon = 1e-12);
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let err = tiny_model().probability(&[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, EngineError::Model(_)));

        let err = tiny_model().attribution(&[1.0]).unwrap_err();
        assert!(matches!(err, EngineError::Model(_)));
    }

    #[test]
    fn test_validate_catches_misaligned_artifact() {
        let mut model = tiny_model();
        assert!(model.validate().is_ok());

        model.coefficients.pop();
        assert!(matches!(
            model.validate().unwrap_err(),
            EngineError::Artifact(_)
        ));

        model.feature_names.clear();
        model.coefficients.clear();
        assert!(matches!(
            model.validate().unwrap_err(),
            EngineError::Artifact(_)
        ));
    }
}
