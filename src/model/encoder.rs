//! Feature encoding for model inference
//!
//! Reproduces the training-time transform: one-hot expansion of the
//! categorical columns followed by z-score scaling of the numeric columns.
//! The encoder artifact carries the fitted category lists and scaler
//! moments; the model's feature name order drives the final layout.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::profile::ApplicantProfile;

/// Fitted category list for one categorical column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalEncoding {
    /// Dataset column name
    pub column: String,
    /// Categories seen at fit time, one indicator feature each
    pub categories: Vec<String>,
}

/// Fitted scaler moments for one numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericScaler {
    /// Dataset column name
    pub column: String,
    /// Training mean
    pub mean: f64,
    /// Training standard deviation
    pub std: f64,
}

/// The full fitted transform, loaded from the encoder artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureEncoder {
    pub categorical: Vec<CategoricalEncoding>,
    pub numeric: Vec<NumericScaler>,
}

impl FeatureEncoder {
    /// Encode a profile into the model's feature order
    ///
    /// Features the model expects but the encoder does not produce are
    /// filled with zero, matching how an unseen category encodes.
    pub fn encode(
        &self,
        profile: &ApplicantProfile,
        feature_names: &[String],
    ) -> Result<Vec<f64>, EngineError> {
        let mut values: HashMap<String, f64> = HashMap::new();

        for encoding in &self.categorical {
            let observed = categorical_value(profile, &encoding.column)?;
            for category in &encoding.categories {
                let indicator = if *category == observed { 1.0 } else { 0.0 };
                values.insert(format!("{}_{}", encoding.column, category), indicator);
            }
        }

        for scaler in &self.numeric {
            let raw = numeric_value(profile, &scaler.column)?;
            let std = if scaler.std.abs() < f64::EPSILON {
                1.0
            } else {
                scaler.std
            };
            values.insert(scaler.column.clone(), (raw - scaler.mean) / std);
        }

        Ok(feature_names
            .iter()
            .map(|name| values.get(name).copied().unwrap_or(0.0))
            .collect())
    }

    /// Split a one-hot feature name into its (column, category) parts
    ///
    /// Returns None for numeric features and unknown prefixes.
    pub fn split_feature<'a>(&self, feature_name: &'a str) -> Option<(&str, &'a str)> {
        for encoding in &self.categorical {
            let prefix = format!("{}_", encoding.column);
            if let Some(category) = feature_name.strip_prefix(prefix.as_str()) {
                return Some((encoding.column.as_str(), category));
            }
        }
        None
    }
}

/// Dataset value of a categorical column for this profile
fn categorical_value(
    profile: &ApplicantProfile,
    column: &str,
) -> Result<&'static str, EngineError> {
    match column {
        "person_education" => Ok(profile.education.model_value()),
        "person_home_ownership" => Ok(profile.home_ownership.model_value()),
        "loan_intent" => Ok(profile.loan_purpose.model_value()),
        "previous_loan_defaults_on_file" => {
            Ok(if profile.previous_defaults { "Yes" } else { "No" })
        }
        other => Err(EngineError::Model(format!(
            "encoder references unknown categorical column '{other}'"
        ))),
    }
}

/// Dataset value of a numeric column for this profile
fn numeric_value(profile: &ApplicantProfile, column: &str) -> Result<f64, EngineError> {
    match column {
        "person_age" => Ok(f64::from(profile.age)),
        "person_income" => Ok(profile.annual_income()),
        "person_emp_exp" => Ok(f64::from(profile.experience_years)),
        "loan_amnt" => Ok(profile.loan_amount),
        "loan_percent_income" => Ok(profile.loan_percent_income()),
        "cb_person_cred_hist_length" => Ok(profile.credit_history_years()),
        "credit_score" => Ok(f64::from(profile.credit_score_or_default())),
        other => Err(EngineError::Model(format!(
            "encoder references unknown numeric column '{other}'"
        ))),
    }
}
