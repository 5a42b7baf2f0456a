//! Model artifact loader
//!
//! Loads the exported classifier and its feature encoder from JSON files in
//! data/model/

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::EngineError;
use crate::model::classifier::ApprovalModel;
use crate::model::encoder::FeatureEncoder;

/// Default path to the model artifact directory
pub const DEFAULT_MODEL_DIR: &str = "data/model";

/// Classifier weights file name
pub const MODEL_FILE: &str = "approval_model.json";

/// Fitted encoder file name
pub const ENCODER_FILE: &str = "feature_encoders.json";

/// Load the classifier weights from a model directory
pub fn load_model(path: &Path) -> Result<ApprovalModel, EngineError> {
    let file_path = path.join(MODEL_FILE);
    let file = File::open(&file_path).map_err(|err| {
        EngineError::Artifact(format!("cannot open {}: {err}", file_path.display()))
    })?;
    let model: ApprovalModel = serde_json::from_reader(BufReader::new(file)).map_err(|err| {
        EngineError::Artifact(format!("cannot parse {}: {err}", file_path.display()))
    })?;
    model.validate()?;
    Ok(model)
}

/// Load the fitted feature encoder from a model directory
pub fn load_encoder(path: &Path) -> Result<FeatureEncoder, EngineError> {
    let file_path = path.join(ENCODER_FILE);
    let file = File::open(&file_path).map_err(|err| {
        EngineError::Artifact(format!("cannot open {}: {err}", file_path.display()))
    })?;
    let encoder: FeatureEncoder = serde_json::from_reader(BufReader::new(file)).map_err(|err| {
        EngineError::Artifact(format!("cannot parse {}: {err}", file_path.display()))
    })?;
    Ok(encoder)
}

/// Classifier plus encoder, loaded together from one directory
#[derive(Debug)]
pub struct ScoringArtifacts {
    pub model: ApprovalModel,
    pub encoder: FeatureEncoder,
}

impl ScoringArtifacts {
    /// Load both artifacts from the default directory
    pub fn load_default() -> Result<Self, EngineError> {
        Self::load_from(Path::new(DEFAULT_MODEL_DIR))
    }

    /// Load both artifacts from a specific directory
    pub fn load_from(path: &Path) -> Result<Self, EngineError> {
        let model = load_model(path)?;
        let encoder = load_encoder(path)?;

        // every one-hot and scaled column must land somewhere in the model
        let produced = encoder
            .categorical
            .iter()
            .map(|encoding| encoding.categories.len())
            .sum::<usize>()
            + encoder.numeric.len();
        if produced != model.feature_names.len() {
            return Err(EngineError::Artifact(format!(
                "encoder produces {produced} features but model expects {}",
                model.feature_names.len()
            )));
        }

        Ok(Self { model, encoder })
    }
}
