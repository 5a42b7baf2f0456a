//! Trained model artifacts: encoder, classifier and their loader

pub mod classifier;
pub mod encoder;
pub mod loader;

pub use classifier::ApprovalModel;
pub use encoder::{CategoricalEncoding, FeatureEncoder, NumericScaler};
pub use loader::{load_encoder, load_model, ScoringArtifacts, DEFAULT_MODEL_DIR};
