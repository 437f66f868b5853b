/// Ranking Module
///
/// Scores MSP candidates for a job with a pre-trained GBDT ranker.
///
/// # Architecture
/// - **Model Layer**: `ScoringModel` seam, ONNX inference with tract-onnx or a heuristic scorer
/// - **Feature Layer**: fixed-order feature matrix construction
/// - **Scoring Layer**: validation, one batched model call, stable descending sort
///
/// # Workflow
/// 1. Validate the request (field ranges, batch size)
/// 2. Build the `N × 5` feature matrix
/// 3. Run model inference once over the batch
/// 4. Attach scores and sort descending
pub mod features;
pub mod heuristic;
pub mod model;
pub mod scorer;

pub use features::{build_feature_matrix, FEATURE_COLUMNS, FEATURE_COUNT};
pub use heuristic::HeuristicModel;
pub use model::{load_scoring_model, OnnxRankingModel, ScoringModel};
pub use scorer::RankingLayer;

#[cfg(test)]
pub use model::MockScoringModel;

use crate::models::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error("Model loading failed: {0}")]
    ModelLoadError(String),

    #[error("Feature extraction failed: {0}")]
    FeatureExtractionError(String),

    #[error("Model inference failed: {0}")]
    InferenceError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {}", describe_field_errors(.0))]
    Validation(Vec<FieldError>),
}

impl RankingError {
    /// Whether the caller sent bad data, as opposed to the service failing
    pub fn is_client_error(&self) -> bool {
        matches!(self, RankingError::Validation(_))
    }
}

fn describe_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, RankingError>;
