/// Feature Matrix Construction
///
/// The ranker was trained on exactly this column order. Any reordering changes
/// scores silently, so every feature row in the crate goes through `feature_row`.

use super::{RankingError, Result};
use crate::models::Candidate;
use ndarray::Array2;

/// Model input columns, in training order
pub const FEATURE_COLUMNS: [&str; 5] = [
    "distance_km",
    "price_quote",
    "past_accept_rate",
    "completion_rate",
    "rating",
];

pub const FEATURE_COUNT: usize = FEATURE_COLUMNS.len();

/// Lay out one candidate as a model input row
pub fn feature_row(candidate: &Candidate) -> [f32; FEATURE_COUNT] {
    [
        candidate.distance_km as f32,
        candidate.price_quote as f32,
        candidate.past_accept_rate as f32,
        candidate.completion_rate as f32,
        candidate.rating as f32,
    ]
}

/// Build the `candidates.len() × FEATURE_COUNT` input matrix for one batched model call
pub fn build_feature_matrix(candidates: &[Candidate]) -> Result<Array2<f32>> {
    let values: Vec<f32> = candidates.iter().flat_map(feature_row).collect();

    Array2::from_shape_vec((candidates.len(), FEATURE_COUNT), values).map_err(|e| {
        RankingError::FeatureExtractionError(format!("Failed to build feature matrix: {}", e))
    })
}
