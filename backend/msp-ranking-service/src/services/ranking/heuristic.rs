use super::model::{check_feature_shape, ScoringModel};
use super::Result;
use ndarray::{Array1, Array2};
use tracing::debug;

/// Hand-weighted scorer for local development and model fallback.
///
/// Formula: `0.4·accept + 0.3·completion + 0.2·(rating / 5) - 0.01·distance_km - 0.001·price_quote`
///
/// Features layout follows `FEATURE_COLUMNS`:
/// - [0]: distance_km
/// - [1]: price_quote
/// - [2]: past_accept_rate
/// - [3]: completion_rate
/// - [4]: rating
#[derive(Debug, Clone, Copy)]
pub struct HeuristicModel {
    accept_weight: f32,
    completion_weight: f32,
    rating_weight: f32,
    distance_penalty: f32,
    price_penalty: f32,
}

impl Default for HeuristicModel {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicModel {
    pub fn new() -> Self {
        debug!("Using heuristic ranking model");
        Self {
            accept_weight: 0.4,
            completion_weight: 0.3,
            rating_weight: 0.2,
            distance_penalty: 0.01,
            price_penalty: 0.001,
        }
    }
}

impl ScoringModel for HeuristicModel {
    fn predict(&self, features: Array2<f32>) -> Result<Array1<f32>> {
        check_feature_shape(&features)?;

        let scores = features
            .rows()
            .into_iter()
            .map(|row| {
                let (distance, price, accept, completion, rating) =
                    (row[0], row[1], row[2], row[3], row[4]);

                accept * self.accept_weight
                    + completion * self.completion_weight
                    + (rating / 5.0) * self.rating_weight
                    - distance * self.distance_penalty
                    - price * self.price_penalty
            })
            .collect::<Array1<f32>>();

        Ok(scores)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}
