/// GBDT Model Inference Module
///
/// Loads and runs the ONNX export of the trained MSP ranker using tract-onnx.
/// The heuristic scorer is only used when fallback is explicitly enabled.

use super::{HeuristicModel, RankingError, Result, FEATURE_COUNT};
use crate::config::ModelConfig;
use ndarray::{Array1, Array2};
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;
use tracing::{info, warn};

type OnnxPlan = TypedRunnableModel<TypedModel>;

/// Scoring seam between the ranking layer and a fitted model.
///
/// Implementations are read-only after construction and shared across
/// every worker, hence `Send + Sync`.
#[cfg_attr(test, mockall::automock)]
pub trait ScoringModel: Send + Sync {
    /// Score a batch of feature rows (`batch_size × FEATURE_COUNT`), one score per row
    fn predict(&self, features: Array2<f32>) -> Result<Array1<f32>>;

    fn name(&self) -> &'static str;
}

/// Reject matrices that were not laid out for this model
pub(crate) fn check_feature_shape(features: &Array2<f32>) -> Result<()> {
    if features.shape()[1] != FEATURE_COUNT {
        return Err(RankingError::InvalidInput(format!(
            "Expected {} features, got {}",
            FEATURE_COUNT,
            features.shape()[1]
        )));
    }
    Ok(())
}

/// ONNX-exported gradient-boosted ranker
pub struct OnnxRankingModel {
    plan: Arc<OnnxPlan>,
}

impl OnnxRankingModel {
    /// Load and optimize the model at `model_path`
    pub fn load<P: AsRef<Path>>(model_path: P) -> Result<Self> {
        let path = model_path.as_ref();

        if !path.exists() {
            return Err(RankingError::ModelLoadError(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                RankingError::ModelLoadError(format!("{}: {}", path.display(), e))
            })?;

        info!(path = %path.display(), "Loaded ONNX ranking model");

        Ok(Self {
            plan: Arc::new(plan),
        })
    }
}

impl ScoringModel for OnnxRankingModel {
    fn predict(&self, features: Array2<f32>) -> Result<Array1<f32>> {
        check_feature_shape(&features)?;

        let batch_size = features.shape()[0];

        // Copy into tract's ndarray re-export so the tensor type matches the runtime
        let input = tract_ndarray::Array2::from_shape_fn((batch_size, FEATURE_COUNT), |(i, j)| {
            features[[i, j]]
        });

        let output = self
            .plan
            .run(tvec!(Tensor::from(input.into_dyn()).into()))
            .map_err(|e| RankingError::InferenceError(format!("ONNX inference failed: {}", e)))?;

        let scores_tensor = output[0]
            .to_array_view::<f32>()
            .map_err(|e| RankingError::InferenceError(format!("Output extraction failed: {}", e)))?;

        // Regressors emit [N] or [N, 1]; both flatten to one score per row
        Ok(Array1::from_iter(scores_tensor.iter().copied()))
    }

    fn name(&self) -> &'static str {
        "onnx-gbdt-ranker"
    }
}

/// Load the configured scoring model.
///
/// A missing or unreadable model stops startup unless heuristic fallback is enabled.
pub fn load_scoring_model(config: &ModelConfig) -> Result<Arc<dyn ScoringModel>> {
    match OnnxRankingModel::load(&config.model_path) {
        Ok(model) => Ok(Arc::new(model)),
        Err(e) if config.model_fallback_heuristic => {
            warn!(error = %e, "Failed to load ONNX model, falling back to heuristic scoring");
            Ok(Arc::new(HeuristicModel::new()))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn model_config(path: &str, fallback: bool) -> ModelConfig {
        ModelConfig {
            model_path: PathBuf::from(path),
            model_fallback_heuristic: fallback,
        }
    }

    #[test]
    fn test_missing_model_file() {
        let result = OnnxRankingModel::load("/nonexistent/ranker.onnx");
        assert!(matches!(result, Err(RankingError::ModelLoadError(_))));
    }

    #[test]
    fn test_corrupt_model_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranker.onnx");
        std::fs::write(&path, b"not an onnx graph").unwrap();

        let result = OnnxRankingModel::load(&path);
        assert!(matches!(result, Err(RankingError::ModelLoadError(_))));
    }

    #[test]
    fn test_load_without_fallback_fails() {
        let result = load_scoring_model(&model_config("/nonexistent/ranker.onnx", false));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_with_fallback_uses_heuristic() {
        let model = load_scoring_model(&model_config("/nonexistent/ranker.onnx", true)).unwrap();
        assert_eq!(model.name(), "heuristic");
    }

    #[test]
    fn test_feature_shape_check() {
        let ok = Array2::<f32>::zeros((3, FEATURE_COUNT));
        assert!(check_feature_shape(&ok).is_ok());

        let wrong = Array2::<f32>::zeros((1, 9));
        assert!(matches!(
            check_feature_shape(&wrong),
            Err(RankingError::InvalidInput(_))
        ));
    }
}
