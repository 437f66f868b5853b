/// Candidate Scoring Module
///
/// Orchestrates validation, feature extraction, model inference and sorting for one ranking request.

use super::{build_feature_matrix, RankingError, Result, ScoringModel};
use crate::models::{
    flatten_validation_errors, FieldError, RankRequest, RankResponse, RankedCandidate,
};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use validator::Validate;

/// Default upper bound on candidates per request
pub const DEFAULT_MAX_CANDIDATES: usize = 10_000;

/// Ranking Layer
///
/// Holds the loaded model for the lifetime of the process. Stateless per request.
#[derive(Clone)]
pub struct RankingLayer {
    model: Arc<dyn ScoringModel>,
    max_candidates: usize,
}

impl RankingLayer {
    pub fn new(model: Arc<dyn ScoringModel>) -> Self {
        Self {
            model,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates;
        self
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Rank the request's candidates by descending model score.
    ///
    /// The call either scores every candidate or fails; the model is never
    /// invoked for a request that fails validation.
    pub fn rank(&self, request: RankRequest) -> Result<RankResponse> {
        let job_id = request.job_id;

        info!(
            job_id,
            candidate_count = request.candidates.len(),
            "Received ranking request"
        );

        match self.score_and_sort(request) {
            Ok(ranked_candidates) => {
                info!(
                    job_id,
                    ranked_count = ranked_candidates.len(),
                    top_score = ranked_candidates.first().map(|c| c.score),
                    "Ranked MSPs"
                );
                Ok(RankResponse {
                    job_id,
                    ranked_candidates,
                })
            }
            Err(e) if e.is_client_error() => {
                warn!(job_id, error = %e, "Rejected ranking request");
                Err(e)
            }
            Err(e) => {
                error!(job_id, error = %e, "Ranking failed");
                Err(e)
            }
        }
    }

    fn score_and_sort(&self, request: RankRequest) -> Result<Vec<RankedCandidate>> {
        self.validate(&request)?;

        let candidates = request.candidates;
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let feature_matrix = build_feature_matrix(&candidates)?;

        debug!(
            job_id = request.job_id,
            rows = feature_matrix.nrows(),
            model = self.model.name(),
            "Scoring candidates"
        );

        let scores = self.model.predict(feature_matrix)?;

        if scores.len() != candidates.len() {
            return Err(RankingError::InferenceError(format!(
                "Model returned {} scores for {} candidates",
                scores.len(),
                candidates.len()
            )));
        }

        let mut ranked: Vec<RankedCandidate> = candidates
            .into_iter()
            .zip(scores.iter())
            .map(|(candidate, &score)| RankedCandidate { candidate, score })
            .collect();

        // Stable: equal scores keep input order
        ranked.sort_by(|a, b| descending_score(a.score, b.score));

        Ok(ranked)
    }

    fn validate(&self, request: &RankRequest) -> Result<()> {
        if request.candidates.len() > self.max_candidates {
            return Err(RankingError::Validation(vec![FieldError::new(
                "candidates",
                "length",
                format!(
                    "at most {} candidates per request, got {}",
                    self.max_candidates,
                    request.candidates.len()
                ),
            )]));
        }

        request
            .validate()
            .map_err(|errors| RankingError::Validation(flatten_validation_errors(&errors)))
    }
}

/// Descending order with NaN after every real score; `-0.0` and `0.0` tie
fn descending_score(a: f32, b: f32) -> Ordering {
    let key = |s: f32| if s.is_nan() { f32::NEG_INFINITY } else { s };
    key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal)
}

impl std::fmt::Debug for RankingLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingLayer")
            .field("model", &self.model.name())
            .field("max_candidates", &self.max_candidates)
            .finish()
    }
}
