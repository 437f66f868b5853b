use crate::error::{AppError, Result};
use crate::models::{ModelInfo, RankRequest};
use crate::services::ranking::{RankingLayer, FEATURE_COLUMNS};
use actix_web::{error::JsonPayloadError, get, post, web, HttpRequest, HttpResponse};
use tracing::warn;

/// Shared state for ranking handlers
pub struct RankingHandlerState {
    pub ranking: RankingLayer,
    pub expose_error_details: bool,
}

impl RankingHandlerState {
    pub fn new(ranking: RankingLayer, expose_error_details: bool) -> Self {
        Self {
            ranking,
            expose_error_details,
        }
    }
}

/// Rank MSP candidates for a job
///
/// POST /rank-msps
#[post("/rank-msps")]
pub async fn rank_msps(
    state: web::Data<RankingHandlerState>,
    body: web::Json<RankRequest>,
) -> Result<HttpResponse> {
    // Scoring runs inline on the worker; the model is CPU-bound and read-only
    let response = state
        .ranking
        .rank(body.into_inner())
        .map_err(|e| AppError::from_ranking(e, state.expose_error_details))?;

    Ok(HttpResponse::Ok().json(response))
}

/// GET /model
#[get("/model")]
pub async fn model_info(state: web::Data<RankingHandlerState>) -> HttpResponse {
    HttpResponse::Ok().json(ModelInfo {
        model: state.ranking.model_name().to_string(),
        features: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
    })
}

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// JSON extractor settings: body size limit and client-error mapping for bad payloads
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(path = %req.path(), error = %err, "Rejected malformed request body");

    match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            AppError::PayloadTooLarge(err.to_string()).into()
        }
        JsonPayloadError::ContentType => AppError::UnsupportedMediaType(err.to_string()).into(),
        _ => AppError::InvalidJson(err.to_string()).into(),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(rank_msps).service(model_info).service(health);
}
