use crate::models::FieldError;
use crate::services::ranking::RankingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error while ranking MSPs.";
pub const VALIDATION_ERROR_MESSAGE: &str = "Invalid ranking request.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {} field(s) rejected", .0.len())]
    ValidationError(Vec<FieldError>),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Inference error: {cause}")]
    InferenceError { cause: String, expose: bool },

    #[error("Internal server error: {cause}")]
    InternalError { cause: String, expose: bool },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl AppError {
    /// Map a ranking failure to its HTTP form.
    ///
    /// `expose_details` controls whether the raw cause reaches the response body.
    pub fn from_ranking(err: RankingError, expose_details: bool) -> Self {
        match err {
            RankingError::Validation(errors) => AppError::ValidationError(errors),
            RankingError::InferenceError(_)
            | RankingError::InvalidInput(_)
            | RankingError::FeatureExtractionError(_) => AppError::InferenceError {
                cause: err.to_string(),
                expose: expose_details,
            },
            RankingError::ModelLoadError(_) => AppError::InternalError {
                cause: err.to_string(),
                expose: expose_details,
            },
        }
    }

    fn category(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::InvalidJson(_) => "invalid_json",
            AppError::PayloadTooLarge(_) => "payload_too_large",
            AppError::UnsupportedMediaType(_) => "unsupported_media_type",
            AppError::InferenceError { .. } => "inference_error",
            AppError::InternalError { .. } => "internal_error",
        }
    }

    fn to_body(&self) -> ErrorResponse {
        match self {
            AppError::ValidationError(details) => ErrorResponse {
                error: self.category().to_string(),
                message: VALIDATION_ERROR_MESSAGE.to_string(),
                details: details.clone(),
            },
            AppError::InvalidJson(msg) => ErrorResponse {
                error: self.category().to_string(),
                message: VALIDATION_ERROR_MESSAGE.to_string(),
                details: vec![FieldError::new("body", "invalid_json", msg.clone())],
            },
            AppError::PayloadTooLarge(msg) | AppError::UnsupportedMediaType(msg) => ErrorResponse {
                error: self.category().to_string(),
                message: VALIDATION_ERROR_MESSAGE.to_string(),
                details: vec![FieldError::new("body", self.category(), msg.clone())],
            },
            AppError::InferenceError { cause, expose } | AppError::InternalError { cause, expose } => {
                ErrorResponse {
                    error: if *expose {
                        cause.clone()
                    } else {
                        self.category().to_string()
                    },
                    message: INTERNAL_ERROR_MESSAGE.to_string(),
                    details: Vec::new(),
                }
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_body())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
