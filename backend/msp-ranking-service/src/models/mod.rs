use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

/// One MSP's feature record as submitted by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Candidate {
    pub msp_id: i64,

    #[validate(range(min = 0.0, message = "distance_km must be >= 0"))]
    pub distance_km: f64,

    #[validate(range(exclusive_min = 0.0, message = "price_quote must be > 0"))]
    pub price_quote: f64,

    #[validate(range(min = 0.0, max = 1.0, message = "past_accept_rate must be within [0, 1]"))]
    pub past_accept_rate: f64,

    #[validate(range(min = 0.0, max = 1.0, message = "completion_rate must be within [0, 1]"))]
    pub completion_rate: f64,

    #[validate(range(min = 0.0, max = 5.0, message = "rating must be within [0, 5]"))]
    pub rating: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RankRequest {
    pub job_id: i64,

    #[validate(nested)]
    pub candidates: Vec<Candidate>,
}

/// A candidate with the model score attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub score: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub job_id: i64,
    pub ranked_candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub model: String,
    pub features: Vec<String>,
}

/// A single rejected field, addressed by path (e.g. `candidates[1].rating`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Flatten nested validator output into path-addressed field errors.
///
/// Fields are visited in name order and list entries in index order, so the
/// result is deterministic for a given request.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_field_errors(errors, "", &mut out);
    out
}

fn collect_field_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    let mut entries: Vec<(String, &ValidationErrorsKind)> = errors
        .errors()
        .iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, kind) in entries {
        let path = if prefix.is_empty() {
            field
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {}", path));
                    out.push(FieldError::new(path.clone(), err.code.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_field_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}
