use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub model: ModelConfig,
    pub ranking: RankingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    /// Number of actix workers; framework default when unset
    #[serde(default)]
    pub http_workers: Option<usize>,
    #[serde(default = "default_json_limit_bytes")]
    pub json_limit_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,
    /// Serve with the heuristic scorer when the ONNX model cannot be loaded
    #[serde(default)]
    pub model_fallback_heuristic: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
    /// Echo raw error causes in 500 responses
    #[serde(default)]
    pub expose_error_details: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_http_port() -> u16 {
    8000
}

fn default_service_name() -> String {
    "msp-ranking-service".to_string()
}

fn default_json_limit_bytes() -> usize {
    1024 * 1024
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/xgboost_ranker_model.onnx")
}

fn default_max_candidates() -> usize {
    10_000
}

fn default_log_file() -> PathBuf {
    PathBuf::from("logs/msp_ranking.log")
}

fn default_log_level() -> String {
    "info,actix_web=info".to_string()
}

impl Config {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        let config = Config {
            service: envy::from_env::<ServiceConfig>()?,
            model: envy::from_env::<ModelConfig>()?,
            ranking: envy::from_env::<RankingConfig>()?,
            logging: envy::from_env::<LoggingConfig>()?,
        };
        config.validate()?;

        Ok(config)
    }

    /// Reject values that parse but cannot run the service
    pub fn validate(&self) -> Result<(), envy::Error> {
        if self.service.http_workers == Some(0) {
            return Err(envy::Error::Custom(
                "HTTP_WORKERS must be at least 1".to_string(),
            ));
        }

        if self.ranking.max_candidates == 0 {
            return Err(envy::Error::Custom(
                "MAX_CANDIDATES must be at least 1".to_string(),
            ));
        }

        if self.service.json_limit_bytes == 0 {
            return Err(envy::Error::Custom(
                "JSON_LIMIT_BYTES must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.http_port)
    }
}
