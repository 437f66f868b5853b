pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::AppError;
pub use handlers::RankingHandlerState;
pub use services::{HeuristicModel, OnnxRankingModel, RankingLayer, ScoringModel};
