pub mod ranking;

pub use ranking::{HeuristicModel, OnnxRankingModel, RankingLayer, ScoringModel};
