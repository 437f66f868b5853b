//! HTTP middleware for the ranking service

pub mod timing;

pub use timing::RequestTiming;
