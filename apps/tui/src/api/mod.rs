//! Client side of the prediction service: wire models and the HTTP transport.

pub mod client;
pub mod models;

pub use client::HttpPredictionApi;
pub use models::{PredictionResult, Road, RoadPrediction, RoadRequest};

use crate::selection::ExpertRequest;
use std::future::Future;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("unexpected response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            Self::Malformed(error.to_string())
        } else {
            Self::Transport(error.to_string())
        }
    }
}

/// The remote prediction service.
pub trait PredictionApi: Send + Sync + 'static {
    fn fetch_roads(&self) -> impl Future<Output = Result<Vec<Road>, ApiError>> + Send;

    fn predict_road(
        &self,
        request: &RoadRequest,
    ) -> impl Future<Output = Result<RoadPrediction, ApiError>> + Send;

    /// Returns the raw JSON body; decoding depends on the variant.
    fn expert_predict(
        &self,
        request: &ExpertRequest,
    ) -> impl Future<Output = Result<serde_json::Value, ApiError>> + Send;
}
