use crate::api::models::{Road, RoadPrediction, RoadRequest};
use crate::api::{ApiError, PredictionApi};
use crate::selection::ExpertRequest;
use reqwest::{Client, Response};

/// `PredictionApi` backed by the real HTTP service.
#[derive(Debug, Clone)]
pub struct HttpPredictionApi {
    client: Client,
    base_url: String,
}

impl HttpPredictionApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ApiError::Status(status.as_u16()))
    }
}

impl PredictionApi for HttpPredictionApi {
    async fn fetch_roads(&self) -> Result<Vec<Road>, ApiError> {
        let url = self.endpoint("/api/roads");
        log::debug!("GET {url}");
        let response = ensure_success(self.client.get(url).send().await?)?;
        Ok(response.json::<Vec<Road>>().await?)
    }

    async fn predict_road(&self, request: &RoadRequest) -> Result<RoadPrediction, ApiError> {
        let url = self.endpoint("/api/predict");
        log::info!("POST {url} with {request:?}");
        let response = ensure_success(self.client.post(url).json(request).send().await?)?;
        response.json::<RoadPrediction>().await?.validate()
    }

    async fn expert_predict(&self, request: &ExpertRequest) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint("/api/expert-predict");
        log::info!("POST {url} with {request:?}");
        let response = ensure_success(self.client.post(url).json(request).send().await?)?;
        log::debug!("expert-predict responded with {}", response.status());
        Ok(response.json::<serde_json::Value>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_without_double_slashes() {
        let api = HttpPredictionApi::new("http://localhost:3000/");
        assert_eq!(api.base_url(), "http://localhost:3000");
        assert_eq!(
            api.endpoint("/api/expert-predict"),
            "http://localhost:3000/api/expert-predict"
        );
    }
}
