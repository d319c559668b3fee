use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::error::{extract_detail, ApiError};
use crate::api::types::{
    Dashboard, FeatureImportanceResponse, HealthStatus, MetricsResponse, PredictRequest,
    PredictionResponse, SampleDataResponse,
};
use crate::config::ApiConfig;

/// Client for the credit score prediction API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(config.timeout()?)
            .default_headers(headers)
            .user_agent(concat!("credit-score/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /predict`
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictionResponse, ApiError> {
        self.post("/predict", request).await
    }

    /// `GET /health`
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get("/health").await
    }

    /// `GET /metrics`
    pub async fn metrics(&self) -> Result<MetricsResponse, ApiError> {
        self.get("/metrics").await
    }

    /// `GET /feature-importance`
    pub async fn feature_importance(&self) -> Result<FeatureImportanceResponse, ApiError> {
        self.get("/feature-importance").await
    }

    /// `GET /sample-data`
    pub async fn sample_data(&self) -> Result<SampleDataResponse, ApiError> {
        self.get("/sample-data").await
    }

    /// Fetch metrics and feature importance concurrently.
    pub async fn dashboard(&self) -> Result<Dashboard, ApiError> {
        let (metrics, importance) = futures::try_join!(self.metrics(), self.feature_importance())?;

        let notes = [metrics.note, importance.note]
            .into_iter()
            .flatten()
            .collect();

        let metrics = metrics.metrics.ok_or_else(|| {
            ApiError::Backend(
                metrics
                    .message
                    .unwrap_or_else(|| "Model metrics not available".to_string()),
            )
        })?;

        let mut feature_importance = importance.feature_importance;
        feature_importance.sort_by(|a, b| b.importance.total_cmp(&a.importance));

        Ok(Dashboard {
            metrics,
            feature_importance,
            notes,
        })
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        tracing::debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::debug!("API returned {}: {}", status, body);
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail: extract_detail(&body),
        });
    }

    let value: serde_json::Value =
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))?;

    // The backend reports some failures as 200 with `"status": "error"`.
    if value.get("status").and_then(|s| s.as_str()) == Some("error") {
        let message = value
            .get("message")
            .or_else(|| value.get("detail"))
            .and_then(|m| m.as_str())
            .unwrap_or("Unknown error")
            .to_string();
        return Err(ApiError::Backend(message));
    }

    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
