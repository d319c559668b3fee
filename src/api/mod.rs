mod client;
mod error;
mod types;

pub use client::ApiClient;
pub use error::{extract_detail, ApiError, PREDICTION_FAILED};
pub use types::{
    ClassReport, Dashboard, DecisionKind, FeatureImportance, FeatureImportanceResponse,
    HealthStatus, Insights, MetricsResponse, ModelMetrics, Prediction, PredictRequest,
    PredictionResponse, Sample, SampleDataResponse, SCORE_BANDS,
};
