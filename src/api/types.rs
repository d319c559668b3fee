use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::profile::FinancialProfile;

/// Body of `POST /predict`. Utilization is a fraction (0-1), not a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub age: f64,
    pub monthly_income: f64,
    pub loan_amount: f64,
    pub credit_utilization: f64,
    pub missed_payments: u32,
    pub total_active_loans: u32,
    pub credit_history_years: f64,
    pub loan_tenure_months: f64,
}

impl From<&FinancialProfile> for PredictRequest {
    fn from(profile: &FinancialProfile) -> Self {
        Self {
            age: f64::from(profile.age),
            monthly_income: profile.monthly_income,
            loan_amount: profile.total_loan_amount,
            credit_utilization: profile.credit_utilization / 100.0,
            missed_payments: profile.missed_payments,
            total_active_loans: profile.active_loans,
            credit_history_years: f64::from(profile.credit_history_length),
            loan_tenure_months: f64::from(profile.loan_tenure),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictionResponse {
    pub status: String,
    pub prediction: Prediction,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Prediction {
    pub credit_score_band: String,
    pub risk_score: f64, // 0-100, higher is riskier
    pub loan_decision: String,
    pub risk_level: String,
    pub suggested_interest_rate: String,
    pub approval_chance: String,
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
    #[serde(default)]
    pub insights: Insights,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
}

/// Coarse reading of `loan_decision`, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionKind {
    Approved,
    Review,
    Declined,
    Other,
}

impl Prediction {
    pub fn decision_kind(&self) -> DecisionKind {
        let decision = self.loan_decision.to_uppercase();
        if decision.contains("APPROVED") {
            DecisionKind::Approved
        } else if decision.contains("REVIEW") {
            DecisionKind::Review
        } else if decision.contains("DECLINED") {
            DecisionKind::Declined
        } else {
            DecisionKind::Other
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Insights {
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub score_analysis: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
    #[serde(default)]
    pub scaler_loaded: bool,
    #[serde(default)]
    pub encoder_loaded: bool,
    #[serde(default)]
    pub features_loaded: bool,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MetricsResponse {
    pub status: String,
    #[serde(default)]
    pub metrics: Option<ModelMetrics>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ModelMetrics {
    #[serde(default)]
    pub accuracy: f64,
    #[serde(default)]
    pub precision: f64,
    #[serde(default)]
    pub recall: f64,
    #[serde(default)]
    pub f1_score: f64,
    #[serde(default)]
    pub confusion_matrix: Vec<Vec<u64>>,
    /// Per-class entries plus whatever summary rows the trainer emitted.
    #[serde(default)]
    pub classification_report: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ClassReport {
    pub precision: f64,
    pub recall: f64,
    #[serde(rename = "f1-score")]
    pub f1_score: f64,
    #[serde(default)]
    pub support: f64,
}

/// Score bands in display order; the report is keyed by these names.
pub const SCORE_BANDS: [&str; 4] = ["Poor", "Fair", "Good", "Excellent"];

impl ModelMetrics {
    /// Per-band rows of the classification report, in band order.
    ///
    /// Summary rows (`accuracy`, `macro avg`, ...) and unknown keys are skipped.
    pub fn class_reports(&self) -> Vec<(String, ClassReport)> {
        SCORE_BANDS
            .iter()
            .filter_map(|band| {
                let value = self.classification_report.get(*band)?;
                let report = serde_json::from_value(value.clone()).ok()?;
                Some((band.to_string(), report))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureImportance {
    pub feature: String,
    pub importance: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FeatureImportanceResponse {
    pub status: String,
    #[serde(default)]
    pub total_features: usize,
    #[serde(default)]
    pub feature_importance: Vec<FeatureImportance>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SampleDataResponse {
    pub status: String,
    #[serde(default)]
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Sample {
    pub description: String,
    pub data: PredictRequest,
}

/// Everything the analytics dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub metrics: ModelMetrics,
    /// Sorted by importance, highest first.
    pub feature_importance: Vec<FeatureImportance>,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predict_request_from_profile() {
        let profile = FinancialProfile {
            age: 35,
            monthly_income: 75_000.0,
            total_loan_amount: 500_000.0,
            loan_tenure: 72,
            credit_utilization: 40.0,
            missed_payments: 1,
            active_loans: 2,
            credit_history_length: 7,
        };
        let request = PredictRequest::from(&profile);
        assert_eq!(request.credit_utilization, 0.4);
        assert_eq!(request.loan_amount, 500_000.0);
        assert_eq!(request.total_active_loans, 2);
        assert_eq!(request.loan_tenure_months, 72.0);

        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["credit_history_years"], 7.0);
        assert_eq!(body["missed_payments"], 1);
    }

    #[test]
    fn test_prediction_parse() {
        let body = json!({
            "status": "success",
            "prediction": {
                "credit_score_band": "Good",
                "risk_score": 34.5,
                "loan_decision": "APPROVED",
                "risk_level": "MODERATE",
                "suggested_interest_rate": "10.5% - 12.5%",
                "approval_chance": "High (75-90%)",
                "features": {"age": 35.0, "payment_reliability": 0.5},
                "insights": {
                    "warnings": [],
                    "recommendations": ["Good credit utilization ratio."],
                    "score_analysis": "Your credit score is categorized as 'Good'"
                },
                "timestamp": "2024-05-01T10:20:30.123456"
            }
        });
        let response: PredictionResponse = serde_json::from_value(body).unwrap();
        let prediction = response.prediction;
        assert_eq!(prediction.credit_score_band, "Good");
        assert_eq!(prediction.decision_kind(), DecisionKind::Approved);
        assert_eq!(prediction.features.len(), 2);
        assert_eq!(prediction.insights.recommendations.len(), 1);
        assert!(prediction.timestamp.is_some());
    }

    #[test]
    fn test_decision_kinds() {
        let mut prediction: Prediction = serde_json::from_value(json!({
            "credit_score_band": "Poor",
            "risk_score": 80.0,
            "loan_decision": "DECLINED",
            "risk_level": "VERY HIGH",
            "suggested_interest_rate": "N/A",
            "approval_chance": "Very Low (<25%)"
        }))
        .unwrap();
        assert_eq!(prediction.decision_kind(), DecisionKind::Declined);

        prediction.loan_decision = "REVIEW REQUIRED".to_string();
        assert_eq!(prediction.decision_kind(), DecisionKind::Review);

        prediction.loan_decision = "APPROVED WITH CONDITIONS".to_string();
        assert_eq!(prediction.decision_kind(), DecisionKind::Approved);
    }

    #[test]
    fn test_class_reports_skip_summary_rows() {
        let metrics: ModelMetrics = serde_json::from_value(json!({
            "accuracy": 0.85,
            "classification_report": {
                "Excellent": {"precision": 0.9, "recall": 0.88, "f1-score": 0.89, "support": 180},
                "Poor": {"precision": 0.8, "recall": 0.85, "f1-score": 0.82, "support": 170},
                "accuracy": 0.85,
                "macro avg": {"precision": 0.85, "recall": 0.84, "f1-score": 0.84, "support": 690}
            }
        }))
        .unwrap();
        let reports = metrics.class_reports();
        let names: Vec<&str> = reports.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Poor", "Excellent"]);
        assert_eq!(reports[1].1.f1_score, 0.89);
    }

    #[test]
    fn test_health_parse() {
        let health: HealthStatus = serde_json::from_value(json!({
            "status": "degraded",
            "model_loaded": false
        }))
        .unwrap();
        assert!(!health.is_healthy());
        assert!(!health.scaler_loaded);
    }

    #[test]
    fn test_sample_parse() {
        let samples: SampleDataResponse = serde_json::from_value(json!({
            "status": "success",
            "samples": [{
                "description": "Good credit applicant",
                "data": {
                    "age": 35, "monthly_income": 75000, "loan_amount": 500000,
                    "credit_utilization": 0.3, "missed_payments": 0,
                    "total_active_loans": 2, "credit_history_years": 8,
                    "loan_tenure_months": 60
                }
            }]
        }))
        .unwrap();
        assert_eq!(samples.samples.len(), 1);
        assert_eq!(samples.samples[0].data.age, 35.0);
    }
}
