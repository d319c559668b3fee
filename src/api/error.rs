use std::fmt;

/// Message shown when a prediction fails without a backend explanation.
pub const PREDICTION_FAILED: &str = "Failed to make prediction";

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never got a response (connection refused, timeout, ...).
    Network(String),
    /// The API answered with a non-success status.
    Status { status: u16, detail: Option<String> },
    /// The API answered 2xx with `"status": "error"`.
    Backend(String),
    /// The response body did not have the expected shape.
    Decode(String),
}

impl ApiError {
    /// The backend's own explanation when it sent one, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Backend(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "Network error: {}", msg),
            ApiError::Status {
                status,
                detail: Some(detail),
            } => write!(f, "API returned {}: {}", status, detail),
            ApiError::Status {
                status,
                detail: None,
            } => write!(f, "API returned {}", status),
            ApiError::Backend(msg) => write!(f, "API error: {}", msg),
            ApiError::Decode(msg) => write!(f, "Unexpected API response: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pull `detail` out of an error body like `{"detail": "Income must be positive"}`.
///
/// Non-string details (validation error lists) are kept as compact JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_string_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Income must be positive"}"#),
            Some("Income must be positive".to_string())
        );
    }

    #[test]
    fn test_extract_structured_detail() {
        let detail = extract_detail(r#"{"detail": [{"loc": ["body", "age"]}]}"#).unwrap();
        assert!(detail.contains("\"age\""));
    }

    #[test]
    fn test_extract_detail_missing() {
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail("<html>502</html>"), None);
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("Loan tenure must be positive".to_string()),
        };
        assert_eq!(err.user_message(PREDICTION_FAILED), "Loan tenure must be positive");
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message(PREDICTION_FAILED), "Failed to make prediction");
        let err = ApiError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(PREDICTION_FAILED), "Failed to make prediction");
    }

    #[test]
    fn test_display() {
        let err = ApiError::Status {
            status: 400,
            detail: Some("bad".to_string()),
        };
        assert_eq!(err.to_string(), "API returned 400: bad");
    }
}
