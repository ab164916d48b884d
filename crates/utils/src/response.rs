use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// JSON envelope for transport-level results
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope() {
        let json = serde_json::to_value(ApiResponse::<()>::error("Flow execution not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Flow execution not found");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let response = ApiResponse::success(vec![1, 2]);
        assert!(response.is_success());
        assert_eq!(response.into_data(), Some(vec![1, 2]));
    }
}
