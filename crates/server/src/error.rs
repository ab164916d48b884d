use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use crew::CrewError;
use thiserror::Error;
use utils::response::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Crew(#[from] CrewError),
    #[error("Bad Request: {0}")]
    BadRequest(String),
    #[error("Not Found: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_type) = match &self {
            ApiError::Crew(err) => match err {
                CrewError::Validation(_) => (StatusCode::BAD_REQUEST, "ValidationError"),
                _ => (StatusCode::INTERNAL_SERVER_ERROR, "CrewError"),
            },
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BadRequest"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NotFound"),
        };

        let error_message = match &self {
            ApiError::Crew(CrewError::Validation(msg))
            | ApiError::BadRequest(msg)
            | ApiError::NotFound(msg) => msg.clone(),
            _ => format!("{}: {}", error_type, self),
        };

        if status_code.is_server_error() {
            tracing::error!("{} ({})", error_message, status_code);
        }

        (status_code, Json(ApiResponse::<()>::error(&error_message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_keeps_detail() {
        let (status, body) = render(ApiError::NotFound("Flow execution not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Flow execution not found");
    }

    #[tokio::test]
    async fn test_validation_is_client_error() {
        let err = ApiError::from(CrewError::Validation("title must not be empty".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "title must not be empty");
    }

    #[tokio::test]
    async fn test_other_errors_are_server_errors() {
        let err = ApiError::from(CrewError::InvalidTransition("completed -> running".into()));
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["message"].as_str().unwrap().starts_with("CrewError: "));
    }
}
