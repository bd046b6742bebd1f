//! Error conversions
//!
//! HTTP rendering of [`AppError`] (feature `axum`).

#[cfg(feature = "axum")]
use super::app_error::AppError;

/// Failure payloads are `{"message": "..."}` with the mapped status code.
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({ "message": self.message() });

        (status, Json(body)).into_response()
    }
}

#[cfg(all(test, feature = "axum"))]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_status_mapping() {
        let response = AppError::bad_request("Incorrect username or password").into_response();
        assert_eq!(response.status().as_u16(), 400);

        let response = AppError::internal("An error has occurred").into_response();
        assert_eq!(response.status().as_u16(), 500);
    }

    #[tokio::test]
    async fn test_body_is_message_only() {
        let response = AppError::unauthorized("Not authenticated").into_response();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "message": "Not authenticated" }));
    }
}
