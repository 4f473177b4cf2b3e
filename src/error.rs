use std::collections::BTreeMap;

use agrolead_lead::{Field, StatusView};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error")]
    Validation(BTreeMap<Field, String>),

    #[error("Lead endpoint failed: {message}")]
    Upstream { view: StatusView, message: String },

    #[error("Submission already in progress")]
    Conflict,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "errors": errors })),
            )
                .into_response(),
            ApiError::Upstream { view, .. } => (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "status": view.status, "view": view })),
            )
                .into_response(),
            ApiError::Conflict => (
                StatusCode::CONFLICT,
                Json(json!({ "error": "submission_in_progress" })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal" })),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrolead_lead::{Locale, SubmissionStatus, present};

    #[test]
    fn test_status_codes() {
        let errors = BTreeMap::from([(Field::Email, "Invalid email".to_string())]);
        assert_eq!(
            ApiError::Validation(errors).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );

        let view = present(SubmissionStatus::Error, Locale::En);
        let upstream = ApiError::Upstream {
            view,
            message: "status 500".to_string(),
        };
        assert_eq!(upstream.into_response().status(), StatusCode::BAD_GATEWAY);

        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("boom"))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
