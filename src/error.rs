use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;

use crate::notify::NotifyError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid CSV format: {0}")]
    InvalidCsv(String),

    #[error("CSV must include {0}")]
    MissingColumns(String),

    #[error("Invalid notify_type. Use 'email' or 'viber'.")]
    InvalidNotifyType,

    #[error("{0}")]
    NotFound(String),

    #[error("Notification failed: {0}")]
    Notify(#[from] NotifyError),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_)
            | ApiError::InvalidCsv(_)
            | ApiError::MissingColumns(_)
            | ApiError::InvalidNotifyType => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Notify(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            detail: self.to_string(),
        })
    }
}

impl From<actix_multipart::MultipartError> for ApiError {
    fn from(e: actix_multipart::MultipartError) -> Self {
        ApiError::BadRequest(format!("Invalid upload: {}", e))
    }
}
