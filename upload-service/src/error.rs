use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::storage::StorageError;

/// Every way an upload request can fail
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("Invalid filename")]
    InvalidFilename,

    #[error("Invalid multipart: {0}")]
    InvalidMultipart(String),

    #[error("File too large")]
    FileTooLarge,

    #[error("File type not allowed")]
    TypeNotAllowed,

    #[error("{0}")]
    Storage(#[from] StorageError),
}

pub type UploadResult<T> = Result<T, UploadError>;

impl UploadError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            UploadError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Client-side validation failures, as opposed to backend failures
    pub fn is_validation(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}
