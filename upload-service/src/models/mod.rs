use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// A validated upload, alive only for the duration of one request
#[derive(Debug, Clone)]
pub struct UploadRequest {
    /// Sanitized name, used verbatim as the storage key
    pub filename: String,
    pub content: Bytes,
    /// MIME essence from the part's Content-Type header
    pub declared_mime_type: String,
    /// Measured by the handler, never taken from the client
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
