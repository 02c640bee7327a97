use axum::{
    extract::{
        multipart::{Field, MultipartRejection},
        Multipart, State,
    },
    Json,
};
use bytes::{Bytes, BytesMut};

use super::validation::{sanitize_filename, validate_file_size, validate_mime_type};
use crate::error::{UploadError, UploadResult};
use crate::models::{UploadRequest, UploadResponse};
use crate::AppState;

/// Multipart field carrying the upload
const FILE_FIELD: &str = "file";

/// Handle a single-file upload and relay it to object storage
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> UploadResult<Json<UploadResponse>> {
    tracing::info!("Received file upload request");

    relay_upload(&state, multipart).await.map(Json).map_err(|e| {
        if e.is_validation() {
            tracing::warn!("Rejected upload: {}", e);
        } else {
            tracing::error!("Failed to store upload: {}", e);
        }
        e
    })
}

async fn relay_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
) -> UploadResult<UploadResponse> {
    let upload = extract_upload(multipart).await?;

    tracing::info!(
        "File received: filename={}, size={} bytes, content_type={}",
        upload.filename,
        upload.size,
        upload.declared_mime_type
    );

    state
        .storage
        .put_object(
            upload.filename.clone(),
            upload.content,
            upload.declared_mime_type,
        )
        .await?;

    let url = state.storage.public_url(&upload.filename);
    tracing::info!("File uploaded successfully: key={}, url={}", upload.filename, url);

    Ok(UploadResponse { url })
}

/// Pull the `file` part out of the form and validate it.
///
/// Checks run in a fixed order: presence, filename, size, then type, so an
/// oversized file is reported as such whatever its declared type.
async fn extract_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> UploadResult<UploadRequest> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!("Request is not multipart: {}", rejection.body_text());
        UploadError::MissingFile
    })?;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::InvalidMultipart(e.body_text()))?
    {
        let field_name = field.name().unwrap_or("unknown").to_string();
        tracing::debug!("Processing field: {}", field_name);

        if field_name != FILE_FIELD {
            continue;
        }

        // A part without a filename parameter is an ordinary form value.
        let Some(raw_filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        if raw_filename.trim().is_empty() {
            return Err(UploadError::EmptyFilename);
        }

        let filename = sanitize_filename(&raw_filename);
        if filename.is_empty() {
            return Err(UploadError::InvalidFilename);
        }

        let declared = field.content_type().map(str::to_owned);
        let content = read_bounded(&mut field).await?;
        let declared_mime_type = validate_mime_type(declared.as_deref())?;

        return Ok(UploadRequest {
            filename,
            size: content.len(),
            content,
            declared_mime_type,
        });
    }

    Err(UploadError::MissingFile)
}

/// Buffer a field, giving up as soon as it crosses the size ceiling
async fn read_bounded(field: &mut Field<'_>) -> UploadResult<Bytes> {
    let mut buffer = BytesMut::new();

    while let Some(chunk) = field
        .chunk()
        .await
        .map_err(|e| UploadError::InvalidMultipart(e.body_text()))?
    {
        validate_file_size(buffer.len() + chunk.len())?;
        buffer.extend_from_slice(&chunk);
    }

    Ok(buffer.freeze())
}
