use axum::response::Html;

pub mod file_upload;
pub mod validation;

const INDEX_HTML: &str = include_str!("../../static/index.html");

/// Serve the upload form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health_check() -> &'static str {
    "Upload Service is healthy"
}
