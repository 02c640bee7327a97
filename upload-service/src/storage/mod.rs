// Storage module for S3 integration

pub mod s3_client;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use s3_client::S3Storage;

/// Storage error types
#[derive(Debug, Error)]
pub enum StorageError {
    /// Raw backend failure text, surfaced to the caller unchanged
    #[error("{0}")]
    Backend(String),
}

/// Object storage capability used by the upload handler.
///
/// A single atomic put plus the rule that turns a key into its public
/// address. Writes to an existing key replace the stored object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(
        &self,
        key: String,
        body: Bytes,
        content_type: String,
    ) -> Result<(), StorageError>;

    fn public_url(&self, key: &str) -> String;
}

/// Public virtual-hosted-style address of an object
pub fn public_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}
