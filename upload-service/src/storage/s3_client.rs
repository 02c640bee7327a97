//! S3 object storage client
//!
//! Thin wrapper over `aws-sdk-s3` holding the bucket and region the service
//! was configured with. The client is built once at startup and shared
//! read-only across requests.

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::{debug, error, info};

use super::{public_object_url, ObjectStorage, StorageError};
use crate::config::StorageConfig;

const CREDENTIALS_PROVIDER: &str = "upload-service-env";

pub struct S3Storage {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Storage {
    /// Create a new S3 client from static credentials
    pub async fn new(config: &StorageConfig) -> Self {
        info!(
            "Initializing S3 client for bucket: {} ({})",
            config.bucket_name, config.region
        );

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        Self::from_client(Client::new(&sdk_config), config)
    }

    /// Wrap an already-built SDK client
    pub fn from_client(client: Client, config: &StorageConfig) -> Self {
        Self {
            client,
            bucket: config.bucket_name.clone(),
            region: config.region.clone(),
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_object(
        &self,
        key: String,
        body: Bytes,
        content_type: String,
    ) -> Result<(), StorageError> {
        debug!("Uploading object to S3: {} ({} bytes)", key, body.len());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                let message = DisplayErrorContext(&e).to_string();
                error!("S3 put failed for {}: {}", key, message);
                StorageError::Backend(message)
            })?;

        info!("Object uploaded successfully: s3://{}/{}", self.bucket, key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, key)
    }
}
