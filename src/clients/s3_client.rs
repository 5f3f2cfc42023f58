//! S3 upload storage

use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;

use super::ImageStore;
use crate::core::models::{IMAGE_CONTENT_TYPE, StoredObject};
use crate::errors::AlertError;

pub struct S3ImageStore {
    client: S3Client,
}

impl S3ImageStore {
    pub fn new(client: S3Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn put(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<StoredObject, AlertError> {
        let output = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(IMAGE_CONTENT_TYPE)
            .body(ByteStream::from(bytes.to_vec()))
            .send()
            .await
            .map_err(|e| {
                AlertError::StorageError(format!(
                    "put_object s3://{bucket}/{key}: {}",
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(StoredObject {
            e_tag: output.e_tag().map(ToString::to_string),
        })
    }
}
