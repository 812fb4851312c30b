//! Amazon S3 backend.
//!
//! Objects are written with the `public-read` canned ACL and addressed
//! by virtual-hosted-style URLs
//! (`https://{bucket}.s3.{region}.amazonaws.com/{key}`), so the URL
//! persisted on the project record stays valid for the life of the
//! object.

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;

use crate::{BlobStore, StorageError};

/// S3-backed [`BlobStore`].
pub struct S3Store {
    client: aws_sdk_s3::Client,
    bucket: String,
    region: String,
}

impl S3Store {
    /// Load AWS config from the environment and connect.
    pub async fn connect(bucket: String, region: String) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()))
            .load()
            .await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            region,
        }
    }

    /// Wrap an existing client (tests, custom endpoints).
    pub fn with_client(client: aws_sdk_s3::Client, bucket: String, region: String) -> Self {
        Self {
            client,
            bucket,
            region,
        }
    }
}

#[async_trait::async_trait]
impl BlobStore for S3Store {
    async fn put_public(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Upload {
                key: key.to_string(),
                detail: aws_sdk_s3::error::DisplayErrorContext(e).to_string(),
            })?;
        Ok(self.public_url(key))
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false)
                {
                    Ok(false)
                } else {
                    Err(StorageError::Lookup {
                        key: key.to_string(),
                        detail: aws_sdk_s3::error::DisplayErrorContext(err).to_string(),
                    })
                }
            }
        }
    }

    async fn make_public(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .put_object_acl()
            .bucket(&self.bucket)
            .key(key)
            .acl(ObjectCannedAcl::PublicRead)
            .send()
            .await
            .map_err(|e| StorageError::Publish {
                key: key.to_string(),
                detail: aws_sdk_s3::error::DisplayErrorContext(e).to_string(),
            })?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, key)
    }

    fn parse_key(&self, url: &str) -> Option<String> {
        key_from_public_url(&self.bucket, &self.region, url)
    }
}

/// Virtual-hosted-style public URL for an object.
pub fn public_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{bucket}.s3.{region}.amazonaws.com/{key}")
}

/// Extract the object key from a URL produced by
/// [`public_object_url`] for the same bucket and region.
pub fn key_from_public_url(bucket: &str, region: &str, url: &str) -> Option<String> {
    let prefix = format!("https://{bucket}.s3.{region}.amazonaws.com/");
    let key = url.strip_prefix(&prefix)?;
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
