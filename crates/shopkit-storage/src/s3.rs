use crate::traits::{ObjectStorage, PutReceipt, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::{
    Attribute, Attributes, Error as ObjectStoreError, ObjectStore, PutMode, PutOptions,
    PutPayload, PutResult,
};

/// Turn a raw put result into a receipt. A put that "succeeds" without any
/// confirmation data (neither etag nor version) is treated as a failure
/// rather than silently trusted.
fn confirm_receipt(result: PutResult, key: &str, size_bytes: u64) -> StorageResult<PutReceipt> {
    if result.e_tag.is_none() && result.version.is_none() {
        return Err(StorageError::WriteFailed(
            "storage write returned no confirmation".to_string(),
        ));
    }

    Ok(PutReceipt {
        key: key.to_string(),
        size_bytes,
    })
}

/// S3 storage implementation
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - Bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Classify a raw provider error into the storage taxonomy. This is the
    /// single place that inspects provider error prose; a missing bucket shows
    /// up as a generic put failure whose message names the bucket.
    fn classify_put_error(&self, key: &str, err: ObjectStoreError) -> StorageError {
        match err {
            ObjectStoreError::AlreadyExists { .. } => StorageError::AlreadyExists(key.to_string()),
            ObjectStoreError::NotFound { .. } => StorageError::BucketNotFound(format!(
                "bucket \"{}\" not found ({})",
                self.bucket, err
            )),
            other => {
                let msg = other.to_string();
                let lower = msg.to_lowercase();
                if lower.contains("nosuchbucket")
                    || lower.contains("bucket not found")
                    || lower.contains("does not exist")
                {
                    StorageError::BucketNotFound(format!(
                        "bucket \"{}\" not found ({})",
                        self.bucket, msg
                    ))
                } else {
                    StorageError::WriteFailed(msg)
                }
            }
        }
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put_new(
        &self,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> StorageResult<PutReceipt> {
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = Path::from(key.to_string());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());

        let mut opts = PutOptions::from(PutMode::Create);
        opts.attributes = attributes;

        let start = std::time::Instant::now();

        let result = self
            .store
            .put_opts(&location, PutPayload::from(bytes), opts)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 write failed"
                );
                self.classify_put_error(key, e)
            })?;

        let receipt = confirm_receipt(result, key, size)?;

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 write successful"
        );

        Ok(receipt)
    }

    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses the endpoint URL (path-style) if provided.
    fn public_url(&self, key: &str) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/{}", base_url, self.bucket, key)
        } else {
            format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            )
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
