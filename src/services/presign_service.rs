//! src/services/presign_service.rs
//!
//! Presigning of PUT URLs against an S3-compatible store (Cloudflare R2).
//! The SDK client is built once from static credentials and shared by every
//! request; it carries no per-request state.

use crate::config::AppConfig;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::{
    Client,
    config::{Credentials, Region},
    presigning::PresigningConfig,
};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// R2 ignores the region but SigV4 still needs one.
const R2_REGION: &str = "auto";

#[derive(Debug, Error)]
pub enum PresignError {
    #[error("invalid presigning config: {0}")]
    Config(String),
    #[error("storage sdk error: {0}")]
    Sdk(String),
}

pub type PresignResult<T> = Result<T, PresignError>;

/// Issues a URL that authorizes a single PUT of `key` into `bucket`.
#[async_trait]
pub trait PresignPut: Send + Sync {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> PresignResult<String>;
}

#[derive(Clone)]
pub struct R2Presigner {
    client: Client,
}

impl R2Presigner {
    /// Build the shared S3 client from the configured endpoint and credentials.
    pub async fn new(cfg: &AppConfig) -> Self {
        let credentials = Credentials::new(
            cfg.access_key_id.clone(),
            cfg.secret_access_key.clone(),
            None,
            None,
            "static",
        );

        let shared_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(R2_REGION))
            .credentials_provider(credentials)
            .endpoint_url(cfg.endpoint.clone())
            .load()
            .await;

        debug!("S3 client configured for endpoint {}", cfg.endpoint);

        Self {
            client: Client::new(&shared_config),
        }
    }
}

#[async_trait]
impl PresignPut for R2Presigner {
    async fn presign_put(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> PresignResult<String> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| PresignError::Config(e.to_string()))?;

        let presigned = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning_config)
            .await
            .map_err(|e| PresignError::Sdk(e.to_string()))?;

        Ok(presigned.uri().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            upload_password: "pw".into(),
            account_id: "acct".into(),
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
            bucket_name: "uploads".into(),
            endpoint: crate::config::r2_endpoint("acct"),
        }
    }

    #[tokio::test]
    async fn presigns_put_without_network() {
        let presigner = R2Presigner::new(&test_config()).await;

        let url = presigner
            .presign_put("uploads", "alice/1-photo.png", Duration::from_secs(3600))
            .await
            .unwrap();

        assert!(url.starts_with("https://"));
        assert!(url.contains("acct.r2.cloudflarestorage.com"));
        assert!(url.contains("alice/1-photo.png"));
        assert!(url.contains("X-Amz-Expires=3600"));
        assert!(url.contains("X-Amz-Signature="));
    }
}
