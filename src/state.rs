//! Shared, read-only state handed to every request.

use crate::services::presign_service::PresignPut;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Shared secret uploaders must present.
    pub upload_password: Arc<str>,
    /// Bucket every URL is signed for.
    pub bucket_name: Arc<str>,
    pub presigner: Arc<dyn PresignPut>,
}

impl AppState {
    pub fn new(
        upload_password: impl Into<Arc<str>>,
        bucket_name: impl Into<Arc<str>>,
        presigner: Arc<dyn PresignPut>,
    ) -> Self {
        Self {
            upload_password: upload_password.into(),
            bucket_name: bucket_name.into(),
            presigner,
        }
    }
}
