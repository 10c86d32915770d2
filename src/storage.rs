//! Object storage for product images.
//!
//! Objects live in one bucket, keyed by path. Uploaded paths are what the
//! products table stores; [`ImageStore::public_url`] turns them into links.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::actor_framework::{Entity, FrameworkError, ResourceClient};

/// Shown when a product has no image.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum StorageError {
    #[error("Cannot upload an empty file: {0}")]
    EmptyUpload(String),
    #[error("Object not found: {0}")]
    NotFound(String),
    #[error("Storage backend error: {0}")]
    Backend(FrameworkError),
}

impl From<FrameworkError> for StorageError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { id, .. } => StorageError::NotFound(id),
            other => StorageError::Backend(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub path: String,
    pub bytes: Vec<u8>,
}

impl Entity for StoredObject {
    type Id = String;
    type CreateParams = StoredObject;
    type Update = ();
    type Action = ();
    type ActionResult = ();

    const TABLE: &'static str = "objects";

    fn preset_id(params: &StoredObject) -> Option<String> {
        Some(params.path.clone())
    }

    fn from_create_params(path: String, params: StoredObject) -> Result<Self, String> {
        Ok(Self { path, bytes: params.bytes })
    }

    fn on_update(&mut self, _update: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self { file_name: file_name.into(), bytes: bytes.into() }
    }

    fn extension(&self) -> &str {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext,
            _ => "bin",
        }
    }
}

#[derive(Clone)]
pub struct ImageStore {
    inner: ResourceClient<StoredObject>,
    bucket: String,
    public_base_url: String,
    sequence: Arc<AtomicU64>,
}

impl ImageStore {
    pub fn new(
        inner: ResourceClient<StoredObject>,
        bucket: impl Into<String>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            inner,
            bucket: bucket.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            sequence: Arc::new(AtomicU64::new(1)),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Stores the file under `{owner_id}/{millis}-{n}.{ext}` and returns that path.
    #[instrument(
        skip(self, upload),
        fields(file_name = %upload.file_name, size = upload.bytes.len())
    )]
    pub async fn upload(
        &self,
        owner_id: &str,
        upload: ImageUpload,
    ) -> Result<String, StorageError> {
        if upload.bytes.is_empty() {
            return Err(StorageError::EmptyUpload(upload.file_name));
        }
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        let millis = Utc::now().timestamp_millis();
        let path = format!("{}/{}-{}.{}", owner_id, millis, n, upload.extension());

        debug!("Sending request");
        self.inner.create(StoredObject { path: path.clone(), bytes: upload.bytes }).await?;
        info!(path = %path, "Image uploaded");
        Ok(path)
    }

    /// Uploads every file in order. On the first failure the files already
    /// stored by this call are removed again.
    pub async fn upload_all(
        &self,
        owner_id: &str,
        uploads: Vec<ImageUpload>,
    ) -> Result<Vec<String>, StorageError> {
        let mut paths = Vec::with_capacity(uploads.len());
        for upload in uploads {
            match self.upload(owner_id, upload).await {
                Ok(path) => paths.push(path),
                Err(e) => {
                    self.remove_all(&paths).await;
                    return Err(e);
                }
            }
        }
        Ok(paths)
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, path: &str) -> Result<(), StorageError> {
        debug!("Sending request");
        self.inner.delete(path.to_string()).await?;
        info!("Image removed");
        Ok(())
    }

    /// Best-effort removal of uploads that ended up unused.
    pub async fn remove_all(&self, paths: &[String]) {
        for path in paths {
            if let Err(e) = self.remove(path).await {
                warn!(path = %path, error = %e, "Could not remove image");
            }
        }
    }

    /// Paths stored under `owner_id`, in upload order.
    #[instrument(skip(self))]
    pub async fn list_owned(&self, owner_id: &str) -> Result<Vec<String>, StorageError> {
        debug!("Sending request");
        let prefix = format!("{}/", owner_id);
        let objects = self.inner.list().await?;
        Ok(objects.into_iter().map(|o| o.path).filter(|p| p.starts_with(&prefix)).collect())
    }

    #[instrument(skip(self))]
    pub async fn download(&self, path: &str) -> Result<Vec<u8>, StorageError> {
        debug!("Sending request");
        self.inner
            .get(path.to_string())
            .await?
            .map(|object| object.bytes)
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    /// Resolves a stored path to a link. Absolute URLs pass through unchanged.
    pub fn public_url(&self, path: &str) -> String {
        if path.is_empty() {
            return PLACEHOLDER_IMAGE.to_string();
        }
        if path.starts_with("http") {
            return path.to_string();
        }
        format!("{}/{}/{}", self.public_base_url, self.bucket, path)
    }

    /// Link for a product's cover image, or the placeholder.
    pub fn cover_url(&self, image_urls: &[String]) -> String {
        image_urls
            .first()
            .map(|path| self.public_url(path))
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string())
    }
}
