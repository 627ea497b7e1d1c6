//! Directory-backed object store for local runs.
//!
//! Objects live at `{root}/{bucket}/{key}`, so the key layout on disk mirrors
//! what the functions would write to S3.

use std::path::PathBuf;

use tokio::fs;
use tracing::{info, instrument};

use super::ObjectStore;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, bucket: &str, key: &str) -> PathBuf {
        self.root.join(bucket).join(key)
    }
}

impl ObjectStore for LocalStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        Ok(fs::read(self.path_for(bucket, key)).await?)
    }

    #[instrument(level = "info", skip(self, body), fields(bytes = body.len()))]
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        let path = self.path_for(bucket, key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, body).await?;
        info!(path = %path.display(), "Wrote object");
        Ok(())
    }
}
