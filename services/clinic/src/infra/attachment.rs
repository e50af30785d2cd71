use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use bytes::Bytes;

use crate::domain::repository::AttachmentStore;
use crate::error::ClinicError;

/// Attachment store backed by a local directory. Keys are flat sanitized filenames.
#[derive(Clone)]
pub struct LocalAttachmentStore {
    root: Arc<PathBuf>,
}

impl LocalAttachmentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Arc::new(root.into()),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl AttachmentStore for LocalAttachmentStore {
    async fn put(&self, key: &str, bytes: Bytes) -> Result<(), ClinicError> {
        tokio::fs::create_dir_all(self.root.as_path())
            .await
            .context("create upload dir")?;
        tokio::fs::write(self.path(key), &bytes)
            .await
            .with_context(|| format!("write attachment {key}"))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Bytes>, ClinicError> {
        match tokio::fs::read(self.path(key)).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("read attachment {key}"))
                .into()),
        }
    }

    async fn remove(&self, key: &str) -> Result<(), ClinicError> {
        match tokio::fs::remove_file(self.path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove attachment {key}"))
                .into()),
        }
    }
}
