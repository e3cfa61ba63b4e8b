use crate::error::Result;
use crate::storage::HistoryStorage;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// A slot backed by a JSON file on the local disk.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write leaves either the old or the new contents.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl HistoryStorage for FileStorage {
    async fn read(&self) -> Result<Option<String>> {
        trace!(path = %self.path.display(), "reading history file");
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, contents).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), bytes = contents.len(), "wrote history file");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "removed history file");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
