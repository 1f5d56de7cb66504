use std::path::PathBuf;
use async_trait::async_trait;
use uuid::Uuid;
use fg_core::error::DownloadError;
use fg_core::service::DownloadSink;

/// Writes downloads into a directory. Bytes are staged in a `.part`
/// file and renamed into place, so a half-written image never carries
/// the final name.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for FileSink {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, DownloadError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let staging = self.dir.join(format!(".{}.part", Uuid::new_v4()));
        let target = self.dir.join(file_name);

        tokio::fs::write(&staging, bytes).await?;
        if let Err(e) = tokio::fs::rename(&staging, &target).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(e.into());
        }

        Ok(target)
    }
}
