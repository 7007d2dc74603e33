use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lyraview_core::{AssetSource, HistorySource, Result, TranscriptError};

/// History source backed by a plain log file, one entry per line.
pub struct FileHistorySource {
    path: PathBuf,
}

impl FileHistorySource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HistorySource for FileHistorySource {
    fn load(&self) -> Result<Vec<String>> {
        let raw = fs::read_to_string(&self.path).map_err(|source| TranscriptError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(raw.lines().map(ToString::to_string).collect())
    }
}

/// Asset source that reads image files from disk, resolving relative
/// paths against a configured root.
pub struct FsAssetSource {
    root: PathBuf,
}

impl FsAssetSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn full_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.root.join(path)
        }
    }
}

#[async_trait]
impl AssetSource for FsAssetSource {
    async fn read_base64(&self, path: &str) -> Result<String> {
        let full = self.full_path(path);
        let bytes = tokio::fs::read(&full)
            .await
            .map_err(|source| TranscriptError::Io { path: full, source })?;
        Ok(STANDARD.encode(bytes))
    }
}
