use async_trait::async_trait;

use crate::error::Result;

/// Supplies the full ordered raw transcript, fetched once at the start
/// of a reconstruction.
pub trait HistorySource {
    fn load(&self) -> Result<Vec<String>>;
}

/// Converts a file path into a base64 payload for inline display.
///
/// Any error (or an empty payload) is a soft failure for the resolver:
/// it falls back to a placeholder and never aborts the pipeline.
#[async_trait]
pub trait AssetSource: Send + Sync {
    async fn read_base64(&self, path: &str) -> Result<String>;
}
