use crate::model::StoreError;

/// Key-addressable blob store holding the raw series files.
#[async_trait::async_trait]
pub trait SeriesStore: Send + Sync {
    /// Returns `Ok(None)` when no object exists under `key`.
    async fn fetch(&self, key: &str) -> Result<Option<String>, StoreError>;
}
