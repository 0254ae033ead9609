use crate::model::StoreError;
use crate::store::traits::SeriesStore;

use std::io::ErrorKind;
use std::path::PathBuf;

/// Directory-backed store using the bucket's key layout as relative paths.
pub struct LocalSeriesStore {
    root: PathBuf,
}

impl LocalSeriesStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait::async_trait]
impl SeriesStore for LocalSeriesStore {
    async fn fetch(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.root.join(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        }
    }
}
