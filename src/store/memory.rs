use crate::model::StoreError;
use crate::store::traits::SeriesStore;

use std::collections::HashMap;

/// In-memory store for tests and offline runs.
#[derive(Default)]
pub struct MemoryStore {
    objects: HashMap<String, String>,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, key: impl Into<String>, body: impl Into<String>) -> Self {
        self.objects.insert(key.into(), body.into());
        self
    }

    /// Every fetch errors, as if the backing service were unreachable.
    pub fn failing() -> Self {
        Self {
            objects: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait::async_trait]
impl SeriesStore for MemoryStore {
    async fn fetch(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail {
            return Err(StoreError::Http("store unreachable".into()));
        }
        Ok(self.objects.get(key).cloned())
    }
}
