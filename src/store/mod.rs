pub mod traits;
pub mod http;
pub mod local;
pub mod memory;

pub use http::HttpSeriesStore;
pub use local::LocalSeriesStore;
pub use memory::MemoryStore;
pub use traits::SeriesStore;

use crate::config::StoreConfig;
use crate::model::StoreError;

/// Builds the store named by the config.
pub fn from_config(cfg: &StoreConfig) -> Result<Box<dyn SeriesStore>, StoreError> {
    let store: Box<dyn SeriesStore> = match cfg {
        StoreConfig::Http { base_url } => Box::new(HttpSeriesStore::new(base_url)?),
        StoreConfig::Local { root } => Box::new(LocalSeriesStore::new(root.clone())),
    };
    Ok(store)
}
