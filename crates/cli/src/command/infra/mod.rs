mod cache;

pub use cache::{MapCacheAdapter, MapSnapshot};
