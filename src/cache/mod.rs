mod cache_keys;
mod cache_set;
mod janitor;
mod memo_cache;

pub use cache_keys::{BucketedPoint, PositionKey, ScalarKey, SpanKey, altitude_center, bucket_altitude};
pub use cache_set::{CacheStats, EngineCaches, SweepableCache};
pub use janitor::CacheJanitor;
pub use memo_cache::MemoCache;
