// In-memory expiring cache.
// Memoizes upstream lookups per entity key, including definitive "absent" answers.

mod lock;
pub mod store;

pub use store::{Cached, CachedData, ExpiringCache};
