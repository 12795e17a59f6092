pub mod adventure;
pub mod api;
pub mod config;
pub mod query;
pub mod search;

// Re-exports for convenience
pub use adventure::{AdventureResultView, MonsterView, Outcome, hp_percent, tier_color};
pub use api::{ApiClient, ApiError, AuthToken};
pub use config::ClientConfig;
#[cfg(not(target_arch = "wasm32"))]
pub use config::ConfigError;
pub use habitquest_types as types;
pub use query::{CacheEffect, QueryCache, QueryKey, QueryState, RetryPolicy, keys};
pub use search::{Debouncer, normalize_search};
