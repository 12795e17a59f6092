//! Client-side query cache.
//!
//! Views read server data through [`QueryCache`], addressed by [`QueryKey`].
//! The cache itself does no I/O; the driver (a Dioxus hook or the CLI) asks
//! whether a key needs fetching, takes a [`FetchTicket`], runs the request
//! through [`run_with_retry`], and hands the result back.
//!
//! ```text
//!   view renders ──► state(key) ──► Idle | Loading | Error | Success
//!        │
//!        └─► needs_fetch(key)? ──► begin_fetch(key) ──► ticket
//!                                         │
//!                         run_with_retry(request) ──► complete(ticket, result)
//!
//!   mutation succeeds ──► apply(effects) ──► Invalidate(prefix) | Overwrite(key)
//! ```

mod cache;
pub mod effects;
mod key;
mod retry;

#[cfg(test)]
mod cache_tests;

pub use cache::{CachedValue, FetchTicket, QueryCache, QueryState};
pub use effects::CacheEffect;
pub use key::{QueryKey, keys};
pub use retry::{RetryPolicy, run_with_retry};
