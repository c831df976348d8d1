//! Single-flight, TTL-aware caching of asynchronously computed values.
//!
//! A [`CachedAsyncValue`] holds one value that is expensive to fetch
//! (a configuration document, a bearer token, a style list). It guarantees:
//!
//! - at most one computation in flight per cache; callers arriving while a
//!   fetch is pending wait on that fetch instead of starting another;
//! - a resolved value is served to every caller until it expires;
//! - the first caller after expiry starts exactly one fresh fetch;
//! - failures are shared with everyone waiting but never cached.
//!
//! Expiry uses [`tokio::time::Instant`], so tests can drive it with
//! `tokio::time::pause` and `advance`.

mod value;

pub use value::{CachedAsyncValue, Lifetime};
