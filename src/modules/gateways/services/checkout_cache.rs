use moka::future::Cache;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Checkout URLs already issued by a provider, keyed by cache key.
///
/// Entries expire after a fixed time-to-live; there is no other eviction
/// policy beyond the capacity bound.
#[derive(Clone)]
pub struct CheckoutUrlCache {
    inner: Cache<String, String>,
}

impl CheckoutUrlCache {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    pub fn new(ttl: Duration) -> Self {
        let inner = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(10_000)
            .build();
        Self { inner }
    }

    /// Return the cached URL for `key`, or run `init` and cache its result.
    ///
    /// Concurrent callers for the same key share a single `init` run. Errors
    /// are returned to every waiter and are not cached.
    pub async fn get_or_try_insert_with<F, E>(
        &self,
        key: String,
        init: F,
    ) -> Result<String, Arc<E>>
    where
        F: Future<Output = Result<String, E>>,
        E: Send + Sync + 'static,
    {
        self.inner.try_get_with(key, init).await
    }
}

impl Default for CheckoutUrlCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
