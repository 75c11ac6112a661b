//! Catalog cache over a live model listing.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use playground_providers::{Client, ProviderError};
use playground_types::{Catalog, SharedCatalog, build_catalog};

/// Anything that can list provider model identifiers.
pub trait CatalogSource {
    fn fetch_model_ids(&self) -> impl Future<Output = Result<Vec<String>, ProviderError>> + Send;
}

impl CatalogSource for Client {
    fn fetch_model_ids(&self) -> impl Future<Output = Result<Vec<String>, ProviderError>> + Send {
        self.list_models()
    }
}

/// Time source for expiry checks.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug)]
struct Cached {
    built_at: Instant,
    catalog: SharedCatalog,
}

/// Holds the last built catalog for a fixed TTL.
///
/// `get` rebuilds when nothing is cached, the TTL has elapsed, or
/// `invalidate` was called. A failed listing still produces a catalog (the
/// static defaults) and that result is cached like any other.
#[derive(Debug)]
pub struct CatalogCache<C = SystemClock> {
    static_defaults: Catalog,
    ttl: Duration,
    clock: C,
    cached: Option<Cached>,
}

impl CatalogCache<SystemClock> {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, SystemClock)
    }
}

impl<C: Clock> CatalogCache<C> {
    #[must_use]
    pub fn with_clock(ttl: Duration, clock: C) -> Self {
        Self {
            static_defaults: Catalog::static_defaults(),
            ttl,
            clock,
            cached: None,
        }
    }

    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.cached.as_ref().is_some_and(|cached| {
            self.clock.now().saturating_duration_since(cached.built_at) < self.ttl
        })
    }

    /// The cached snapshot, fresh or not.
    #[must_use]
    pub fn peek(&self) -> Option<&SharedCatalog> {
        self.cached.as_ref().map(|cached| &cached.catalog)
    }

    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            tracing::debug!("Catalog cache invalidated");
        }
    }

    pub async fn get<S: CatalogSource>(&mut self, source: &S) -> SharedCatalog {
        if self.is_fresh()
            && let Some(cached) = &self.cached
        {
            return Arc::clone(&cached.catalog);
        }

        let fetched = source.fetch_model_ids().await;
        if let Err(err) = &fetched {
            tracing::warn!(error = %err, "Model listing failed; using built-in catalog");
        }
        let catalog = Arc::new(build_catalog(&self.static_defaults, fetched));
        tracing::info!(models = catalog.len(), "Catalog rebuilt");

        self.cached = Some(Cached {
            built_at: self.clock.now(),
            catalog: Arc::clone(&catalog),
        });
        catalog
    }
}
