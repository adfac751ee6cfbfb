//! Memo of computed routes.
//!
//! The network never changes while the server runs, so a route between two
//! stations is always the same. Entries expire only to bound memory.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::domain::StationId;
use crate::planner::{RouteError, RouteResult};

/// Cache key for routes: (source, target).
type RouteKey = (StationId, StationId);

/// Configuration for the route cache.
#[derive(Debug, Clone)]
pub struct RouteCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for RouteCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of successful route computations.
pub struct RouteCache {
    routes: MokaCache<RouteKey, Arc<RouteResult>>,
}

impl RouteCache {
    pub fn new(config: &RouteCacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    /// Return the cached route, or compute and cache it.
    ///
    /// Errors are returned as-is and never cached.
    pub async fn get_or_compute<F>(
        &self,
        source: StationId,
        target: StationId,
        compute: F,
    ) -> Result<Arc<RouteResult>, RouteError>
    where
        F: FnOnce() -> Result<RouteResult, RouteError>,
    {
        let key = (source, target);

        if let Some(cached) = self.routes.get(&key).await {
            return Ok(cached);
        }

        let route = Arc::new(compute()?);
        self.routes.insert(key, route.clone()).await;

        Ok(route)
    }

    /// Number of cached routes.
    ///
    /// Flushes moka's pending bookkeeping first so that recent inserts are
    /// counted.
    pub async fn cached_routes(&self) -> u64 {
        self.routes.run_pending_tasks().await;
        self.routes.entry_count()
    }
}
