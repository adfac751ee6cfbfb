//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{RouteCache, RouteCacheConfig};
use crate::network::MetroNetwork;
use crate::planner::{InvalidPlannerConfig, PlannerConfig};

/// Shared application state.
///
/// The network is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub network: Arc<MetroNetwork>,

    /// Travel-time model for route segments
    pub planner_config: Arc<PlannerConfig>,

    /// Memo of computed routes
    pub routes: Arc<RouteCache>,
}

impl AppState {
    /// Create a new app state.
    ///
    /// Fails if `planner_config` cannot produce travel times.
    pub fn new(
        network: MetroNetwork,
        planner_config: PlannerConfig,
        cache_config: &RouteCacheConfig,
    ) -> Result<Self, InvalidPlannerConfig> {
        planner_config.validate()?;

        Ok(Self {
            network: Arc::new(network),
            planner_config: Arc::new(planner_config),
            routes: Arc::new(RouteCache::new(cache_config)),
        })
    }
}
