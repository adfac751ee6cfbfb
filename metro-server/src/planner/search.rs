//! Route search between two stations.

use tracing::debug;

use crate::domain::StationId;
use crate::network::MetroNetwork;

use super::config::PlannerConfig;
use super::dijkstra::shortest_path;
use super::route::{RouteResult, assemble};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// One of the requested stations does not exist
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// The search exhausted the graph without reaching the target
    #[error("no route found from {from} to {to}")]
    NoRoute { from: StationId, to: StationId },
}

/// Shortest-route planner over a built network.
///
/// Holds only shared references, so planners are cheap to create per
/// request and any number can run concurrently over one network.
pub struct Planner<'a> {
    network: &'a MetroNetwork,
    config: &'a PlannerConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(network: &'a MetroNetwork, config: &'a PlannerConfig) -> Self {
        Self { network, config }
    }

    /// Compute the shortest route from `source` to `target`.
    ///
    /// A route from a station to itself is a single-station route with no
    /// segments. The route from `target` to `source` visits the same
    /// stations in reverse. Either id being unknown fails with
    /// [`RouteError::StationNotFound`] before any search is done.
    pub fn route(&self, source: StationId, target: StationId) -> Result<RouteResult, RouteError> {
        let from = self
            .network
            .node_index(source)
            .ok_or(RouteError::StationNotFound(source))?;
        let to = self
            .network
            .node_index(target)
            .ok_or(RouteError::StationNotFound(target))?;

        if from == to {
            return Ok(RouteResult::trivial(self.network.node(from)));
        }

        // Always search from the lower node so that ties between equal-length
        // paths resolve the same way in both directions.
        let path = if from < to {
            shortest_path(self.network, from, to)
        } else {
            shortest_path(self.network, to, from).and_then(|p| p.reversed(self.network))
        }
        .ok_or(RouteError::NoRoute {
            from: source,
            to: target,
        })?;

        debug!(
            %source,
            %target,
            hops = path.edges.len(),
            settled = path.settled,
            cost_km = format_args!("{:.3}", path.cost_km),
            "found shortest path"
        );

        Ok(assemble(self.network, self.config, &path.nodes, &path.edges))
    }
}
