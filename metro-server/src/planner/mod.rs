//! Route planner using Dijkstra search.
//!
//! This module answers "what is the fastest way from station A to station
//! B?" over a built [`MetroNetwork`](crate::network::MetroNetwork). The
//! search minimises distance (with transfers costed as a fixed
//! distance-equivalent), then the path is broken down into per-hop
//! segments with approximate travel times.

mod config;
mod dijkstra;
mod route;
mod search;


pub use config::{InvalidPlannerConfig, PlannerConfig};
pub use route::{RouteResult, RouteSegment};
pub use search::{Planner, RouteError};
