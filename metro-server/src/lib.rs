//! Istanbul metro route planner server.
//!
//! Builds a graph of the metro, tram and funicular network from the Metro
//! Istanbul station feed and answers shortest-route queries over HTTP.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod network;
pub mod planner;
pub mod web;
