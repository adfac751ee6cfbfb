//! Web layer for the metro route planner.
//!
//! Provides the JSON API and serves the static frontend.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
