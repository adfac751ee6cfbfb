//! Domain types for the metro route planner.
//!
//! These are validated value types shared by the network model and the
//! planner. They enforce their invariants at construction time, so code
//! that receives them can trust their validity.

mod coordinates;
mod line;
mod station;

pub use coordinates::{Coordinates, InvalidCoordinates};
pub use line::{InvalidLineCode, InvalidLineColor, Line, LineCode, LineColor};
pub use station::{Station, StationId};
