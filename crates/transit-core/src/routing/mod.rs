//! # Routing
//!
//! Journey planning over the catalogue.
//!
//! - `settings`: wait time and velocity fixed at build time
//! - `graph`: the arrival/boarding routing graph and its Dijkstra search
//! - `router`: stop-name queries producing wait/ride journeys

mod graph;
mod router;
mod settings;

pub use graph::{Edge, EdgeId, EdgeKind, GraphPath, RoutingGraph, VertexId};
pub use router::{Journey, JourneyStep, TransitRouter};
pub use settings::RoutingSettings;
