//! # transit-core
//!
//! The in-memory transit model - THE MODEL.
//!
//! This crate answers structured questions about a bus network:
//! - per-bus statistics (stop counts, road length, curvature)
//! - the buses serving a stop
//! - the fastest journey between two stops, combining waits and rides
//!
//! ## Data flow
//!
//! ```text
//! stops / distances / buses ──▶ Catalogue ──┬──▶ stats::compute_bus_stat   (per query)
//!                                           └──▶ RoutingGraph::build       (once)
//!                                                        │
//!                                                        ▼
//!                                                 TransitRouter::find_route (per query)
//! ```
//!
//! ## Architectural Constraints
//!
//! - No async, no I/O: request parsing and response encoding belong to callers
//! - Populate once, then query: `Catalogue` and `RoutingGraph` are read-only
//!   after construction and are `Send + Sync`
//! - Every failure is a `TransitError`; "no route" is `Ok(None)`

// =============================================================================
// MODULES
// =============================================================================

pub mod catalogue;
pub mod geo;
pub mod primitives;
pub mod routing;
pub mod stats;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{Bus, BusId, Coordinates, Stop, StopId, TransitError};

// =============================================================================
// RE-EXPORTS: Model
// =============================================================================

pub use catalogue::Catalogue;
pub use routing::{
    Edge, EdgeId, EdgeKind, GraphPath, Journey, JourneyStep, RoutingGraph, RoutingSettings,
    TransitRouter, VertexId,
};
pub use stats::{BusStat, bus_stat_by_name, compute_bus_stat};
