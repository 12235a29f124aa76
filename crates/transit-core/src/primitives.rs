//! # Primitives
//!
//! Fixed constants of the transit model.
//!
//! ## Units
//!
//! - Road distances are integer metres.
//! - Bus velocity is km/h.
//! - Wait times and routing-graph weights are minutes.

/// Mean Earth radius used for great-circle distances, in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres in a kilometre.
pub const METERS_PER_KM: f64 = 1000.0;

/// Minutes in an hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum length of a stop or bus name, in bytes.
///
/// Names longer than this are rejected by the catalogue.
pub const MAX_NAME_LENGTH: usize = 256;

/// Maximum number of stops in a declared bus route (before expansion).
///
/// A there-and-back route expands to `2n - 1` stops and contributes
/// `m(m - 1) / 2` ride edges for `m` expanded stops: about two million at
/// this limit.
pub const MAX_ROUTE_STOPS: usize = 1_000;

/// Maximum number of edges a routing graph may hold.
///
/// `RoutingGraph::build` projects its edge count from the catalogue and
/// refuses to allocate past this (roughly 360 MB of edges).
pub const MAX_GRAPH_EDGES: u64 = 10_000_000;

/// Upper bound for bus velocity in km/h.
pub const MAX_BUS_VELOCITY: f64 = 1000.0;

/// Upper bound for the per-boarding wait time in minutes.
pub const MAX_BUS_WAIT_TIME: u32 = 1000;

/// Convert a velocity in km/h to metres per minute.
#[must_use]
pub fn meters_per_minute(velocity_kmh: f64) -> f64 {
    velocity_kmh * METERS_PER_KM / MINUTES_PER_HOUR
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_limit_fits_edge_ids() {
        assert!(MAX_GRAPH_EDGES <= u64::from(u32::MAX));
    }

    #[test]
    fn velocity_conversion() {
        assert!((meters_per_minute(60.0) - 1000.0).abs() < 1e-9);
        assert!((meters_per_minute(1.0) - 1000.0 / 60.0).abs() < 1e-9);
    }
}
