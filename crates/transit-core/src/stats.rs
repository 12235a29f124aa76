//! # Route Statistics
//!
//! Per-bus aggregates computed on demand from the catalogue.
//!
//! The bus's stop sequence is already the full traversal (loops closed,
//! there-and-back routes expanded), so every statistic is a single pairwise
//! walk over it with no loop/non-loop special-casing.

use crate::geo::compute_distance;
use crate::{Bus, Catalogue, StopId, TransitError};
use std::collections::BTreeSet;

/// Statistics of one bus route.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusStat {
    /// Length of the traversed stop sequence.
    pub stops_count: usize,
    /// Distinct stops on the route.
    pub unique_stops_count: usize,
    /// Road length of the full traversal, in metres.
    pub route_length: u64,
    /// Road length divided by great-circle length.
    pub curvature: f64,
}

/// Compute the statistics of a bus.
///
/// Fails with `UnknownDistance` if a consecutive pair has no road distance in
/// either direction, and with `DegenerateRoute` if the geographic length is 0
/// (curvature undefined).
pub fn compute_bus_stat(catalogue: &Catalogue, bus: &Bus) -> Result<BusStat, TransitError> {
    let mut route_length: u64 = 0;
    let mut geo_length = 0.0;

    for pair in bus.stops.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        route_length = route_length.saturating_add(u64::from(catalogue.road_distance(from, to)?));
        geo_length += geo_leg(catalogue, from, to);
    }

    if geo_length <= 0.0 {
        return Err(TransitError::DegenerateRoute(bus.name.clone()));
    }

    let unique_stops_count = bus.stops.iter().collect::<BTreeSet<_>>().len();

    Ok(BusStat {
        stops_count: bus.stops.len(),
        unique_stops_count,
        route_length,
        curvature: route_length as f64 / geo_length,
    })
}

/// Look up a bus by name and compute its statistics.
pub fn bus_stat_by_name(catalogue: &Catalogue, name: &str) -> Result<BusStat, TransitError> {
    let bus = catalogue
        .find_bus(name)
        .ok_or_else(|| TransitError::BusNotFound(name.to_string()))?;
    compute_bus_stat(catalogue, bus)
}

fn geo_leg(catalogue: &Catalogue, from: StopId, to: StopId) -> f64 {
    match (catalogue.stop(from), catalogue.stop(to)) {
        (Some(from), Some(to)) => compute_distance(from.coordinates, to.coordinates),
        _ => 0.0,
    }
}

// =============================================================================
// TESTS
// =============================================================================
