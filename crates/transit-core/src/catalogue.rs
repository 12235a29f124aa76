//! # Catalogue
//!
//! The single source of truth for the transit topology.
//!
//! The catalogue owns every `Stop` and `Bus` in two arenas, indexes them by
//! name, keeps the "buses serving a stop" relation, and stores the directed
//! road-distance table keyed by `(StopId, StopId)`.
//!
//! ## Lifecycle
//!
//! Population (`add_stop`, `set_distance`, `add_bus`) is single-writer.
//! Once populated the catalogue is only read, and `&Catalogue` can be shared
//! freely between threads.

use crate::primitives::{MAX_NAME_LENGTH, MAX_ROUTE_STOPS};
use crate::{Bus, BusId, Coordinates, Stop, StopId, TransitError};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, trace};

/// In-memory store of stops, buses and road distances.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    /// Stop arena, indexed by `StopId`.
    stops: Vec<Stop>,

    /// Bus arena, indexed by `BusId`.
    buses: Vec<Bus>,

    /// Name -> StopId
    stop_index: HashMap<String, StopId>,

    /// Name -> BusId
    bus_index: HashMap<String, BusId>,

    /// StopId -> buses serving it. Parallel to `stops`.
    buses_by_stop: Vec<BTreeSet<BusId>>,

    /// Directed road distances in metres: (from, to) -> metres
    distances: BTreeMap<(StopId, StopId), u32>,
}

impl Catalogue {
    /// Create an empty catalogue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // POPULATION
    // =========================================================================

    /// Add a stop. Returns its `StopId`.
    ///
    /// Idempotent by name: if a stop with this name exists, its id is
    /// returned and the stored coordinates are left untouched.
    pub fn add_stop(
        &mut self,
        name: &str,
        coordinates: Coordinates,
    ) -> Result<StopId, TransitError> {
        validate_name(name)?;

        if let Some(&existing) = self.stop_index.get(name) {
            trace!(stop = name, "stop already present");
            return Ok(existing);
        }

        if !coordinates.is_valid() {
            return Err(TransitError::InvalidCoordinates {
                name: name.to_string(),
                coordinates,
            });
        }

        let id = StopId(self.stops.len() as u32);
        self.stops.push(Stop {
            id,
            name: name.to_string(),
            coordinates,
        });
        self.buses_by_stop.push(BTreeSet::new());
        self.stop_index.insert(name.to_string(), id);

        trace!(stop = name, id = id.0, "stop added");
        Ok(id)
    }

    /// Add a bus route over existing stops. Returns its `BusId`.
    ///
    /// For `is_loop == false` the given stops are the forward half and are
    /// expanded here to the full there-and-back traversal, so
    /// `[A, B, C]` is stored as `[A, B, C, B, A]`. A loop must already be
    /// closed: its first and last stop are the same.
    ///
    /// Every referenced stop must have been added; unknown names are
    /// rejected before anything is stored.
    pub fn add_bus<S: AsRef<str>>(
        &mut self,
        name: &str,
        stops: &[S],
        is_loop: bool,
    ) -> Result<BusId, TransitError> {
        validate_name(name)?;

        if self.bus_index.contains_key(name) {
            return Err(TransitError::DuplicateBus(name.to_string()));
        }
        if stops.is_empty() {
            return Err(TransitError::EmptyRoute(name.to_string()));
        }
        if stops.len() > MAX_ROUTE_STOPS {
            return Err(TransitError::RouteTooLong {
                bus: name.to_string(),
                stops: stops.len(),
            });
        }

        let mut resolved = Vec::with_capacity(if is_loop {
            stops.len()
        } else {
            stops.len() * 2 - 1
        });
        for stop in stops {
            let stop = stop.as_ref();
            let id = self
                .find_stop(stop)
                .map(|s| s.id)
                .ok_or_else(|| TransitError::StopNotFound(stop.to_string()))?;
            resolved.push(id);
        }

        if is_loop {
            if resolved.first() != resolved.last() {
                return Err(TransitError::OpenLoop(name.to_string()));
            }
        } else {
            let back: Vec<StopId> = resolved.iter().rev().skip(1).copied().collect();
            resolved.extend(back);
        }

        let id = BusId(self.buses.len() as u32);
        for stop in &resolved {
            if let Some(serving) = self.buses_by_stop.get_mut(stop.index()) {
                serving.insert(id);
            }
        }
        debug!(
            bus = name,
            id = id.0,
            stops = resolved.len(),
            is_loop,
            "bus added"
        );
        self.buses.push(Bus {
            id,
            name: name.to_string(),
            stops: resolved,
            is_loop,
        });
        self.bus_index.insert(name.to_string(), id);

        Ok(id)
    }

    /// Record the road distance from `from` to `to`, overwriting any previous value.
    ///
    /// Only this direction is stored; the reverse direction falls back to it
    /// until it is set on its own.
    pub fn set_distance(&mut self, from: &str, to: &str, meters: u32) -> Result<(), TransitError> {
        let from_id = self
            .find_stop(from)
            .map(|s| s.id)
            .ok_or_else(|| TransitError::StopNotFound(from.to_string()))?;
        let to_id = self
            .find_stop(to)
            .map(|s| s.id)
            .ok_or_else(|| TransitError::StopNotFound(to.to_string()))?;

        if meters == 0 {
            return Err(TransitError::InvalidDistance {
                from: from.to_string(),
                to: to.to_string(),
                meters,
            });
        }

        self.distances.insert((from_id, to_id), meters);
        Ok(())
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Find a stop by name.
    #[must_use]
    pub fn find_stop(&self, name: &str) -> Option<&Stop> {
        self.stop_index.get(name).and_then(|id| self.stop(*id))
    }

    /// Find a bus by name.
    #[must_use]
    pub fn find_bus(&self, name: &str) -> Option<&Bus> {
        self.bus_index.get(name).and_then(|id| self.bus(*id))
    }

    /// Get a stop by id.
    #[must_use]
    pub fn stop(&self, id: StopId) -> Option<&Stop> {
        self.stops.get(id.index())
    }

    /// Get a bus by id.
    #[must_use]
    pub fn bus(&self, id: BusId) -> Option<&Bus> {
        self.buses.get(id.index())
    }

    /// All stops in insertion (id) order.
    pub fn stops(&self) -> impl Iterator<Item = &Stop> {
        self.stops.iter()
    }

    /// All buses sorted by name.
    pub fn buses_ordered_by_name(&self) -> impl Iterator<Item = (&str, &Bus)> {
        let mut ordered: Vec<&Bus> = self.buses.iter().collect();
        ordered.sort_by(|a, b| a.name.cmp(&b.name));
        ordered.into_iter().map(|bus| (bus.name.as_str(), bus))
    }

    /// Buses serving a stop, in id order.
    pub fn buses_at(&self, stop: StopId) -> impl Iterator<Item = &Bus> + '_ {
        self.buses_by_stop
            .get(stop.index())
            .into_iter()
            .flat_map(move |ids| ids.iter().filter_map(move |id| self.bus(*id)))
    }

    /// Names of the buses serving a stop, sorted.
    #[must_use]
    pub fn bus_names_at(&self, stop: StopId) -> BTreeSet<&str> {
        self.buses_at(stop).map(|bus| bus.name.as_str()).collect()
    }

    /// Road distance from `from` to `to` in metres.
    ///
    /// Returns the stored value for `(from, to)`, else the stored value for
    /// `(to, from)`, else `None`. A stored distance is never 0.
    #[must_use]
    pub fn distance(&self, from: StopId, to: StopId) -> Option<u32> {
        self.distances
            .get(&(from, to))
            .or_else(|| self.distances.get(&(to, from)))
            .copied()
    }

    /// Like [`Catalogue::distance`], but a missing pair is an error.
    pub fn road_distance(&self, from: StopId, to: StopId) -> Result<u32, TransitError> {
        self.distance(from, to)
            .ok_or_else(|| TransitError::UnknownDistance {
                from: self.stop_name(from),
                to: self.stop_name(to),
            })
    }

    // =========================================================================
    // SUMMARY
    // =========================================================================

    /// Number of stops.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    /// Number of buses.
    #[must_use]
    pub fn bus_count(&self) -> usize {
        self.buses.len()
    }

    /// Number of explicitly stored (directed) distances.
    #[must_use]
    pub fn distance_count(&self) -> usize {
        self.distances.len()
    }

    fn stop_name(&self, id: StopId) -> String {
        self.stop(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("#{}", id.0))
    }
}

fn validate_name(name: &str) -> Result<(), TransitError> {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return Err(TransitError::InvalidName(name.to_string()));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
