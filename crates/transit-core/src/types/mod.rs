//! # Core Type Definitions
//!
//! This module contains the entity types of the transit model:
//! - Arena identifiers (`StopId`, `BusId`)
//! - Geographic position (`Coordinates`)
//! - Catalogue entities (`Stop`, `Bus`)
//! - Error types (`TransitError`)
//!
//! ## Identity
//!
//! Stops and buses are identified by name at the boundary and by a dense
//! integer index inside the catalogue. Identifiers are only meaningful for
//! the catalogue that issued them.

use std::fmt;
use thiserror::Error;

// =============================================================================
// ARENA IDENTIFIERS
// =============================================================================

/// Index of a stop in the catalogue's stop arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StopId(pub u32);

impl StopId {
    /// Position of the stop in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a bus in the catalogue's bus arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusId(pub u32);

impl BusId {
    /// Position of the bus in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// COORDINATES
// =============================================================================

/// Geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create a position from latitude and longitude in degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude within [-90, 90] and longitude within [-180, 180], both finite.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

// =============================================================================
// STOP
// =============================================================================

/// A named stop with a fixed position.
///
/// The set of buses serving a stop is not stored here: it is a relation
/// kept by the catalogue and grows as routes are added.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub id: StopId,
    pub name: String,
    pub coordinates: Coordinates,
}

// =============================================================================
// BUS
// =============================================================================

/// A bus route.
///
/// `stops` is the full traversal: a loop is stored as given (first and last
/// entries are the same stop), a there-and-back route is stored expanded to
/// `[A, B, C, B, A]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bus {
    pub id: BusId,
    pub name: String,
    pub stops: Vec<StopId>,
    pub is_loop: bool,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the transit model.
///
/// - Lookups of unknown names are reported, never panicked on
/// - "No path between two stops" is NOT an error; routing returns `Ok(None)`
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitError {
    /// No stop with this name was added.
    #[error("stop not found: {0}")]
    StopNotFound(String),

    /// No bus with this name was added.
    #[error("bus not found: {0}")]
    BusNotFound(String),

    /// A bus with this name already exists.
    #[error("bus already exists: {0}")]
    DuplicateBus(String),

    /// A bus was declared without stops.
    #[error("bus {0} has no stops")]
    EmptyRoute(String),

    /// A bus declares more stops than `MAX_ROUTE_STOPS`.
    #[error("bus {bus} declares {stops} stops, more than allowed")]
    RouteTooLong { bus: String, stops: usize },

    /// A loop route whose first and last stops differ.
    #[error("loop bus {0} must start and end at the same stop")]
    OpenLoop(String),

    /// Empty or oversized stop/bus name.
    #[error("invalid name: {0:?}")]
    InvalidName(String),

    /// Coordinates out of range or not finite.
    #[error("invalid coordinates for stop {name}: {coordinates}")]
    InvalidCoordinates {
        name: String,
        coordinates: Coordinates,
    },

    /// Road distances must be positive.
    #[error("invalid road distance {meters} m from {from} to {to}")]
    InvalidDistance {
        from: String,
        to: String,
        meters: u32,
    },

    /// Neither direction of a needed road distance was supplied.
    #[error("no road distance between {from} and {to}")]
    UnknownDistance { from: String, to: String },

    /// The route has zero geographic length, so curvature is undefined.
    #[error("bus {0} has zero geographic length")]
    DegenerateRoute(String),

    /// The routing graph would exceed `MAX_GRAPH_EDGES`.
    #[error("routing graph needs {edges} edges, more than the limit of {limit}")]
    GraphTooLarge { edges: u64, limit: u64 },

    /// Routing settings outside their domain.
    #[error("invalid routing settings: {0}")]
    InvalidSettings(String),
}

// =============================================================================
// TESTS
// =============================================================================
