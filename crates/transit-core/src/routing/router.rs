//! # Transit Router
//!
//! Answers "fastest way from stop X to stop Y" over a built routing graph.
//!
//! The router borrows the catalogue (for names) and the graph (for the
//! search). It holds no mutable state, so one router, or many, can serve
//! concurrent queries.

use super::graph::{EdgeKind, RoutingGraph};
use crate::{Catalogue, TransitError};

/// One step of a journey.
#[derive(Debug, Clone, PartialEq)]
pub enum JourneyStep {
    /// Wait at `stop_name` for `time` minutes.
    Wait { stop_name: String, time: f64 },
    /// Ride `bus` for `span_count` stops, taking `time` minutes.
    Ride {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl JourneyStep {
    /// Duration of the step in minutes.
    #[must_use]
    pub fn time(&self) -> f64 {
        match self {
            JourneyStep::Wait { time, .. } | JourneyStep::Ride { time, .. } => *time,
        }
    }
}

/// An optimal journey: ordered steps and their total duration in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    pub total_time: f64,
    pub steps: Vec<JourneyStep>,
}

impl Journey {
    /// Number of buses boarded.
    #[must_use]
    pub fn ride_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|step| matches!(step, JourneyStep::Ride { .. }))
            .count()
    }
}

/// Journey planner over a catalogue and the graph built from it.
#[derive(Debug, Clone, Copy)]
pub struct TransitRouter<'a> {
    catalogue: &'a Catalogue,
    graph: &'a RoutingGraph,
}

impl<'a> TransitRouter<'a> {
    /// The graph must have been built from this catalogue.
    #[must_use]
    pub fn new(catalogue: &'a Catalogue, graph: &'a RoutingGraph) -> Self {
        Self { catalogue, graph }
    }

    /// Fastest journey between two stops, by name.
    ///
    /// - Unknown stop name: `Err(StopNotFound)`
    /// - No connection: `Ok(None)`
    /// - `from == to`: a journey with no steps and total time 0
    pub fn find_route(&self, from: &str, to: &str) -> Result<Option<Journey>, TransitError> {
        let from_stop = self
            .catalogue
            .find_stop(from)
            .ok_or_else(|| TransitError::StopNotFound(from.to_string()))?;
        let to_stop = self
            .catalogue
            .find_stop(to)
            .ok_or_else(|| TransitError::StopNotFound(to.to_string()))?;

        let Some(path) = self.graph.shortest_path(
            RoutingGraph::arrival_vertex(from_stop.id),
            RoutingGraph::arrival_vertex(to_stop.id),
        ) else {
            return Ok(None);
        };

        let steps = path
            .edges
            .iter()
            .filter_map(|id| self.graph.edge(*id))
            .filter_map(|edge| match edge.kind {
                EdgeKind::Wait { stop } => self.catalogue.stop(stop).map(|s| JourneyStep::Wait {
                    stop_name: s.name.clone(),
                    time: edge.weight,
                }),
                EdgeKind::Ride { bus, span_count } => {
                    self.catalogue.bus(bus).map(|b| JourneyStep::Ride {
                        bus: b.name.clone(),
                        span_count,
                        time: edge.weight,
                    })
                }
            })
            .collect();

        Ok(Some(Journey {
            total_time: path.weight,
            steps,
        }))
    }
}

// =============================================================================
// TESTS
// =============================================================================
