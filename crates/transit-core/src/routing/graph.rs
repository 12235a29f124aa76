//! # Routing Graph
//!
//! A directed, time-weighted graph compiled once from a populated catalogue.
//!
//! ## Vertex model
//!
//! Every stop owns two vertices:
//! - arrival `2 * stop`: "you are at the stop"
//! - boarding `2 * stop + 1`: "you have waited and are ready to board"
//!
//! A wait edge links arrival -> boarding of the same stop and weighs the
//! configured wait time. For every bus and every pair of positions `i < j` in
//! its traversal there is a ride edge boarding(stop[i]) -> arrival(stop[j])
//! weighing the road distance from `i` to `j` at the configured velocity.
//! Riding several stops on one bus is therefore a single edge, and changing
//! buses always costs one more wait edge.
//!
//! The graph is immutable after `build`. Changing the catalogue or the
//! settings means building a new graph.
//!
//! A bus with a leg that has no road distance in either direction is left
//! out of the graph and reported through `skipped_buses`; the rest of the
//! network stays routable.

use super::settings::RoutingSettings;
use crate::primitives::MAX_GRAPH_EDGES;
use crate::{BusId, Catalogue, StopId, TransitError};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, warn};

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Index of a vertex in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

impl VertexId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of an edge in the routing graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub u32);

impl EdgeId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// EDGES
// =============================================================================

/// What an edge stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Waiting at a stop before boarding. Spans no hops.
    Wait { stop: StopId },
    /// Riding `span_count` consecutive hops of one bus.
    Ride { bus: BusId, span_count: usize },
}

impl EdgeKind {
    /// Number of bus hops represented (0 for a wait).
    #[must_use]
    pub fn span_count(&self) -> usize {
        match self {
            EdgeKind::Wait { .. } => 0,
            EdgeKind::Ride { span_count, .. } => *span_count,
        }
    }
}

/// A weighted directed edge. Weight is in minutes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
    pub kind: EdgeKind,
}

/// Result of a shortest-path search: edges in travel order and their total weight.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    pub weight: f64,
    pub edges: Vec<EdgeId>,
}

// =============================================================================
// GRAPH
// =============================================================================

/// The compiled routing graph.
#[derive(Debug, Clone)]
pub struct RoutingGraph {
    settings: RoutingSettings,
    edges: Vec<Edge>,
    /// Outgoing edges per vertex, in insertion order.
    incidence: Vec<Vec<EdgeId>>,
    /// Buses without ride edges, with the reason.
    skipped: Vec<(BusId, TransitError)>,
}

impl RoutingGraph {
    /// Compile a populated catalogue.
    ///
    /// Stops are visited in id order and buses in name order, so identical
    /// inputs always give identical edge lists.
    ///
    /// Fails if the settings are invalid or the projected edge count exceeds
    /// `MAX_GRAPH_EDGES`. Both are checked before any edge is allocated.
    pub fn build(catalogue: &Catalogue, settings: RoutingSettings) -> Result<Self, TransitError> {
        settings.validate()?;

        let projected = Self::projected_edge_count(catalogue);
        if projected > MAX_GRAPH_EDGES {
            return Err(TransitError::GraphTooLarge {
                edges: projected,
                limit: MAX_GRAPH_EDGES,
            });
        }

        let vertex_count = catalogue.stop_count() * 2;
        let mut graph = Self {
            settings,
            edges: Vec::with_capacity(projected as usize),
            incidence: vec![Vec::new(); vertex_count],
            skipped: Vec::new(),
        };

        let wait = settings.wait_minutes();
        for stop in catalogue.stops() {
            graph.add_edge(Edge {
                from: Self::arrival_vertex(stop.id),
                to: Self::boarding_vertex(stop.id),
                weight: wait,
                kind: EdgeKind::Wait { stop: stop.id },
            })?;
        }

        for (_, bus) in catalogue.buses_ordered_by_name() {
            let legs = match bus
                .stops
                .windows(2)
                .map(|pair| catalogue.road_distance(pair[0], pair[1]))
                .collect::<Result<Vec<u32>, _>>()
            {
                Ok(legs) => legs,
                Err(e) => {
                    warn!(bus = %bus.name, reason = %e, "bus left out of routing graph");
                    graph.skipped.push((bus.id, e));
                    continue;
                }
            };

            for (i, &board) in bus.stops.iter().enumerate() {
                let mut meters: u64 = 0;
                for (j, &alight) in bus.stops.iter().enumerate().skip(i + 1) {
                    meters = meters.saturating_add(u64::from(legs[j - 1]));
                    graph.add_edge(Edge {
                        from: Self::boarding_vertex(board),
                        to: Self::arrival_vertex(alight),
                        weight: settings.ride_minutes(meters),
                        kind: EdgeKind::Ride {
                            bus: bus.id,
                            span_count: j - i,
                        },
                    })?;
                }
            }
        }

        debug!(
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            skipped_buses = graph.skipped.len(),
            bus_wait_time = settings.bus_wait_time,
            bus_velocity = settings.bus_velocity,
            "routing graph built"
        );

        Ok(graph)
    }

    /// Number of edges `build` adds at most: one wait per stop plus
    /// `m(m - 1) / 2` rides per bus traversing `m` stops.
    #[must_use]
    pub fn projected_edge_count(catalogue: &Catalogue) -> u64 {
        catalogue
            .buses_ordered_by_name()
            .map(|(_, bus)| {
                let m = bus.stops.len() as u64;
                m.saturating_mul(m.saturating_sub(1)) / 2
            })
            .fold(catalogue.stop_count() as u64, u64::saturating_add)
    }

    fn add_edge(&mut self, edge: Edge) -> Result<(), TransitError> {
        let id = u32::try_from(self.edges.len())
            .map(EdgeId)
            .map_err(|_| TransitError::GraphTooLarge {
                edges: self.edges.len() as u64 + 1,
                limit: MAX_GRAPH_EDGES,
            })?;
        if let Some(outgoing) = self.incidence.get_mut(edge.from.index()) {
            outgoing.push(id);
            self.edges.push(edge);
        }
        Ok(())
    }

    /// The vertex a traveller is at on arriving at `stop`.
    #[must_use]
    pub const fn arrival_vertex(stop: StopId) -> VertexId {
        VertexId(stop.0 * 2)
    }

    /// The vertex a traveller is at once ready to board at `stop`.
    #[must_use]
    pub const fn boarding_vertex(stop: StopId) -> VertexId {
        VertexId(stop.0 * 2 + 1)
    }

    /// Settings the graph was built with.
    #[must_use]
    pub fn settings(&self) -> RoutingSettings {
        self.settings
    }

    /// Buses left out of the graph, with the reason.
    pub fn skipped_buses(&self) -> impl Iterator<Item = (BusId, &TransitError)> {
        self.skipped.iter().map(|(bus, reason)| (*bus, reason))
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.incidence.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Get an edge by id.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// All edges in construction order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Outgoing edges of a vertex.
    pub fn outgoing(&self, vertex: VertexId) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.incidence
            .get(vertex.index())
            .into_iter()
            .flatten()
            .filter_map(move |&id| self.edge(id).map(|edge| (id, edge)))
    }

    // =========================================================================
    // SHORTEST PATH
    // =========================================================================

    /// Minimum-weight path from `from` to `to` (Dijkstra).
    ///
    /// All working state is local to the call, so any number of searches can
    /// run concurrently on a shared `&RoutingGraph`. Among equal-cost
    /// frontier entries the lower vertex id is settled first.
    ///
    /// Returns `None` if `to` is unreachable or either vertex is out of range.
    /// `from == to` yields an empty path of weight 0.
    #[must_use]
    pub fn shortest_path(&self, from: VertexId, to: VertexId) -> Option<GraphPath> {
        let n = self.vertex_count();
        if from.index() >= n || to.index() >= n {
            return None;
        }

        let mut dist = vec![f64::INFINITY; n];
        let mut via: Vec<Option<EdgeId>> = vec![None; n];
        let mut frontier = BinaryHeap::new();

        dist[from.index()] = 0.0;
        frontier.push(Frontier {
            cost: 0.0,
            vertex: from,
        });

        while let Some(Frontier { cost, vertex }) = frontier.pop() {
            if vertex == to {
                break;
            }
            if cost > dist[vertex.index()] {
                continue;
            }

            for (id, edge) in self.outgoing(vertex) {
                let next = cost + edge.weight;
                let slot = edge.to.index();
                if next < dist[slot] {
                    dist[slot] = next;
                    via[slot] = Some(id);
                    frontier.push(Frontier {
                        cost: next,
                        vertex: edge.to,
                    });
                }
            }
        }

        let weight = dist[to.index()];
        if !weight.is_finite() {
            return None;
        }

        let mut edges = Vec::new();
        let mut current = to;
        while let Some(id) = via[current.index()] {
            if current == from || edges.len() >= self.edges.len() {
                break;
            }
            edges.push(id);
            current = self.edge(id)?.from;
        }
        edges.reverse();

        Some(GraphPath { weight, edges })
    }
}

/// Frontier entry ordered as a min-heap on cost, then vertex id.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    cost: f64,
    vertex: VertexId,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed: BinaryHeap is a max-heap
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

// =============================================================================
// TESTS
// =============================================================================
