//! # Request Handler
//!
//! Populates a catalogue from base requests and answers stat requests.
//!
//! Population runs in three passes so that entries may reference stops
//! declared later in the document:
//! 1. every stop
//! 2. every road distance
//! 3. every bus
//!
//! The routing graph is compiled once, right after population, when
//! routing settings are known. Buses the graph leaves out (a leg without a
//! road distance) only affect journeys that would need them. Answering
//! never mutates the handler.

use crate::document::{
    BaseRequest, BusResponse, RequestDocument, ResponseBody, RouteItem, StatQuery, StatRequest,
    StatResponse,
};
use tracing::{debug, info};
use transit_core::{
    Catalogue, Coordinates, RoutingGraph, RoutingSettings, TransitError, TransitRouter,
    bus_stat_by_name,
};

/// Owns the populated model and answers queries against it.
#[derive(Debug)]
pub struct RequestHandler {
    catalogue: Catalogue,
    /// The compiled graph, or why there is none.
    graph: Result<RoutingGraph, TransitError>,
}

impl RequestHandler {
    /// Populate from a document.
    ///
    /// `fallback` settings are used when the document has none. Invalid
    /// network input is an error; a graph that cannot be built is not, and
    /// only fails route queries.
    pub fn from_document(
        document: &RequestDocument,
        fallback: Option<RoutingSettings>,
    ) -> Result<Self, TransitError> {
        let catalogue = populate(&document.base_requests)?;
        let settings = document.routing_settings.or(fallback);
        Ok(Self::new(catalogue, settings))
    }

    /// Wrap a populated catalogue, compiling the routing graph if settings are given.
    pub fn new(catalogue: Catalogue, settings: Option<RoutingSettings>) -> Self {
        let graph = match settings {
            Some(settings) => RoutingGraph::build(&catalogue, settings),
            None => Err(TransitError::InvalidSettings(
                "no routing settings provided".to_string(),
            )),
        };
        if let Err(e) = &graph {
            debug!(reason = %e, "routing unavailable");
        }
        Self { catalogue, graph }
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// The routing graph, if one was built.
    pub fn graph(&self) -> Option<&RoutingGraph> {
        self.graph.as_ref().ok()
    }

    /// Answer every request, in order. A failed request never stops the batch.
    pub fn process(&self, requests: &[StatRequest]) -> Vec<StatResponse> {
        let responses: Vec<StatResponse> = requests.iter().map(|r| self.answer(r)).collect();
        let failed = responses
            .iter()
            .filter(|r| matches!(r.body, ResponseBody::Error { .. }))
            .count();
        info!(requests = responses.len(), failed, "stat requests answered");
        responses
    }

    /// Answer one request.
    pub fn answer(&self, request: &StatRequest) -> StatResponse {
        let body = match &request.query {
            StatQuery::Bus { name } => self.answer_bus(name),
            StatQuery::Stop { name } => self.answer_stop(name),
            StatQuery::Route { from, to } => self.answer_route(from, to),
        };
        debug!(id = request.id, "answered");
        StatResponse {
            request_id: request.id,
            body,
        }
    }

    fn answer_bus(&self, name: &str) -> ResponseBody {
        match bus_stat_by_name(&self.catalogue, name) {
            Ok(stat) => ResponseBody::Bus(BusResponse::from(stat)),
            Err(e) => error_body(e),
        }
    }

    fn answer_stop(&self, name: &str) -> ResponseBody {
        match self.catalogue.find_stop(name) {
            Some(stop) => ResponseBody::Stop {
                buses: self
                    .catalogue
                    .bus_names_at(stop.id)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            },
            None => ResponseBody::not_found(),
        }
    }

    fn answer_route(&self, from: &str, to: &str) -> ResponseBody {
        let graph = match &self.graph {
            Ok(graph) => graph,
            Err(e) => return error_body(e.clone()),
        };
        match TransitRouter::new(&self.catalogue, graph).find_route(from, to) {
            Ok(Some(journey)) => ResponseBody::Route {
                total_time: journey.total_time,
                items: journey.steps.into_iter().map(RouteItem::from).collect(),
            },
            Ok(None) => ResponseBody::not_found(),
            Err(e) => error_body(e),
        }
    }
}

/// Build a catalogue from base requests: stops, then distances, then buses.
pub fn populate(base_requests: &[BaseRequest]) -> Result<Catalogue, TransitError> {
    let mut catalogue = Catalogue::new();

    for request in base_requests {
        if let BaseRequest::Stop(stop) = request {
            catalogue.add_stop(
                &stop.name,
                Coordinates::new(stop.latitude, stop.longitude),
            )?;
        }
    }
    for request in base_requests {
        if let BaseRequest::Stop(stop) = request {
            for (neighbour, meters) in &stop.road_distances {
                catalogue.set_distance(&stop.name, neighbour, *meters)?;
            }
        }
    }
    for request in base_requests {
        if let BaseRequest::Bus(bus) = request {
            catalogue.add_bus(&bus.name, &bus.stops, bus.is_roundtrip)?;
        }
    }

    info!(
        stops = catalogue.stop_count(),
        buses = catalogue.bus_count(),
        distances = catalogue.distance_count(),
        "catalogue populated"
    );
    Ok(catalogue)
}

/// Populate, then answer every stat request of a document.
pub fn process_document(
    document: &RequestDocument,
    fallback: Option<RoutingSettings>,
) -> Result<Vec<StatResponse>, TransitError> {
    let handler = RequestHandler::from_document(document, fallback)?;
    Ok(handler.process(&document.stat_requests))
}

fn error_body(error: TransitError) -> ResponseBody {
    match error {
        TransitError::StopNotFound(_) | TransitError::BusNotFound(_) => ResponseBody::not_found(),
        other => ResponseBody::Error {
            error_message: other.to_string(),
        },
    }
}
