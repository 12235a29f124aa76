//! # Request Document
//!
//! JSON shapes of the input document and of the response array.
//!
//! ## Input
//!
//! ```json
//! {
//!   "base_requests": [
//!     {"type": "Stop", "name": "A", "latitude": 55.6, "longitude": 37.2,
//!      "road_distances": {"B": 3900}},
//!     {"type": "Bus", "name": "750", "stops": ["A", "B"], "is_roundtrip": false}
//!   ],
//!   "routing_settings": {"bus_wait_time": 6, "bus_velocity": 40},
//!   "stat_requests": [
//!     {"id": 1, "type": "Bus", "name": "750"},
//!     {"id": 2, "type": "Stop", "name": "A"},
//!     {"id": 3, "type": "Route", "from": "A", "to": "B"}
//!   ]
//! }
//! ```
//!
//! ## Output
//!
//! One object per stat request, in request order, each carrying
//! `request_id`. Failed requests carry `error_message` instead of a payload.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use transit_core::{BusStat, JourneyStep, RoutingSettings};

/// Error text for unknown buses, unknown stops and unreachable destinations.
pub const NOT_FOUND: &str = "not found";

// =============================================================================
// INPUT
// =============================================================================

/// The whole input document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestDocument {
    #[serde(default)]
    pub base_requests: Vec<BaseRequest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_settings: Option<RoutingSettings>,

    #[serde(default)]
    pub stat_requests: Vec<StatRequest>,
}

/// A network description entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BaseRequest {
    Stop(StopRequest),
    Bus(BusRequest),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopRequest {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Road distances in metres from this stop to its neighbours.
    #[serde(default)]
    pub road_distances: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusRequest {
    pub name: String,
    pub stops: Vec<String>,
    /// `true`: `stops` is a closed loop. `false`: `stops` is the forward half.
    pub is_roundtrip: bool,
}

/// A query entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRequest {
    pub id: i64,
    #[serde(flatten)]
    pub query: StatQuery,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StatQuery {
    Bus { name: String },
    Stop { name: String },
    Route { from: String, to: String },
}

// =============================================================================
// OUTPUT
// =============================================================================

/// Answer to one stat request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatResponse {
    pub request_id: i64,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseBody {
    Bus(BusResponse),
    Stop {
        buses: Vec<String>,
    },
    Route {
        total_time: f64,
        items: Vec<RouteItem>,
    },
    Error {
        error_message: String,
    },
}

impl ResponseBody {
    /// The standard "not found" answer.
    pub fn not_found() -> Self {
        ResponseBody::Error {
            error_message: NOT_FOUND.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusResponse {
    pub curvature: f64,
    pub route_length: u64,
    pub stop_count: usize,
    pub unique_stop_count: usize,
}

impl From<BusStat> for BusResponse {
    fn from(stat: BusStat) -> Self {
        Self {
            curvature: stat.curvature,
            route_length: stat.route_length,
            stop_count: stat.stops_count,
            unique_stop_count: stat.unique_stops_count,
        }
    }
}

/// One step of a route answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum RouteItem {
    Wait {
        stop_name: String,
        time: f64,
    },
    Bus {
        bus: String,
        span_count: usize,
        time: f64,
    },
}

impl From<JourneyStep> for RouteItem {
    fn from(step: JourneyStep) -> Self {
        match step {
            JourneyStep::Wait { stop_name, time } => RouteItem::Wait { stop_name, time },
            JourneyStep::Ride {
                bus,
                span_count,
                time,
            } => RouteItem::Bus {
                bus,
                span_count,
                time,
            },
        }
    }
}
