//! Routing settings: the two scalars fixed at graph construction.

use crate::TransitError;
use crate::primitives::{MAX_BUS_VELOCITY, MAX_BUS_WAIT_TIME, meters_per_minute};
use serde::{Deserialize, Serialize};

/// Settings a routing graph is built with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingSettings {
    /// Minutes spent waiting at a stop before each boarding.
    pub bus_wait_time: u32,

    /// Average bus velocity in km/h.
    pub bus_velocity: f64,
}

impl RoutingSettings {
    /// Create validated settings.
    pub fn new(bus_wait_time: u32, bus_velocity: f64) -> Result<Self, TransitError> {
        let settings = Self {
            bus_wait_time,
            bus_velocity,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the settings can weight a graph.
    ///
    /// Velocity must be finite and within (0, `MAX_BUS_VELOCITY`]; the wait
    /// time must not exceed `MAX_BUS_WAIT_TIME`.
    pub fn validate(&self) -> Result<(), TransitError> {
        if !self.bus_velocity.is_finite()
            || self.bus_velocity <= 0.0
            || self.bus_velocity > MAX_BUS_VELOCITY
        {
            return Err(TransitError::InvalidSettings(format!(
                "bus_velocity must be in (0, {}] km/h, got {}",
                MAX_BUS_VELOCITY, self.bus_velocity
            )));
        }
        if self.bus_wait_time > MAX_BUS_WAIT_TIME {
            return Err(TransitError::InvalidSettings(format!(
                "bus_wait_time must be at most {} min, got {}",
                MAX_BUS_WAIT_TIME, self.bus_wait_time
            )));
        }
        Ok(())
    }

    /// Weight of a wait edge, in minutes.
    #[must_use]
    pub fn wait_minutes(&self) -> f64 {
        f64::from(self.bus_wait_time)
    }

    /// Minutes needed to ride `meters` of road.
    #[must_use]
    pub fn ride_minutes(&self, meters: u64) -> f64 {
        meters as f64 / meters_per_minute(self.bus_velocity)
    }
}
