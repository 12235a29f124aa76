//! Great-circle distance between two positions.

use crate::Coordinates;
use crate::primitives::EARTH_RADIUS_M;

/// Great-circle distance in metres, by the spherical law of cosines.
///
/// Identical positions are exactly 0, which the statistics engine relies on
/// to detect degenerate routes.
#[must_use]
pub fn compute_distance(from: Coordinates, to: Coordinates) -> f64 {
    if from == to {
        return 0.0;
    }
    let lat_from = from.lat.to_radians();
    let lat_to = to.lat.to_radians();
    let dlng = (from.lng - to.lng).abs().to_radians();
    // rounding can push the cosine a hair outside [-1, 1]
    let cosine = (lat_from.sin() * lat_to.sin() + lat_from.cos() * lat_to.cos() * dlng.cos())
        .clamp(-1.0, 1.0);
    cosine.acos() * EARTH_RADIUS_M
}
