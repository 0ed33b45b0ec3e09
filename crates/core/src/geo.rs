//! Great-circle distance on a spherical earth.

use crate::location::Coordinate;

pub const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.15077945;

/// Distance in statute miles between two coordinates, using the spherical
/// law of cosines.
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    // sin² + cos² may round just below 1.0, which acos turns into a few feet.
    if a == b {
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lon1 = a.longitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let lon2 = b.longitude.to_radians();

    // Rounding can push the cosine slightly outside [-1, 1].
    let cos_angle = (lat1.sin() * lat2.sin() + lat1.cos() * lat2.cos() * (lon1 - lon2).cos())
        .clamp(-1.0, 1.0);
    let angle = cos_angle.acos();

    let nautical_miles = 60.0 * angle.to_degrees();
    STATUTE_MILES_PER_NAUTICAL_MILE * nautical_miles
}
