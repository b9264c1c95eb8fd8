//! Great-circle distances over decimal-degree coordinates.
//!
//! The constants match the highway dataset conventions: a sphere of radius
//! 3963 miles with a 1.02112 arc correction factor. Shortest-path search
//! accumulates miles; the extreme-edge scan compares feet.

/// Spherical earth radius used by the dataset, in miles.
pub const EARTH_RADIUS_MILES: f64 = 3963.0;

/// Feet per statute mile.
pub const FEET_PER_MILE: f64 = 5280.0;

/// Arc correction applied to the central angle.
const ARC_SCALE: f64 = 1.02112;

/// Great-circle distance in miles between two (lat, lon) points in degrees.
///
/// Identical coordinates short-circuit to exactly zero, so the `acos` never
/// sees an argument pushed above 1.0 by rounding.
pub fn great_circle_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }
    let deg2rad = std::f64::consts::PI / 180.0;
    let (p1, p2) = (lat1 * deg2rad, lat2 * deg2rad);
    let ang = p1.cos() * p2.cos() * ((lon1 - lon2) * deg2rad).cos() + p1.sin() * p2.sin();
    ang.acos() * ARC_SCALE * EARTH_RADIUS_MILES
}

/// Great-circle distance in feet between two (lat, lon) points in degrees.
#[inline]
pub fn great_circle_feet(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    great_circle_miles(lat1, lon1, lat2, lon2) * FEET_PER_MILE
}
