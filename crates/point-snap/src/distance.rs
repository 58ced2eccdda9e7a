//! Planar distance estimation between latitude/longitude pairs

use crate::GeoPoint;

/// Mean Earth radius in meters, used to turn ranking distances into physical ones
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// Equirectangular approximation of the angular distance between two points
///
/// The result is in radians of arc and is *not* multiplied by any radius: it is only
/// meant for ranking nearby candidates against each other. Use [`scaled_distance`] when
/// the value has to be compared with a physical distance.
///
/// # Arguments
/// * `lat1`, `lon1` - First point in degrees
/// * `lat2`, `lon2` - Second point in degrees
///
/// # Returns
/// A non-negative value that grows monotonically with the true distance for points that
/// are close together. Far-apart points still give a finite (but meaningless) value.
#[inline(always)]
pub fn equirectangular_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1.to_radians();
    let lon1 = lon1.to_radians();
    let lat2 = lat2.to_radians();
    let lon2 = lon2.to_radians();

    let x = (lon2 - lon1) * ((lat1 + lat2) / 2.0).cos();
    let y = lat2 - lat1;
    (x * x + y * y).sqrt()
}

/// Equirectangular distance between two points, scaled by `radius`
///
/// With `radius` in meters the result is an approximate distance in meters.
#[inline(always)]
pub fn scaled_distance(a: GeoPoint, b: GeoPoint, radius: f64) -> f64 {
    equirectangular_distance(a.latitude, a.longitude, b.latitude, b.longitude) * radius
}
