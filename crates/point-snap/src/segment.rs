//! Nearest point on a single edge of a path
//!
//! The edge is treated as a straight line in a locally equirectangular plane
//! (longitude on x, latitude on y). The perpendicular foot of the target is only
//! accepted when it falls in the strip bounded by the two perpendiculars through the
//! edge endpoints; otherwise the nearer endpoint is the answer for that edge.

use crate::{GeoPoint, distance::scaled_distance};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where on an edge a snapped point lies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SegmentLocation {
    /// The first vertex of the edge
    Start,
    /// The second vertex of the edge
    End,
    /// A projected point strictly derived from the edge line
    Interior,
}

/// A candidate produced by one edge
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeCandidate {
    pub point: GeoPoint,
    /// Distance from the target, in units of the radius used
    pub distance: f64,
    pub location: SegmentLocation,
}

/// An edge between two consecutive vertices of a path
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Edge {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Edge {
    #[inline]
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    /// Foot of the perpendicular from `target`, if it lies within the edge bounds
    ///
    /// Returns `None` when the target is outside the strip between the endpoint
    /// perpendiculars, when the edge has zero length, or when the computation does not
    /// produce finite coordinates.
    pub fn perpendicular_foot(&self, target: GeoPoint) -> Option<GeoPoint> {
        let GeoPoint {
            latitude: lat1,
            longitude: lon1,
        } = self.start;
        let GeoPoint {
            latitude: lat2,
            longitude: lon2,
        } = self.end;
        let GeoPoint {
            latitude: lat,
            longitude: lon,
        } = target;

        let foot = if lat1 == lat2 && lon1 == lon2 {
            return None;
        } else if lon1 == lon2 {
            // Vertical edge: the perpendiculars are the parallels through each endpoint
            if lat < lat1.min(lat2) || lat > lat1.max(lat2) {
                return None;
            }
            GeoPoint::new(lat, lon1)
        } else if lat1 == lat2 {
            // Horizontal edge: the perpendiculars are the meridians through each endpoint
            if lon < lon1.min(lon2) || lon > lon1.max(lon2) {
                return None;
            }
            GeoPoint::new(lat1, lon)
        } else {
            // Longitude compression averaged over both endpoints and the target
            let avg_cosine = ((lat1 + lat2 + lat) / 3.0).to_radians().cos();
            let m = (lat1 - lat2) / ((lon1 - lon2) * avg_cosine);

            let m_perp = -(1.0 / m);
            let start_intercept = lat1 - m_perp * lon1;
            let end_intercept = lat2 - m_perp * lon2;
            let (low, high) = if start_intercept > end_intercept {
                (end_intercept, start_intercept)
            } else {
                (start_intercept, end_intercept)
            };
            let base = lon * m_perp;
            if lat > base + high || lat < base + low {
                return None;
            }

            let intercept = lat1 - m * lon1;
            let x = (lon + lat * m - intercept * m) / (m * m + 1.0);
            let y = m * x + intercept;
            GeoPoint::new(y, x)
        };

        foot.is_finite().then_some(foot)
    }

    /// Best candidate of this edge that strictly improves on `best`
    ///
    /// An in-bounds interior projection is tried first and wins outright when it improves
    /// on `best`. Otherwise the start and then the end vertex are checked, each against
    /// the running minimum.
    pub fn closest_candidate(
        &self,
        target: GeoPoint,
        radius: f64,
        best: f64,
    ) -> Option<EdgeCandidate> {
        if let Some(foot) = self.perpendicular_foot(target) {
            let distance = scaled_distance(foot, target, radius);
            if distance < best {
                return Some(EdgeCandidate {
                    point: foot,
                    distance,
                    location: SegmentLocation::Interior,
                });
            }
        }

        let mut found: Option<EdgeCandidate> = None;
        let mut best = best;
        for (point, location) in [
            (self.start, SegmentLocation::Start),
            (self.end, SegmentLocation::End),
        ] {
            let distance = scaled_distance(target, point, radius);
            if distance < best {
                best = distance;
                found = Some(EdgeCandidate {
                    point,
                    distance,
                    location,
                });
            }
        }
        found
    }
}

/// Closest point to `target` on the edge from `start` to `end`
///
/// `radius` scales the returned distance (use [`crate::EARTH_MEAN_RADIUS_M`] for meters).
/// Non-finite inputs yield `None`.
pub fn nearest_on_edge(
    target: GeoPoint,
    start: GeoPoint,
    end: GeoPoint,
    radius: f64,
) -> Option<EdgeCandidate> {
    Edge::new(start, end).closest_candidate(target, radius, f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EARTH_MEAN_RADIUS_M;

    fn candidate(target: GeoPoint, start: GeoPoint, end: GeoPoint) -> EdgeCandidate {
        nearest_on_edge(target, start, end, EARTH_MEAN_RADIUS_M).unwrap()
    }

    #[test]
    fn test_interior_projection_beats_endpoints() {
        let start = GeoPoint::new(39.70, -104.99);
        let end = GeoPoint::new(39.71, -104.98);
        let target = GeoPoint::new(39.7060, -104.9870);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::Interior);

        let to_start = scaled_distance(target, start, EARTH_MEAN_RADIUS_M);
        let to_end = scaled_distance(target, end, EARTH_MEAN_RADIUS_M);
        assert!(result.distance <= to_start);
        assert!(result.distance <= to_end);
    }

    #[test]
    fn test_beyond_end_snaps_to_end() {
        let start = GeoPoint::new(39.70, -104.99);
        let end = GeoPoint::new(39.71, -104.98);
        let target = GeoPoint::new(39.72, -104.97);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::End);
        assert_eq!(result.point, end);
    }

    #[test]
    fn test_beyond_start_snaps_to_start() {
        let start = GeoPoint::new(39.70, -104.99);
        let end = GeoPoint::new(39.71, -104.98);
        let target = GeoPoint::new(39.69, -105.00);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::Start);
        assert_eq!(result.point, start);
    }

    #[test]
    fn test_vertical_edge_projects_onto_meridian() {
        let start = GeoPoint::new(39.70, -105.0);
        let end = GeoPoint::new(39.80, -105.0);
        let target = GeoPoint::new(39.75, -104.99);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::Interior);
        assert_eq!(result.point, GeoPoint::new(39.75, -105.0));
        assert!(result.distance.is_finite());
    }

    #[test]
    fn test_vertical_edge_outside_bounds_uses_endpoint() {
        let start = GeoPoint::new(39.80, -105.0);
        let end = GeoPoint::new(39.70, -105.0);
        let target = GeoPoint::new(39.65, -104.99);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::End);
        assert_eq!(result.point, end);
    }

    #[test]
    fn test_horizontal_edge_projects_onto_parallel() {
        let start = GeoPoint::new(39.75, -105.0);
        let end = GeoPoint::new(39.75, -104.9);
        let target = GeoPoint::new(39.76, -104.95);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::Interior);
        assert_eq!(result.point, GeoPoint::new(39.75, -104.95));
    }

    #[test]
    fn test_horizontal_edge_outside_bounds_uses_endpoint() {
        let start = GeoPoint::new(39.75, -105.0);
        let end = GeoPoint::new(39.75, -104.9);
        let target = GeoPoint::new(39.76, -105.1);

        let result = candidate(target, start, end);
        assert_eq!(result.location, SegmentLocation::Start);
        assert_eq!(result.point, start);
    }

    #[test]
    fn test_zero_length_edge_is_an_endpoint() {
        let vertex = GeoPoint::new(39.75, -105.0);
        let target = GeoPoint::new(39.76, -105.01);

        let result = candidate(target, vertex, vertex);
        assert_eq!(result.location, SegmentLocation::Start);
        assert_eq!(result.point, vertex);
    }

    #[test]
    fn test_target_on_vertex_has_zero_distance() {
        let start = GeoPoint::new(39.70, -104.99);
        let end = GeoPoint::new(39.71, -104.98);

        let result = candidate(start, start, end);
        assert!(result.distance < 1e-6);
        assert!((result.point.latitude - start.latitude).abs() < 1e-9);
        assert!((result.point.longitude - start.longitude).abs() < 1e-9);
    }

    #[test]
    fn test_no_candidate_when_not_improving() {
        let edge = Edge::new(GeoPoint::new(39.70, -104.99), GeoPoint::new(39.71, -104.98));
        let target = GeoPoint::new(39.72, -104.97);
        assert!(edge.closest_candidate(target, EARTH_MEAN_RADIUS_M, 0.0).is_none());
    }

    #[test]
    fn test_end_is_checked_after_start_improves() {
        // Both endpoints improve on the running minimum; the end vertex is nearer
        let edge = Edge::new(GeoPoint::new(39.70, -104.99), GeoPoint::new(39.71, -104.98));
        let target = GeoPoint::new(39.72, -104.97);
        let result = edge
            .closest_candidate(target, EARTH_MEAN_RADIUS_M, f64::INFINITY)
            .unwrap();
        assert_eq!(result.location, SegmentLocation::End);
    }

    #[test]
    fn test_non_finite_target_yields_nothing() {
        let start = GeoPoint::new(39.70, -104.99);
        let end = GeoPoint::new(39.71, -104.98);
        let target = GeoPoint::new(f64::NAN, -104.98);
        assert!(nearest_on_edge(target, start, end, EARTH_MEAN_RADIUS_M).is_none());
    }
}
