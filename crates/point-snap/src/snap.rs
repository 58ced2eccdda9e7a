//! Nearest-geometry searches
//!
//! All three searches are full linear scans that compare candidates with a strict
//! less-than, so the first candidate found at the minimum distance wins. Iteration order
//! (candidate order, or path order then vertex order) is therefore part of the result.

use crate::segment::{Edge, SegmentLocation};
use crate::{
    EARTH_MEAN_RADIUS_M, GeoPoint, PathCollection, PointFeature, Result, SnapError,
    distance::equirectangular_distance,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the searches
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Radius used to turn planar estimates into physical distances (default: mean
    /// Earth radius in meters). Reported distances are in the unit of this radius.
    pub earth_radius_m: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            earth_radius_m: EARTH_MEAN_RADIUS_M,
        }
    }
}

impl Config {
    /// Check that the configured radius is a positive finite number
    pub fn validate(&self) -> Result<()> {
        if !self.earth_radius_m.is_finite() || self.earth_radius_m <= 0.0 {
            return Err(SnapError::InvalidConfig(format!(
                "earth radius must be a positive finite number, got {}",
                self.earth_radius_m
            )));
        }
        Ok(())
    }
}

/// Which piece of reference geometry a snapped point came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SnapTarget {
    /// A discrete point feature, by position in the candidate sequence
    Point { index: usize },
    /// An existing polyline vertex
    Vertex { path: usize, vertex: usize },
    /// A point on the edge from vertex `edge` to vertex `edge + 1` of `path`
    Segment {
        path: usize,
        edge: usize,
        location: SegmentLocation,
    },
}

/// A successful snap
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snapped {
    /// Coordinates to move the target to
    pub point: GeoPoint,
    pub target: SnapTarget,
    /// Approximate distance from the original position, in units of the configured radius
    pub distance: f64,
}

/// Outcome of a search
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SnapResult {
    Snapped(Snapped),
    /// The reference geometry offered nothing to snap to
    NotFound,
}

impl SnapResult {
    #[inline]
    pub fn is_snapped(&self) -> bool {
        matches!(self, SnapResult::Snapped(_))
    }

    #[inline]
    pub fn snapped(&self) -> Option<&Snapped> {
        match self {
            SnapResult::Snapped(snapped) => Some(snapped),
            SnapResult::NotFound => None,
        }
    }

    /// Snapped coordinates, if any
    #[inline]
    pub fn point(&self) -> Option<GeoPoint> {
        self.snapped().map(|s| s.point)
    }

    /// Commit the result to `point`
    ///
    /// Returns `true` and overwrites `point` on success. On [`SnapResult::NotFound`]
    /// `point` is left untouched and `false` is returned.
    pub fn apply_to(&self, point: &mut GeoPoint) -> bool {
        match self {
            SnapResult::Snapped(snapped) => {
                *point = snapped.point;
                true
            }
            SnapResult::NotFound => false,
        }
    }
}

impl From<SnapResult> for Option<Snapped> {
    fn from(result: SnapResult) -> Self {
        match result {
            SnapResult::Snapped(snapped) => Some(snapped),
            SnapResult::NotFound => None,
        }
    }
}

/// The three searches bound to a validated [`Config`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Snapper {
    config: Config,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Snapper {
    /// Create a snapper, rejecting invalid configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Snap to the nearest point feature
    ///
    /// Items whose geometry is not a point are ignored. Fails when no point features
    /// remain.
    pub fn snap_to_points<I>(&self, target: GeoPoint, candidates: I) -> SnapResult
    where
        I: IntoIterator,
        I::Item: PointFeature,
    {
        let mut best: Option<(usize, GeoPoint, f64)> = None;
        let mut considered = 0usize;

        for (index, point) in candidates
            .into_iter()
            .enumerate()
            .filter_map(|(index, feature)| feature.as_point().map(|point| (index, point)))
        {
            considered += 1;
            let distance = equirectangular_distance(
                target.latitude,
                target.longitude,
                point.latitude,
                point.longitude,
            );
            if distance.is_finite() && best.is_none_or(|(_, _, closest)| distance < closest) {
                best = Some((index, point, distance));
            }
        }

        tracing::debug!("Scanned {} point features", considered);

        match best {
            Some((index, point, distance)) => {
                SnapResult::Snapped(Snapped {
                    point,
                    target: SnapTarget::Point { index },
                    distance: distance * self.config.earth_radius_m,
                })
            }
            None => SnapResult::NotFound,
        }
    }

    /// Snap to the nearest existing vertex of any path
    ///
    /// Vertices are flattened across paths, so empty paths are simply skipped. Fails only
    /// when there are no vertices at all.
    pub fn snap_to_vertices(&self, target: GeoPoint, paths: &PathCollection) -> SnapResult {
        let mut best: Option<(usize, usize, GeoPoint, f64)> = None;

        for (path, vertex, point) in paths.vertices() {
            let distance = equirectangular_distance(
                target.latitude,
                target.longitude,
                point.latitude,
                point.longitude,
            );
            if distance.is_finite() && best.is_none_or(|(_, _, _, closest)| distance < closest) {
                best = Some((path, vertex, point, distance));
            }
        }

        match best {
            Some((path, vertex, point, distance)) => {
                SnapResult::Snapped(Snapped {
                    point,
                    target: SnapTarget::Vertex { path, vertex },
                    distance: distance * self.config.earth_radius_m,
                })
            }
            None => {
                tracing::debug!("No vertices to snap to");
                SnapResult::NotFound
            }
        }
    }

    /// Snap to the nearest point anywhere along the paths
    ///
    /// Fails when there are no paths, or when any single path has no vertices. Paths with
    /// one vertex have no edges and contribute nothing.
    pub fn snap_to_paths(&self, target: GeoPoint, paths: &PathCollection) -> SnapResult {
        #[cfg(feature = "profiling")]
        profiling::scope!("snap::snap_to_paths");

        if paths.is_empty() {
            tracing::debug!("No paths to snap to");
            return SnapResult::NotFound;
        }
        if let Some(index) = paths.paths().iter().position(Vec::is_empty) {
            tracing::debug!("Path {} has no vertices, refusing to snap", index);
            return SnapResult::NotFound;
        }

        let radius = self.config.earth_radius_m;
        let mut best: Option<Snapped> = None;

        for (path_index, path) in paths.paths().iter().enumerate() {
            for (edge_index, pair) in path.windows(2).enumerate() {
                let closest = best.map_or(f64::INFINITY, |b| b.distance);
                let edge = Edge::new(pair[0], pair[1]);
                if let Some(candidate) = edge.closest_candidate(target, radius, closest) {
                    best = Some(Snapped {
                        point: candidate.point,
                        target: SnapTarget::Segment {
                            path: path_index,
                            edge: edge_index,
                            location: candidate.location,
                        },
                        distance: candidate.distance,
                    });
                }
            }
        }

        match best {
            Some(snapped) => SnapResult::Snapped(snapped),
            None => {
                tracing::debug!(
                    "No edge produced a candidate across {} paths",
                    paths.path_count()
                );
                SnapResult::NotFound
            }
        }
    }
}

/// [`Snapper::snap_to_points`] with the default configuration
pub fn snap_to_points<I>(target: GeoPoint, candidates: I) -> SnapResult
where
    I: IntoIterator,
    I::Item: PointFeature,
{
    Snapper::default().snap_to_points(target, candidates)
}

/// [`Snapper::snap_to_vertices`] with the default configuration
pub fn snap_to_vertices(target: GeoPoint, paths: &PathCollection) -> SnapResult {
    Snapper::default().snap_to_vertices(target, paths)
}

/// [`Snapper::snap_to_paths`] with the default configuration
pub fn snap_to_paths(target: GeoPoint, paths: &PathCollection) -> SnapResult {
    Snapper::default().snap_to_paths(target, paths)
}

/// Move `point` onto the nearest point feature; `false` leaves it unchanged
pub fn snap_point_to_points<I>(point: &mut GeoPoint, candidates: I) -> bool
where
    I: IntoIterator,
    I::Item: PointFeature,
{
    snap_to_points(*point, candidates).apply_to(point)
}

/// Move `point` onto the nearest polyline vertex; `false` leaves it unchanged
pub fn snap_point_to_vertices(point: &mut GeoPoint, paths: &PathCollection) -> bool {
    snap_to_vertices(*point, paths).apply_to(point)
}

/// Move `point` onto the nearest point along the polyline paths; `false` leaves it unchanged
pub fn snap_point_to_paths(point: &mut GeoPoint, paths: &PathCollection) -> bool {
    snap_to_paths(*point, paths).apply_to(point)
}
