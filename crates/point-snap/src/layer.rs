//! Reference layer assembled from GPX data
//!
//! Waypoints become point features, and every track segment and route becomes one path.
//! The layer only stores coordinates; the searches in [`crate::Snapper`] run against it.

use crate::{
    Feature, FeatureGeometry, GeoPoint, PathCollection, Result, SnapError, SnapResult, Snapper,
};
use geo::Rect;
use rayon::prelude::*;
use std::path::Path;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which search to run against a layer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SnapMode {
    /// Nearest point feature
    Points,
    /// Nearest existing polyline vertex
    Vertices,
    /// Nearest point anywhere along the polylines
    #[default]
    Paths,
}

impl FromStr for SnapMode {
    type Err = SnapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "points" | "point" => Ok(SnapMode::Points),
            "vertices" | "vertex" => Ok(SnapMode::Vertices),
            "paths" | "path" | "lines" => Ok(SnapMode::Paths),
            other => Err(SnapError::InvalidConfig(format!(
                "unknown snap mode '{other}', expected points, vertices or paths"
            ))),
        }
    }
}

/// Point features and polyline paths of a reference layer
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceLayer {
    /// Point features, in source order
    features: Vec<Feature>,
    /// Polyline paths, in source order
    paths: PathCollection,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl ReferenceLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a layer from parsed GPX data
    ///
    /// Points with non-finite coordinates are skipped with a warning. Empty layers are
    /// allowed: every search against them reports [`SnapResult::NotFound`].
    pub fn from_gpx(gpx_data: &gpx::Gpx) -> Self {
        #[cfg(feature = "profiling")]
        profiling::scope!("layer::from_gpx");

        let mut layer = Self::new();

        for waypoint in &gpx_data.waypoints {
            let point = GeoPoint::from(waypoint);
            if !point.is_finite() {
                tracing::warn!(
                    "Skipping waypoint with invalid coordinates: ({}, {})",
                    point.latitude,
                    point.longitude
                );
                continue;
            }
            let feature = Feature::point(point);
            layer.features.push(match &waypoint.name {
                Some(name) => feature.with_name(name.clone()),
                None => feature,
            });
        }

        for track in &gpx_data.tracks {
            for segment in &track.segments {
                layer.paths.push(Self::finite_path(&segment.points));
            }
        }
        for route in &gpx_data.routes {
            layer.paths.push(Self::finite_path(&route.points));
        }

        tracing::debug!(
            "Built reference layer with {} points, {} paths and {} vertices",
            layer.point_count(),
            layer.path_count(),
            layer.vertex_count()
        );
        layer
    }

    /// Read a GPX document from any reader
    pub fn read<R: std::io::Read>(reader: R) -> Result<Self> {
        let gpx_data = gpx::read(reader)?;
        Ok(Self::from_gpx(&gpx_data))
    }

    /// Load and merge GPX files in parallel
    ///
    /// Files are merged in the order given, so tie-breaking stays deterministic.
    pub fn load_from_files<P: AsRef<Path> + Send + Sync>(paths: &[P]) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("layer::load_from_files");

        let layers: Result<Vec<ReferenceLayer>> = paths
            .par_iter()
            .map(|path| {
                let file = std::fs::File::open(path.as_ref())?;
                let reader = std::io::BufReader::new(file);
                Self::read(reader)
            })
            .collect();

        let mut merged = Self::new();
        for layer in layers? {
            merged.merge(layer);
        }
        tracing::info!(
            "Loaded {} files: {} points, {} paths",
            paths.len(),
            merged.point_count(),
            merged.path_count()
        );
        Ok(merged)
    }

    /// Add a feature, routing polylines into the path collection
    pub fn add_feature(&mut self, feature: Feature) {
        match feature.geometry {
            FeatureGeometry::Polyline(paths) => self.paths.extend(paths),
            FeatureGeometry::Point(_) => self.features.push(feature),
        }
    }

    /// Append all features and paths of `other`
    pub fn merge(&mut self, other: ReferenceLayer) {
        self.features.extend(other.features);
        self.paths.extend(other.paths);
    }

    #[inline]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[inline]
    pub fn paths(&self) -> &PathCollection {
        &self.paths
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn path_count(&self) -> usize {
        self.paths.path_count()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.paths.vertex_count()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.paths.vertex_count() == 0
    }

    /// Bounding box of all points and vertices, in degrees (x = longitude, y = latitude)
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        let points = self
            .features
            .iter()
            .filter_map(|f| match f.geometry {
                FeatureGeometry::Point(point) => Some(point),
                FeatureGeometry::Polyline(_) => None,
            })
            .chain(self.paths.vertices().map(|(_, _, vertex)| vertex));

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        let mut found = false;

        for point in points {
            min_x = min_x.min(point.longitude);
            min_y = min_y.min(point.latitude);
            max_x = max_x.max(point.longitude);
            max_y = max_y.max(point.latitude);
            found = true;
        }

        found.then(|| {
            Rect::new(
                geo::Coord { x: min_x, y: min_y },
                geo::Coord { x: max_x, y: max_y },
            )
        })
    }

    /// Run the search selected by `mode` against this layer
    pub fn snap(&self, snapper: &Snapper, target: GeoPoint, mode: SnapMode) -> SnapResult {
        match mode {
            SnapMode::Points => snapper.snap_to_points(target, &self.features),
            SnapMode::Vertices => snapper.snap_to_vertices(target, &self.paths),
            SnapMode::Paths => snapper.snap_to_paths(target, &self.paths),
        }
    }

    fn finite_path(points: &[gpx::Waypoint]) -> Vec<GeoPoint> {
        points
            .iter()
            .map(GeoPoint::from)
            .filter(|point| {
                let finite = point.is_finite();
                if !finite {
                    tracing::warn!(
                        "Skipping track point with invalid coordinates: ({}, {})",
                        point.latitude,
                        point.longitude
                    );
                }
                finite
            })
            .collect()
    }
}
