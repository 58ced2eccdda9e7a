//! Point Snap Library - Nearest-Geometry Snapping for Map Editing
//!
//! This library pulls a user-placed point onto the nearest feature of a reference layer.
//! Three searches share one planar distance estimator:
//!
//! - **[`snap_to_points`]**: nearest discrete point feature
//! - **[`snap_to_vertices`]**: nearest vertex of any path of a polyline
//! - **[`snap_to_paths`]**: nearest point anywhere along any segment of a polyline
//!
//! # Architecture
//!
//! - **[`GeoPoint`]** / **[`PathCollection`]**: plain latitude/longitude containers
//! - **[`Snapper`]**: the searches bound to a [`Config`] (Earth radius)
//! - **[`SnapResult`]**: the outcome of a search, committed to a point with [`SnapResult::apply_to`]
//! - **[`ReferenceLayer`]**: point features and paths assembled from GPX data
//!
//! # Performance Characteristics
//!
//! Every search is a linear scan: O(N) for N candidates, vertices or edges, with O(1)
//! auxiliary state. There is no spatial index.

pub mod distance;
mod geometry;
mod layer;
mod segment;
mod snap;

// Public API exports
pub use distance::{EARTH_MEAN_RADIUS_M, equirectangular_distance, scaled_distance};
pub use geometry::{Feature, FeatureGeometry, GeoPoint, Path, PathCollection, PointFeature};
pub use layer::{ReferenceLayer, SnapMode};
pub use segment::{EdgeCandidate, SegmentLocation, nearest_on_edge};
pub use snap::{
    Config, SnapResult, SnapTarget, Snapped, Snapper, snap_point_to_paths, snap_point_to_points,
    snap_point_to_vertices, snap_to_paths, snap_to_points, snap_to_vertices,
};

/// Error types for loading reference data and configuring searches
#[derive(Debug, thiserror::Error)]
pub enum SnapError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),
}

pub type Result<T> = std::result::Result<T, SnapError>;
