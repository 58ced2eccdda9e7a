//! Plain coordinate containers for snap targets and reference geometry
//!
//! Everything here is in WGS84 latitude/longitude degrees. Conversions to and from the
//! `geo` and `gpx` types follow their convention of `x = longitude`, `y = latitude`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are finite numbers
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

impl From<[f64; 2]> for GeoPoint {
    /// Build from a `[latitude, longitude]` pair
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<(f64, f64)> for GeoPoint {
    /// Build from a `(latitude, longitude)` tuple
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<geo::Point<f64>> for GeoPoint {
    fn from(point: geo::Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<geo::Coord<f64>> for GeoPoint {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.longitude, point.latitude)
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Coord {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<&gpx::Waypoint> for GeoPoint {
    fn from(waypoint: &gpx::Waypoint) -> Self {
        waypoint.point().into()
    }
}

/// An ordered chain of vertices; consecutive pairs are the edges
pub type Path = Vec<GeoPoint>;

/// An ordered sequence of paths, such as the parts of a multi-part polyline
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathCollection {
    paths: Vec<Path>,
}

impl PathCollection {
    pub fn new(paths: Vec<Path>) -> Self {
        Self { paths }
    }

    /// Append a path, keeping insertion order
    pub fn push(&mut self, path: Path) {
        self.paths.push(path);
    }

    #[inline]
    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    /// Number of paths, including empty ones
    #[inline]
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Total number of vertices across all paths
    pub fn vertex_count(&self) -> usize {
        self.paths.iter().map(Vec::len).sum()
    }

    /// Total number of edges (consecutive vertex pairs) across all paths
    pub fn edge_count(&self) -> usize {
        self.paths.iter().map(|p| p.len().saturating_sub(1)).sum()
    }

    /// True when there are no paths at all
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// All vertices flattened in path order, then vertex order
    ///
    /// Yields `(path_index, vertex_index, vertex)`.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, usize, GeoPoint)> + '_ {
        self.paths.iter().enumerate().flat_map(|(path_index, path)| {
            path.iter()
                .enumerate()
                .map(move |(vertex_index, &vertex)| (path_index, vertex_index, vertex))
        })
    }

    /// Extend this collection with the paths of another one
    pub fn extend(&mut self, other: PathCollection) {
        self.paths.extend(other.paths);
    }
}

impl From<Vec<Path>> for PathCollection {
    fn from(paths: Vec<Path>) -> Self {
        Self::new(paths)
    }
}

impl From<Vec<Vec<[f64; 2]>>> for PathCollection {
    /// Build from nested `[latitude, longitude]` arrays
    fn from(paths: Vec<Vec<[f64; 2]>>) -> Self {
        Self::new(
            paths
                .into_iter()
                .map(|path| path.into_iter().map(GeoPoint::from).collect())
                .collect(),
        )
    }
}

impl From<&geo::LineString<f64>> for PathCollection {
    fn from(line: &geo::LineString<f64>) -> Self {
        Self::new(vec![line.coords().copied().map(GeoPoint::from).collect()])
    }
}

impl From<&geo::MultiLineString<f64>> for PathCollection {
    fn from(lines: &geo::MultiLineString<f64>) -> Self {
        Self::new(
            lines
                .iter()
                .map(|line| line.coords().copied().map(GeoPoint::from).collect())
                .collect(),
        )
    }
}

impl From<&gpx::Track> for PathCollection {
    /// One path per track segment
    fn from(track: &gpx::Track) -> Self {
        Self::new(
            track
                .segments
                .iter()
                .map(|segment| segment.points.iter().map(GeoPoint::from).collect())
                .collect(),
        )
    }
}

impl From<&gpx::Route> for PathCollection {
    fn from(route: &gpx::Route) -> Self {
        Self::new(vec![route.points.iter().map(GeoPoint::from).collect()])
    }
}

/// Something that may take part in a discrete-point snap
///
/// Only point geometry participates: implementations return `None` for anything else,
/// and such items are skipped by [`crate::snap_to_points`].
pub trait PointFeature {
    fn as_point(&self) -> Option<GeoPoint>;
}

impl<T: PointFeature + ?Sized> PointFeature for &T {
    #[inline]
    fn as_point(&self) -> Option<GeoPoint> {
        (**self).as_point()
    }
}

impl PointFeature for GeoPoint {
    #[inline]
    fn as_point(&self) -> Option<GeoPoint> {
        Some(*self)
    }
}

impl PointFeature for geo::Point<f64> {
    #[inline]
    fn as_point(&self) -> Option<GeoPoint> {
        Some((*self).into())
    }
}

impl PointFeature for geo::Geometry<f64> {
    fn as_point(&self) -> Option<GeoPoint> {
        match self {
            geo::Geometry::Point(point) => Some((*point).into()),
            _ => None,
        }
    }
}

impl PointFeature for gpx::Waypoint {
    #[inline]
    fn as_point(&self) -> Option<GeoPoint> {
        Some(self.into())
    }
}

/// Geometry carried by a layer feature
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FeatureGeometry {
    Point(GeoPoint),
    Polyline(PathCollection),
}

impl FeatureGeometry {
    /// Geometry type tag, as found in feature sources
    pub fn kind(&self) -> &'static str {
        match self {
            FeatureGeometry::Point(_) => "point",
            FeatureGeometry::Polyline(_) => "polyline",
        }
    }
}

/// A feature record of a reference layer
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Feature {
    pub name: Option<String>,
    pub geometry: FeatureGeometry,
}

impl Feature {
    pub fn point(point: GeoPoint) -> Self {
        Self {
            name: None,
            geometry: FeatureGeometry::Point(point),
        }
    }

    pub fn polyline(paths: PathCollection) -> Self {
        Self {
            name: None,
            geometry: FeatureGeometry::Polyline(paths),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl PointFeature for Feature {
    fn as_point(&self) -> Option<GeoPoint> {
        match &self.geometry {
            FeatureGeometry::Point(point) => Some(*point),
            FeatureGeometry::Polyline(_) => None,
        }
    }
}
