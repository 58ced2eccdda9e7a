use clap::Parser;
use point_snap::{Config, GeoPoint, Result, SnapError, SnapMode};
use std::path::PathBuf;

/// Environment variable consulted when `--earth-radius` is not given
pub const EARTH_RADIUS_ENV: &str = "POINT_SNAP_EARTH_RADIUS_M";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Point Snap - Move a point onto the nearest feature of GPX reference data
pub struct Settings {
    /// GPX files providing the reference layer
    #[clap(short, long = "gpx", value_name = "FILE", required = true)]
    pub gpx_files: Vec<PathBuf>,

    /// Latitude of the point to snap, in degrees
    #[clap(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude of the point to snap, in degrees
    #[clap(long, allow_hyphen_values = true)]
    pub lon: f64,

    /// What to snap to: points (waypoints), vertices or paths (tracks and routes)
    #[clap(short, long, default_value = "paths")]
    pub mode: String,

    /// Earth radius in meters used for reported distances
    #[clap(long, value_name = "METERS")]
    pub earth_radius: Option<f64>,
}

/// Read an environment variable, parsing it to the desired type
pub fn get_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

impl Settings {
    /// Point given on the command line
    pub fn target(&self) -> Result<GeoPoint> {
        let target = GeoPoint::new(self.lat, self.lon);
        if !target.is_finite() {
            return Err(SnapError::InvalidCoordinate(format!(
                "({}, {})",
                self.lat, self.lon
            )));
        }
        Ok(target)
    }

    pub fn snap_mode(&self) -> Result<SnapMode> {
        self.mode.parse()
    }

    /// Search configuration: the flag wins over the environment, then the default
    pub fn config(&self) -> Config {
        let earth_radius_m = self
            .earth_radius
            .or_else(|| get_env(EARTH_RADIUS_ENV))
            .unwrap_or(Config::default().earth_radius_m);
        Config { earth_radius_m }
    }
}
