//! Point Snap - command line front-end
//!
//! Loads GPX files as a reference layer and prints the snapped position of a single point.

mod settings;

use clap::Parser;
use point_snap::{ReferenceLayer, Result, SnapResult, Snapper};
use settings::Settings;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Load the layer and snap the requested point
fn run(settings: &Settings) -> Result<SnapResult> {
    let target = settings.target()?;
    let mode = settings.snap_mode()?;
    let snapper = Snapper::new(settings.config())?;

    let layer = ReferenceLayer::load_from_files(settings.gpx_files.as_slice())?;
    if let Some(bbox) = layer.bounding_box() {
        tracing::debug!(
            "Layer bounds: lon {:.6}..{:.6}, lat {:.6}..{:.6}",
            bbox.min().x,
            bbox.max().x,
            bbox.min().y,
            bbox.max().y
        );
    }

    Ok(layer.snap(&snapper, target, mode))
}

/// Exit status when a point was snapped
const EXIT_SNAPPED: u8 = 0;
/// Exit status when the reference layer had nothing to snap to
const EXIT_NOT_FOUND: u8 = 1;
/// Exit status when loading or configuration failed
const EXIT_ERROR: u8 = 2;

/// Log the outcome and return the exit status with the line to print, if any
fn report(settings: &Settings, result: &Result<SnapResult>) -> (u8, Option<String>) {
    match result {
        Ok(SnapResult::Snapped(snapped)) => {
            tracing::info!(
                "Snapped to {:?} at {:.2} m",
                snapped.target,
                snapped.distance
            );
            let line = format!("{},{}", snapped.point.latitude, snapped.point.longitude);
            (EXIT_SNAPPED, Some(line))
        }
        Ok(SnapResult::NotFound) => {
            tracing::warn!("Nothing to snap to");
            let line = format!("{},{}", settings.lat, settings.lon);
            (EXIT_NOT_FOUND, Some(line))
        }
        Err(e) => {
            tracing::error!("{}", e);
            (EXIT_ERROR, None)
        }
    }
}

fn main() -> ExitCode {
    // Setup logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let settings = Settings::parse();

    let (status, line) = report(&settings, &run(&settings));
    if let Some(line) = line {
        println!("{line}");
    }
    ExitCode::from(status)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_settings() -> Settings {
        Settings::try_parse_from([
            "point-snap",
            "--gpx",
            "route.gpx",
            "--lat",
            "39.72",
            "--lon",
            "-104.98",
        ])
        .unwrap()
    }

    #[test]
    fn test_report_not_found_keeps_input_point() {
        let settings = sample_settings();
        let (status, line) = report(&settings, &Ok(SnapResult::NotFound));
        assert_eq!(status, EXIT_NOT_FOUND);
        assert_eq!(line.as_deref(), Some("39.72,-104.98"));
    }

    #[test]
    fn test_report_snapped_prints_new_point() {
        let settings = sample_settings();
        let paths =
            point_snap::PathCollection::from(vec![vec![[39.70, -104.98], [39.71, -104.98]]]);
        let result = point_snap::snap_to_vertices(settings.target().unwrap(), &paths);
        let (status, line) = report(&settings, &Ok(result));
        assert_eq!(status, EXIT_SNAPPED);
        assert_eq!(line.as_deref(), Some("39.71,-104.98"));
    }

    #[test]
    fn test_report_error_prints_nothing() {
        let settings = sample_settings();
        let error = point_snap::SnapError::InvalidConfig("bad".to_string());
        let (status, line) = report(&settings, &Err(error));
        assert_eq!(status, EXIT_ERROR);
        assert!(line.is_none());
    }

    #[test]
    fn test_run_with_missing_file() {
        let settings = Settings::try_parse_from([
            "point-snap",
            "--gpx",
            "/nonexistent/route.gpx",
            "--lat",
            "39.72",
            "--lon",
            "-104.98",
        ])
        .unwrap();
        assert!(matches!(run(&settings), Err(point_snap::SnapError::Io(_))));
    }

    #[test]
    fn test_run_rejects_bad_mode_before_loading() {
        let settings = Settings::try_parse_from([
            "point-snap",
            "--gpx",
            "/nonexistent/route.gpx",
            "--lat",
            "39.72",
            "--lon",
            "-104.98",
            "--mode",
            "nearest",
        ])
        .unwrap();
        assert!(matches!(
            run(&settings),
            Err(point_snap::SnapError::InvalidConfig(_))
        ));
    }
}
