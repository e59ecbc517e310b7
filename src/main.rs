use std::{fs, time::Instant};

use anyhow::Context;
use clap::Parser;
use geo_types::Point;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde::Serialize;

use bluebikes_traffic::{
    app::App,
    dataset::{self, station::StationId, Dataset},
    traffic::TimeFilter,
    viewport::Camera,
};

/// Map view the original visualization opens on.
const BOSTON_CENTER: (f64, f64) = (-71.0959457, 42.3612026);
const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Parser)]
struct Args {
    /// Path or URL of the stations JSON document
    stations: String,
    /// Path or URL of the trips CSV table
    trips: String,
    /// Time-of-day filter in minutes since midnight, or -1 for no filter
    #[arg(long, default_value_t = -1, allow_hyphen_values = true)]
    filter: i32,
    /// Bike lane GeoJSON documents passed through into the output
    #[arg(long)]
    lanes: Vec<String>,
    /// Screen size as WIDTHxHEIGHT; adds projected pixel positions to markers
    #[arg(long)]
    screen: Option<String>,
    /// Output path (stdout when omitted)
    #[arg(long)]
    out: Option<String>,
}

#[derive(Serialize)]
struct StationMarker {
    short_name: StationId,
    name: String,
    #[serde(serialize_with = "geojson::ser::serialize_geometry")]
    geometry: Point<f64>,
    arrivals: usize,
    departures: usize,
    total_traffic: usize,
    radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    cx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cy: Option<f64>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        log::error!("failed running bluebikes-traffic: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let filter = TimeFilter::from_slider(args.filter)?;
    let camera = args
        .screen
        .as_deref()
        .map(parse_screen)
        .transpose()?
        .map(|(width, height)| Camera {
            center: Point::new(BOSTON_CENTER.0, BOSTON_CENTER.1),
            zoom: DEFAULT_ZOOM,
            width,
            height,
        });

    let now = Instant::now();
    let dataset = Dataset::read(&args.stations, &args.trips)?;
    log::info!(
        "Read {} stations and {} trips in {:?}",
        dataset.stations.len(),
        dataset.trips.len(),
        now.elapsed()
    );

    let mut app = App::new(dataset);
    app.set_filter(filter);
    log::info!("Active filter: {}", filter.label());

    let now = Instant::now();
    let snapshot = app.snapshot();
    log::info!(
        "Aggregated traffic for {} stations in {:?}",
        snapshot.traffic.len(),
        now.elapsed()
    );

    let markers = snapshot.traffic.iter().map(|station| {
        let pos = camera.map(|c| c.project(station.coord));

        StationMarker {
            short_name: station.short_name.clone(),
            name: station.name.clone(),
            geometry: station.coord,
            arrivals: station.arrivals,
            departures: station.departures,
            total_traffic: station.total_traffic,
            radius: snapshot.scale.radius(station.total_traffic),
            cx: pos.map(|p| p.x),
            cy: pos.map(|p| p.y),
        }
    });

    let mut features = markers
        .map(geojson::ser::to_feature)
        .collect::<Result<Vec<Feature>, _>>()
        .context("Failed to serialize station markers")?;

    for source in &args.lanes {
        match dataset::read_lane_network(source) {
            Ok(lanes) => {
                log::info!(
                    "Read {} lane features ({} line features) from {source}",
                    lanes.features.len(),
                    dataset::line_feature_count(&lanes)
                );
                features.extend(lanes.features);
            }
            // A missing lane network degrades the picture, it does not sink
            // the station pipeline.
            Err(e) => log::error!("Skipping lane document {source}: {e:#}"),
        }
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let output = serde_json::to_string_pretty(&GeoJson::from(collection))
        .context("Failed to serialize GeoJSON")?;

    match &args.out {
        Some(path) => {
            fs::write(path, output).with_context(|| format!("Failed to write {path}"))?
        }
        None => println!("{output}"),
    }

    Ok(())
}

fn parse_screen(s: &str) -> anyhow::Result<(f64, f64)> {
    let (w, h) = s
        .split_once('x')
        .context("Screen size must be WIDTHxHEIGHT")?;

    Ok((
        w.parse().context("Invalid screen width")?,
        h.parse().context("Invalid screen height")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_sizes_parse() {
        assert_eq!(parse_screen("960x600").unwrap(), (960.0, 600.0));
        assert!(parse_screen("960").is_err());
        assert!(parse_screen("960xtall").is_err());
    }
}
