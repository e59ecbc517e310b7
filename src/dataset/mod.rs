pub mod source;
pub mod station;
pub mod trip;

use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;
use geojson::{FeatureCollection, GeoJson, Value};
use serde::Deserialize;

use crate::dataset::{
    station::{Station, StationId},
    trip::Trip,
};

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

pub struct Dataset {
    pub stations: Vec<Station>,
    pub trips: Vec<Trip>,
}

impl Dataset {
    pub fn read(stations_source: &str, trips_source: &str) -> anyhow::Result<Self> {
        let stations = read_stations(stations_source)?;
        let trips = read_trips(trips_source)?;

        Ok(Self { stations, trips })
    }
}

#[derive(Deserialize)]
struct StationsDocument {
    data: StationsData,
}

#[derive(Deserialize)]
struct StationsData {
    stations: Vec<StationRecord>,
}

#[derive(Deserialize)]
struct StationRecord {
    short_name: String,
    #[serde(default)]
    name: String,
    lon: f64,
    lat: f64,
}

pub fn read_stations(source: &str) -> anyhow::Result<Vec<Station>> {
    let text = source::read_to_string(source)?;
    parse_stations(&text).with_context(|| format!("Failed to parse stations document {source}"))
}

fn parse_stations(text: &str) -> anyhow::Result<Vec<Station>> {
    let doc: StationsDocument = serde_json::from_str(text)?;

    Ok(doc
        .data
        .stations
        .into_iter()
        .map(|r| Station::new(StationId::new(&r.short_name), r.name, r.lon, r.lat))
        .collect())
}

#[derive(Deserialize)]
struct TripRecord {
    start_station_id: String,
    end_station_id: String,
    started_at: String,
    ended_at: String,
}

pub fn read_trips(source: &str) -> anyhow::Result<Vec<Trip>> {
    let text = source::read_to_string(source)?;
    parse_trips(&text).with_context(|| format!("Failed to parse trips table {source}"))
}

fn parse_trips(text: &str) -> anyhow::Result<Vec<Trip>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut trips = vec![];
    for row in rdr.deserialize() {
        let record: TripRecord = row?;

        trips.push(Trip::new(
            StationId::new(&record.start_station_id),
            StationId::new(&record.end_station_id),
            parse_timestamp(&record.started_at)?,
            parse_timestamp(&record.ended_at)?,
        ));
    }

    Ok(trips)
}

fn parse_timestamp(s: &str) -> anyhow::Result<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| anyhow!("Unrecognized timestamp: {s}"))
}

/// Bike lane networks are passed through untouched; the geometry is opaque
/// to everything in this crate.
pub fn read_lane_network(source: &str) -> anyhow::Result<FeatureCollection> {
    let text = source::read_to_string(source)?;
    let geojson = text
        .parse::<GeoJson>()
        .with_context(|| format!("Failed to parse lane document {source}"))?;

    FeatureCollection::try_from(geojson)
        .with_context(|| format!("Lane document {source} is not a FeatureCollection"))
}

pub fn line_feature_count(collection: &FeatureCollection) -> usize {
    collection
        .features
        .iter()
        .filter(|f| {
            matches!(
                f.geometry.as_ref().map(|g| &g.value),
                Some(Value::LineString(_)) | Some(Value::MultiLineString(_))
            )
        })
        .count()
}
