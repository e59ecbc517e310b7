use std::collections::HashMap;

use anyhow::anyhow;
use geo_types::Point;
use itertools::Itertools;

use crate::dataset::{
    station::{Station, StationId},
    trip::Trip,
};

/// Trips within an hour (inclusive) of the filter minute are kept.
pub const FILTER_WINDOW_MINUTES: u32 = 60;

/// Time-of-day filter. The UI slider runs over [-1, 1439] with -1 meaning
/// no filter; that sentinel only exists at the boundary, internal state is
/// this enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeFilter {
    Any,
    Minute(u32),
}

impl TimeFilter {
    pub fn from_slider(value: i32) -> anyhow::Result<Self> {
        match value {
            -1 => Ok(Self::Any),
            0..=1439 => Ok(Self::Minute(value as u32)),
            _ => Err(anyhow!("Filter must be -1 or in 0..=1439, got {value}")),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Minute(_))
    }

    /// A trip matches when either endpoint falls within the window. Absolute
    /// clock-minute difference, no wraparound: a 23:50 trip does not match a
    /// 00:10 filter.
    pub fn matches(&self, trip: &Trip) -> bool {
        match self {
            Self::Any => true,
            Self::Minute(m) => {
                trip.start_minutes().abs_diff(*m) <= FILTER_WINDOW_MINUTES
                    || trip.end_minutes().abs_diff(*m) <= FILTER_WINDOW_MINUTES
            }
        }
    }

    /// Slider label text: "8:05 AM" style, or a placeholder when unfiltered.
    pub fn label(&self) -> String {
        match self {
            Self::Any => "(any time)".to_owned(),
            Self::Minute(m) => {
                let (hour, minute) = (m / 60, m % 60);
                let (display_hour, meridiem) = match hour {
                    0 => (12, "AM"),
                    1..=11 => (hour, "AM"),
                    12 => (12, "PM"),
                    _ => (hour - 12, "PM"),
                };
                format!("{display_hour}:{minute:02} {meridiem}")
            }
        }
    }
}

/// Identity for `TimeFilter::Any`, order-preserving subsequence otherwise.
pub fn filter_trips(trips: &[Trip], filter: TimeFilter) -> Vec<Trip> {
    trips
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

/// Trip counts keyed by station id, with an explicit zero default for
/// stations absent from the trip set.
#[derive(Debug, Default)]
pub struct TrafficCounts(HashMap<StationId, usize>);

impl TrafficCounts {
    pub fn tally<'a>(ids: impl Iterator<Item = &'a StationId>) -> Self {
        Self(ids.cloned().counts())
    }

    pub fn get(&self, id: &StationId) -> usize {
        self.0.get(id).copied().unwrap_or(0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StationTraffic {
    pub short_name: StationId,
    pub name: String,
    pub coord: Point<f64>,
    pub arrivals: usize,
    pub departures: usize,
    pub total_traffic: usize,
}

/// One output record per input station, in input order. Departures count
/// trips starting at the station, arrivals count trips ending there; a
/// station no trip touches gets 0/0/0.
pub fn aggregate(stations: &[Station], trips: &[Trip]) -> Vec<StationTraffic> {
    let departures = TrafficCounts::tally(trips.iter().map(|t| &t.start_station_id));
    let arrivals = TrafficCounts::tally(trips.iter().map(|t| &t.end_station_id));

    stations
        .iter()
        .map(|station| {
            let arrivals = arrivals.get(&station.short_name);
            let departures = departures.get(&station.short_name);

            StationTraffic {
                short_name: station.short_name.clone(),
                name: station.name.clone(),
                coord: station.coord,
                arrivals,
                departures,
                total_traffic: arrivals + departures,
            }
        })
        .collect()
}
