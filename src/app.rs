use crate::{
    dataset::Dataset,
    scale::RadiusScale,
    traffic::{aggregate, filter_trips, StationTraffic, TimeFilter},
};

/// Everything a render pass needs, derived from (dataset, filter) with no
/// hidden state.
pub struct Snapshot {
    pub filter: TimeFilter,
    pub traffic: Vec<StationTraffic>,
    pub scale: RadiusScale,
}

/// Owns the loaded dataset and the active filter. `set_filter` is the only
/// mutation point; everything downstream is recomputed from scratch on each
/// `snapshot` call.
pub struct App {
    dataset: Dataset,
    max_traffic: usize,
    filter: TimeFilter,
}

impl App {
    pub fn new(dataset: Dataset) -> Self {
        // The radius domain is fixed against the unfiltered dataset so that
        // moving the slider rescales counts, not the scale itself.
        let max_traffic = aggregate(&dataset.stations, &dataset.trips)
            .iter()
            .map(|t| t.total_traffic)
            .max()
            .unwrap_or(0);

        Self {
            dataset,
            max_traffic,
            filter: TimeFilter::Any,
        }
    }

    pub fn filter(&self) -> TimeFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TimeFilter) {
        self.filter = filter;
    }

    pub fn snapshot(&self) -> Snapshot {
        let trips = filter_trips(&self.dataset.trips, self.filter);
        let traffic = aggregate(&self.dataset.stations, &trips);

        Snapshot {
            filter: self.filter,
            traffic,
            scale: RadiusScale::for_filter(self.max_traffic, self.filter),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::dataset::{
        station::{Station, StationId},
        trip::Trip,
    };

    fn dataset() -> Dataset {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let trip = |from: &str, to: &str, h1: u32, m1: u32, h2: u32, m2: u32| {
            Trip::new(
                StationId::new(from),
                StationId::new(to),
                day.and_hms_opt(h1, m1, 0).unwrap(),
                day.and_hms_opt(h2, m2, 0).unwrap(),
            )
        };

        Dataset {
            stations: vec![
                Station::new(StationId::new("A"), "A".to_owned(), -71.10, 42.36),
                Station::new(StationId::new("B"), "B".to_owned(), -71.08, 42.37),
            ],
            trips: vec![
                trip("A", "B", 8, 0, 8, 10),
                trip("A", "B", 8, 30, 8, 40),
                trip("B", "A", 17, 0, 17, 20),
            ],
        }
    }

    #[test]
    fn snapshot_recomputes_per_filter_with_fixed_domain() {
        let mut app = App::new(dataset());

        let unfiltered = app.snapshot();
        assert_eq!(unfiltered.traffic[0].total_traffic, 3);
        assert_eq!(unfiltered.traffic[1].total_traffic, 3);
        // Max total traffic is 3, so the busiest station hits the 25 px cap.
        assert_eq!(unfiltered.scale.radius(3), 25.0);

        app.set_filter(TimeFilter::Minute(8 * 60));
        let morning = app.snapshot();
        assert_eq!(morning.traffic[0].departures, 2);
        assert_eq!(morning.traffic[0].arrivals, 0);
        assert_eq!(morning.traffic[1].arrivals, 2);
        // Domain still [0, 3], but the filtered range applies.
        assert_eq!(morning.scale.radius(3), 50.0);
        assert_eq!(morning.scale.radius(0), 3.0);
    }

    #[test]
    fn moving_the_slider_back_restores_the_unfiltered_view() {
        let mut app = App::new(dataset());
        let before = app.snapshot();

        app.set_filter(TimeFilter::Minute(600));
        app.set_filter(TimeFilter::Any);
        let after = app.snapshot();

        assert_eq!(before.traffic, after.traffic);
        assert_eq!(before.scale, after.scale);
    }
}
