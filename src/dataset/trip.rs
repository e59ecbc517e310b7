use chrono::{NaiveDateTime, Timelike};

use crate::dataset::station::StationId;

/// One rental. Only the time-of-day component of the timestamps matters for
/// filtering; the date is kept as parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct Trip {
    pub start_station_id: StationId,
    pub end_station_id: StationId,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,
}

impl Trip {
    pub fn new(
        start_station_id: StationId,
        end_station_id: StationId,
        started_at: NaiveDateTime,
        ended_at: NaiveDateTime,
    ) -> Self {
        Self {
            start_station_id,
            end_station_id,
            started_at,
            ended_at,
        }
    }

    pub fn start_minutes(&self) -> u32 {
        minutes_since_midnight(self.started_at)
    }

    pub fn end_minutes(&self) -> u32 {
        minutes_since_midnight(self.ended_at)
    }
}

/// Clock minutes in [0, 1439]. Seconds are discarded.
pub fn minutes_since_midnight(t: NaiveDateTime) -> u32 {
    t.hour() * 60 + t.minute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn minutes_ignore_seconds_and_date() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 10, 59)
            .unwrap();
        assert_eq!(minutes_since_midnight(t), 8 * 60 + 10);
    }
}
