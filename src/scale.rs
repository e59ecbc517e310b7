use crate::traffic::TimeFilter;

/// Square-root scale from traffic counts to marker radii, so marker area
/// tracks traffic linearly. The domain maximum is fixed from the unfiltered
/// dataset and reused for every filter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusScale {
    max_traffic: usize,
    min_radius: f64,
    max_radius: f64,
}

impl RadiusScale {
    pub fn unfiltered(max_traffic: usize) -> Self {
        Self {
            max_traffic,
            min_radius: 0.0,
            max_radius: 25.0,
        }
    }

    /// Filtered counts are much smaller, so the range widens to keep the
    /// sparse markers visible.
    pub fn filtered(max_traffic: usize) -> Self {
        Self {
            max_traffic,
            min_radius: 3.0,
            max_radius: 50.0,
        }
    }

    pub fn for_filter(max_traffic: usize, filter: TimeFilter) -> Self {
        if filter.is_active() {
            Self::filtered(max_traffic)
        } else {
            Self::unfiltered(max_traffic)
        }
    }

    pub fn radius(&self, traffic: usize) -> f64 {
        if self.max_traffic == 0 {
            return self.min_radius;
        }

        let clamped = traffic.min(self.max_traffic) as f64;
        let t = (clamped / self.max_traffic as f64).sqrt();
        self.min_radius + (self.max_radius - self.min_radius) * t
    }
}
