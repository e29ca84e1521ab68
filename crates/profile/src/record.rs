use chrono::NaiveDate;

use crate::depths::temperature_at_depth;

/// One row of the borehole time series.
///
/// `temperatures_c` runs parallel to `SAMPLED_DEPTHS_M`; a `None` entry means
/// the source had no reading at that depth, never that it read zero.
/// `frost_depth_m` is the depth at which the temperature profile crosses 0 °C,
/// precomputed upstream: absent when the profile never crosses, negative when
/// the crossing sits above the ground surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub date: NaiveDate,
    pub temperatures_c: Vec<Option<f64>>,
    pub frost_depth_m: Option<f64>,
}

impl ProfileRecord {
    pub fn new(
        date: NaiveDate,
        temperatures_c: Vec<Option<f64>>,
        frost_depth_m: Option<f64>,
    ) -> Self {
        Self {
            date,
            temperatures_c,
            frost_depth_m,
        }
    }

    /// Interpolated temperature at an arbitrary depth.
    pub fn temperature_at(&self, depth_m: f64) -> Option<f64> {
        temperature_at_depth(&self.temperatures_c, depth_m)
    }
}
