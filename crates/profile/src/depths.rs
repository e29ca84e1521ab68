/// Depths (meters below ground) at which the borehole reports a temperature,
/// shallowest first. Every record's readings run parallel to this table.
pub const SAMPLED_DEPTHS_M: [f64; 19] = [
    0.0, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 12.0, 15.0,
    19.0,
];

/// Deepest sampled depth; rendering and aggregation never reach past it.
pub const MAX_SAMPLED_DEPTH_M: f64 = 19.0;

/// Linearly interpolate a temperature at `depth_m` from the per-depth readings.
///
/// Absent readings are skipped when searching for the bracketing samples.
/// Depths outside the defined range clamp to the nearest defined sample.
/// Returns `None` only when every reading is absent.
pub fn temperature_at_depth(readings: &[Option<f64>], depth_m: f64) -> Option<f64> {
    let mut below: Option<(f64, f64)> = None;
    let mut above: Option<(f64, f64)> = None;

    for (&sample_depth, reading) in SAMPLED_DEPTHS_M.iter().zip(readings) {
        let Some(value) = *reading else { continue };
        if sample_depth <= depth_m {
            below = Some((sample_depth, value));
        }
        if sample_depth >= depth_m && above.is_none() {
            above = Some((sample_depth, value));
        }
    }

    match (below, above) {
        (None, None) => None,
        (Some((_, value)), None) | (None, Some((_, value))) => Some(value),
        (Some((d0, v0)), Some((d1, v1))) => {
            if d0 == d1 {
                Some(v0)
            } else {
                Some(v0 + (v1 - v0) * (depth_m - d0) / (d1 - d0))
            }
        }
    }
}
