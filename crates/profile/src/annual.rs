use chrono::{Datelike, NaiveDate};

use crate::record::ProfileRecord;

/// Deepest qualifying frost depth within one calendar year.
///
/// Computed once per dataset load and immutable afterwards; per-frame code
/// only decides whether an entry is visible yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnualMaximum {
    pub year: i32,
    pub max_frost_depth_m: f64,
    /// Index of the source record in the aggregated sequence.
    pub record_index: usize,
    /// Date of the source record; the entry becomes visible once playback
    /// reaches this date.
    pub date: NaiveDate,
}

/// Single left-to-right pass over date-ordered records.
///
/// A record qualifies when its frost depth is present, non-negative and no
/// deeper than `max_render_depth_m`. Non-qualifying records neither update
/// the running maximum nor disqualify their year. Ties keep the earliest
/// record (strictly-greater comparison). Years with no qualifying record
/// produce no entry.
pub fn annual_maxima(records: &[ProfileRecord], max_render_depth_m: f64) -> Vec<AnnualMaximum> {
    let mut out = Vec::new();
    let mut current_year: Option<i32> = None;
    let mut best: Option<(f64, usize)> = None;

    for (index, record) in records.iter().enumerate() {
        let year = record.date.year();
        if current_year != Some(year) {
            if let (Some(finished_year), Some((depth, best_index))) = (current_year, best) {
                out.push(AnnualMaximum {
                    year: finished_year,
                    max_frost_depth_m: depth,
                    record_index: best_index,
                    date: records[best_index].date,
                });
            }
            current_year = Some(year);
            best = None;
        }

        let Some(depth) = record.frost_depth_m else {
            continue;
        };
        // Positive test so a NaN from upstream can never become a maximum.
        let qualifies = depth >= 0.0 && depth <= max_render_depth_m;
        if !qualifies {
            continue;
        }
        if best.map_or(true, |(max_depth, _)| depth > max_depth) {
            best = Some((depth, index));
        }
    }

    if let (Some(year), Some((depth, best_index))) = (current_year, best) {
        out.push(AnnualMaximum {
            year,
            max_frost_depth_m: depth,
            record_index: best_index,
            date: records[best_index].date,
        });
    }

    out
}
