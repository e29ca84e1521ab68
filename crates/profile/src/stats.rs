/// Summary statistics over readings with gaps.
pub struct Statistics;

impl Statistics {
    /// Mean of the defined readings, `None` when every reading is absent.
    pub fn mean(values: &[Option<f64>]) -> Option<f64> {
        let mut sum = 0.0;
        let mut count = 0usize;
        for v in values.iter().flatten() {
            sum += v;
            count += 1;
        }
        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }

    pub fn min_max(values: &[Option<f64>]) -> Option<(f64, f64)> {
        let mut defined = values.iter().flatten();
        let first = *defined.next()?;
        let mut min = first;
        let mut max = first;
        for &v in defined {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }

    pub fn defined_count(values: &[Option<f64>]) -> usize {
        values.iter().flatten().count()
    }
}
