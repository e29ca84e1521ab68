/// Scroll-progress primitives
///
/// The whole animation is driven by one scalar: how far the reader has
/// scrolled, expressed in timeline units rather than pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Progress(pub f64); // timeline units

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ProgressSpan {
    pub start: Progress,
    pub end: Progress,
}

impl ProgressSpan {
    pub fn starting_at(start: f64, duration: f64) -> Self {
        Self {
            start: Progress(start),
            end: Progress(start + duration.max(0.0)),
        }
    }

    pub fn duration(&self) -> f64 {
        (self.end.0 - self.start.0).max(0.0)
    }

    /// 0 before the span, 1 after it, linear in between.
    ///
    /// A zero-length span steps straight from 0 to 1 at `start`.
    pub fn fraction_through(&self, t: Progress) -> f64 {
        let duration = self.duration();
        if duration <= 0.0 {
            return if t.0 >= self.start.0 { 1.0 } else { 0.0 };
        }
        ((t.0 - self.start.0) / duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Progress, ProgressSpan};

    #[test]
    fn fraction_is_clamped_and_linear() {
        let span = ProgressSpan::starting_at(10.0, 5.0);
        assert_eq!(span.fraction_through(Progress(9.0)), 0.0);
        assert_eq!(span.fraction_through(Progress(10.0)), 0.0);
        assert_eq!(span.fraction_through(Progress(12.5)), 0.5);
        assert_eq!(span.fraction_through(Progress(15.0)), 1.0);
        assert_eq!(span.fraction_through(Progress(40.0)), 1.0);
    }

    #[test]
    fn zero_length_span_steps_at_start() {
        let span = ProgressSpan::starting_at(45.0, 0.0);
        assert_eq!(span.duration(), 0.0);
        assert_eq!(span.fraction_through(Progress(44.999)), 0.0);
        assert_eq!(span.fraction_through(Progress(45.0)), 1.0);
        assert_eq!(span.fraction_through(Progress(46.0)), 1.0);
    }

    #[test]
    fn negative_duration_is_treated_as_zero() {
        let span = ProgressSpan::starting_at(5.0, -3.0);
        assert_eq!(span.duration(), 0.0);
        assert_eq!(span.fraction_through(Progress(5.0)), 1.0);
    }
}
