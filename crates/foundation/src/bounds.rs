/// Vertical pixel extents
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VerticalSpan {
    pub top: f64,
    pub bottom: f64,
}

impl VerticalSpan {
    pub fn new(top: f64, bottom: f64) -> Self {
        VerticalSpan { top, bottom }
    }

    pub fn centered(center: f64, height: f64) -> Self {
        VerticalSpan {
            top: center - height / 2.0,
            bottom: center + height / 2.0,
        }
    }

    pub fn center(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// True when the spans come within `padding` of touching.
    pub fn overlaps(&self, other: VerticalSpan, padding: f64) -> bool {
        self.top < other.bottom + padding && self.bottom > other.top - padding
    }
}
