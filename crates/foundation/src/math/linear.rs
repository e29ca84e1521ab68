/// A quantity that varies linearly from the left edge of an image to the right.
///
/// The cross-section's ground line and reference-depth line are both defined
/// this way: one value at `x = 0`, one at `x = width`, interpolated in between.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EdgeLine {
    pub left: f64,
    pub right: f64,
}

impl EdgeLine {
    pub fn new(left: f64, right: f64) -> Self {
        Self { left, right }
    }

    /// Value at `fraction` of the way across, 0 at the left edge, 1 at the right.
    ///
    /// Fractions outside `[0, 1]` extrapolate on the same line.
    pub fn at_fraction(self, fraction: f64) -> f64 {
        self.left + (self.right - self.left) * fraction
    }

    pub fn is_finite(self) -> bool {
        self.left.is_finite() && self.right.is_finite()
    }
}
