use foundation::progress::Progress;

/// Linear mapping between page scroll distance and timeline progress.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScrollMap {
    pub pixels_per_unit: f64,
}

impl ScrollMap {
    pub fn new(pixels_per_unit: f64) -> Self {
        Self { pixels_per_unit }
    }

    /// Timeline position for a scroll offset in pixels.
    ///
    /// Offsets before the pinned region map to the timeline start.
    pub fn progress_at(&self, scroll_px: f64) -> Progress {
        Progress((scroll_px / self.pixels_per_unit).max(0.0))
    }

    /// Scrollable distance needed to play a timeline of `duration` units.
    pub fn scroll_extent_px(&self, duration: f64) -> f64 {
        duration * self.pixels_per_unit
    }
}
