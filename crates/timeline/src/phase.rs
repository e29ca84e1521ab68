/// Pause on the first record before playback begins.
///
/// The section visuals appear at `start_at`, sit unchanged for `duration`
/// units, and the temperature overlay fades away over the final `fade_out`
/// units of the pause.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HoldPhase {
    pub start_at: f64,
    pub duration: f64,
    pub fade_out: f64,
}

impl HoldPhase {
    pub fn new(start_at: f64, duration: f64, fade_out: f64) -> Self {
        Self {
            start_at,
            duration,
            fade_out,
        }
    }

    pub fn end(&self) -> f64 {
        self.start_at + self.duration
    }

    pub fn fade_start(&self) -> f64 {
        self.end() - self.fade_out
    }
}

/// Record-by-record playback over the measurement sequence.
///
/// Each record after the first occupies `per_record` timeline units starting
/// at `start_at`. The date readout fades in over `reveal_transition` units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaybackPhase {
    pub start_at: f64,
    pub per_record: f64,
    pub reveal_transition: f64,
}

impl PlaybackPhase {
    pub fn new(start_at: f64, per_record: f64, reveal_transition: f64) -> Self {
        Self {
            start_at,
            per_record,
            reveal_transition,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Before the section visuals appear. Only annotation cues run here.
    Intro,
    /// First record on screen, geometry frozen.
    Hold,
    /// Records advancing with the scroll position.
    Playback,
}
