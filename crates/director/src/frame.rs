use chrono::NaiveDate;
use foundation::progress::Progress;
use layers::annual_labels::AnnualLabelsSnapshot;
use layers::depth_scale::DepthScaleSnapshot;
use layers::section::SectionSnapshot;
use std::collections::BTreeMap;
use timeline::Phase;

/// Everything drawn at one timeline position.
///
/// A frame is a pure function of the director's inputs and `progress`, so
/// two frames sampled at the same position are identical regardless of what
/// was sampled in between.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub progress: Progress,
    pub phase: Phase,
    /// Record in view, if the playhead has reached the section scene.
    pub record_index: Option<usize>,
    pub record_date: Option<NaiveDate>,
    /// Date readout text. Present whenever records exist; the readout sits
    /// transparent until playback fades it in.
    pub date_text: Option<String>,
    /// Opacity of the date readout.
    pub date_display_value: f64,
    /// Weekly background frame to show. `None` outside playback, which keeps
    /// the host's initial frame on screen.
    pub background_frame: Option<String>,
    pub overlay_opacity: f64,
    /// Element opacity of the frost line, 0 when no line is drawable.
    pub frost_line_opacity: f64,
    /// Envelope value per named setup cue.
    pub cue_values: BTreeMap<String, f64>,
    pub section: Option<SectionSnapshot>,
    pub depth_scale: DepthScaleSnapshot,
    pub annual_labels: Option<AnnualLabelsSnapshot>,
}
