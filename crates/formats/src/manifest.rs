use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1.0";

/// Band thickness used when the manifest enables granular fill but does not
/// pick a resolution.
pub const DEFAULT_BAND_RESOLUTION_M: f64 = 0.05;

/// Everything needed to stand up one scroll-driven cross-section: the section
/// image geometry, the reveal schedule, and where the temperature dataset
/// lives relative to the package root.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionManifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub image: ImageExtent,
    pub ground_line: LineSpec,
    pub reference_line: ReferenceLineSpec,
    #[serde(default)]
    pub fill_policy: FillPolicySpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub band_resolution_m: Option<f64>,
    pub overlay_opacity: f64,
    pub scroll_pixels_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_date: Option<NaiveDate>,
    pub schedule: ScheduleSpec,
    pub dataset: DatasetEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contour: Option<ContourEntry>,
}

/// Pixel size of the section artwork.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImageExtent {
    pub width_px: f64,
    pub height_px: f64,
}

/// A straight line across the artwork, given by its y at both edges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LineSpec {
    pub y_left_px: f64,
    pub y_right_px: f64,
}

/// A line of known depth below ground, anchoring the depth scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReferenceLineSpec {
    pub y_left_px: f64,
    pub y_right_px: f64,
    pub depth_m: f64,
}

/// How the frozen/thawed split is painted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FillPolicySpec {
    #[default]
    TwoRegion,
    GranularBands,
}

/// One named reveal, in scroll-progress units.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CueSpec {
    pub name: String,
    pub reveal_at: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_at: Option<f64>,
    pub transition: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HoldSpec {
    pub start_at: f64,
    pub duration: f64,
    pub fade_out: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PlaybackSpec {
    pub start_at: f64,
    pub per_record: f64,
    pub reveal_transition: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleSpec {
    pub cues: Vec<CueSpec>,
    pub hold: HoldSpec,
    pub playback: PlaybackSpec,
}

/// The weekly temperature CSV, with an optional pinned fingerprint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatasetEntry {
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blake3: Option<String>,
}

/// Pre-traced ground outline as SVG path data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContourEntry {
    pub path: String,
}

impl SectionManifest {
    /// Manifest prefilled with the borehole section's production parameters.
    pub fn new(dataset_path: impl Into<String>) -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            name: None,
            image: ImageExtent {
                width_px: 1888.0,
                height_px: 2560.0,
            },
            ground_line: LineSpec {
                y_left_px: 760.0,
                y_right_px: 930.0,
            },
            reference_line: ReferenceLineSpec {
                y_left_px: 2100.0,
                y_right_px: 2560.0,
                depth_m: 4.0,
            },
            fill_policy: FillPolicySpec::TwoRegion,
            band_resolution_m: None,
            overlay_opacity: 0.5,
            scroll_pixels_per_unit: 100.0,
            cutoff_date: None,
            schedule: ScheduleSpec::production(),
            dataset: DatasetEntry {
                path: dataset_path.into(),
                blake3: None,
            },
            contour: None,
        }
    }
}

impl ScheduleSpec {
    /// The reveal plan the published section ships with.
    pub fn production() -> Self {
        Self {
            cues: vec![
                CueSpec {
                    name: "intro-annotation".to_string(),
                    reveal_at: 0.0,
                    hide_at: Some(10.0),
                    transition: 5.0,
                },
                CueSpec {
                    name: "foreground".to_string(),
                    reveal_at: 10.0,
                    hide_at: None,
                    transition: 5.0,
                },
                CueSpec {
                    name: "depth-scale".to_string(),
                    reveal_at: 10.0,
                    hide_at: None,
                    transition: 5.0,
                },
                CueSpec {
                    name: "reference-lines".to_string(),
                    reveal_at: 10.0,
                    hide_at: None,
                    transition: 1.0,
                },
                CueSpec {
                    name: "seasonal-annotation".to_string(),
                    reveal_at: 15.0,
                    hide_at: Some(35.0),
                    transition: 5.0,
                },
                CueSpec {
                    name: "section-visuals".to_string(),
                    reveal_at: 20.0,
                    hide_at: None,
                    transition: 5.0,
                },
            ],
            hold: HoldSpec {
                start_at: 20.0,
                duration: 15.0,
                fade_out: 1.0,
            },
            playback: PlaybackSpec {
                start_at: 45.0,
                per_record: 0.5,
                reveal_transition: 5.0,
            },
        }
    }
}
