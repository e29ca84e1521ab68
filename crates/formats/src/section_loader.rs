use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use director::{Director, DirectorConfig};
use foundation::math::{DepthProjection, EdgeLine, ProjectionError};
use layers::section::FrostFillPolicy;
use layers::symbology::SectionPalette;
use timeline::{HoldPhase, PlaybackPhase, Schedule, ScheduleError, ScrollMap, SetupCue};

use crate::contour::GroundContour;
use crate::dataset::{self, DatasetError, DatasetReport};
use crate::manifest::{DEFAULT_BAND_RESOLUTION_M, FillPolicySpec, ScheduleSpec};
use crate::section_package::{SectionPackage, SectionPackageError};

#[derive(Debug)]
pub enum SectionLoadError {
    Package(SectionPackageError),
    Dataset {
        path: PathBuf,
        source: DatasetError,
    },
    Projection(ProjectionError),
    Schedule(ScheduleError),
    InvalidManifest {
        reason: String,
    },
}

impl fmt::Display for SectionLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SectionLoadError::Package(err) => write!(f, "section package error: {err}"),
            SectionLoadError::Dataset { path, source } => {
                write!(f, "failed to load dataset {}: {source}", path.display())
            }
            SectionLoadError::Projection(err) => write!(f, "invalid section projection: {err}"),
            SectionLoadError::Schedule(err) => write!(f, "invalid schedule: {err}"),
            SectionLoadError::InvalidManifest { reason } => write!(f, "invalid manifest: {reason}"),
        }
    }
}

impl std::error::Error for SectionLoadError {}

/// A loaded section, ready to drive: the director plus the load artifacts a
/// host needs alongside it.
#[derive(Debug)]
pub struct SectionBundle {
    pub director: Director,
    pub contour: GroundContour,
    pub dataset_report: DatasetReport,
    pub package: SectionPackage,
}

/// Loads the package at `root` and assembles a director from it.
pub fn load_section_from_package_dir(
    root: impl AsRef<Path>,
) -> Result<SectionBundle, SectionLoadError> {
    let package = SectionPackage::load(root).map_err(SectionLoadError::Package)?;
    load_section_from_package(package)
}

/// Assembles a director from an already-loaded package.
pub fn load_section_from_package(
    package: SectionPackage,
) -> Result<SectionBundle, SectionLoadError> {
    let manifest = package.manifest();

    let projection = DepthProjection::new(
        manifest.image.width_px,
        manifest.image.height_px,
        EdgeLine::new(manifest.ground_line.y_left_px, manifest.ground_line.y_right_px),
        EdgeLine::new(
            manifest.reference_line.y_left_px,
            manifest.reference_line.y_right_px,
        ),
        manifest.reference_line.depth_m,
    )
    .map_err(SectionLoadError::Projection)?;

    let schedule = build_schedule(&manifest.schedule)?;

    if !manifest.scroll_pixels_per_unit.is_finite() || manifest.scroll_pixels_per_unit <= 0.0 {
        return Err(SectionLoadError::InvalidManifest {
            reason: format!(
                "scroll_pixels_per_unit must be positive, got {}",
                manifest.scroll_pixels_per_unit
            ),
        });
    }
    if !(0.0..=1.0).contains(&manifest.overlay_opacity) {
        return Err(SectionLoadError::InvalidManifest {
            reason: format!(
                "overlay_opacity must be within 0..=1, got {}",
                manifest.overlay_opacity
            ),
        });
    }
    let band_resolution_m = manifest
        .band_resolution_m
        .unwrap_or(DEFAULT_BAND_RESOLUTION_M);
    if !band_resolution_m.is_finite() || band_resolution_m <= 0.0 {
        return Err(SectionLoadError::InvalidManifest {
            reason: format!("band_resolution_m must be positive, got {band_resolution_m}"),
        });
    }

    let dataset_path = package.root().join(&manifest.dataset.path);
    let (records, dataset_report) = dataset::load_records(&dataset_path)
        .map_err(|source| SectionLoadError::Dataset {
            path: dataset_path.clone(),
            source,
        })?;

    if let Some(expected) = &manifest.dataset.blake3 {
        match dataset::fingerprint(&dataset_path) {
            Ok(actual) if &actual == expected => {}
            Ok(actual) => tracing::warn!(
                "dataset fingerprint mismatch: manifest pins {expected}, file is {actual}"
            ),
            Err(err) => tracing::warn!("dataset fingerprint unavailable: {err}"),
        }
    }

    let contour = match &manifest.contour {
        Some(entry) => GroundContour::from_file(package.root().join(&entry.path), &projection),
        None => GroundContour::fallback(&projection),
    };

    let config = DirectorConfig {
        projection,
        schedule,
        scroll: ScrollMap::new(manifest.scroll_pixels_per_unit),
        palette: SectionPalette::default(),
        fill_policy: match manifest.fill_policy {
            FillPolicySpec::TwoRegion => FrostFillPolicy::TwoRegion,
            FillPolicySpec::GranularBands => FrostFillPolicy::GranularBands,
        },
        band_resolution_m,
        overlay_opacity: manifest.overlay_opacity,
        cutoff_date: manifest.cutoff_date,
    };

    Ok(SectionBundle {
        director: Director::new(config, records),
        contour,
        dataset_report,
        package,
    })
}

/// Shorthand for hosts that only want the director.
pub fn load_director(root: impl AsRef<Path>) -> Result<Director, SectionLoadError> {
    Ok(load_section_from_package_dir(root)?.director)
}

fn build_schedule(spec: &ScheduleSpec) -> Result<Schedule, SectionLoadError> {
    let mut cues = BTreeMap::new();
    for cue in &spec.cues {
        let envelope = match cue.hide_at {
            Some(hide_at) => SetupCue::reveal_then_hide(cue.reveal_at, hide_at, cue.transition),
            None => SetupCue::reveal(cue.reveal_at, cue.transition),
        };
        if cues.insert(cue.name.clone(), envelope).is_some() {
            return Err(SectionLoadError::InvalidManifest {
                reason: format!("duplicate cue '{}'", cue.name),
            });
        }
    }
    Schedule::new(
        cues,
        HoldPhase::new(spec.hold.start_at, spec.hold.duration, spec.hold.fade_out),
        PlaybackPhase::new(
            spec.playback.start_at,
            spec.playback.per_record,
            spec.playback.reveal_transition,
        ),
    )
    .map_err(SectionLoadError::Schedule)
}
