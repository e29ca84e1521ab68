use chrono::NaiveDate;
use foundation::math::DepthProjection;
use foundation::progress::Progress;
use layers::annual_labels::AnnualLabelsLayer;
use layers::background::weekly_frame_name;
use layers::date_display::{DATE_DISPLAY_ANCHOR_PX, format_display_date};
use layers::depth_scale::{DepthScaleLayer, DepthScaleSnapshot};
use layers::section::{CrossSectionLayer, FrostFillPolicy};
use layers::symbology::SectionPalette;
use profile::{AnnualMaximum, MAX_SAMPLED_DEPTH_M, ProfileRecord, annual_maxima};
use scene::Stage;
use scene::components::{Geometry2D, Opacity, TextContent};
use scene::element::ElementId;
use std::collections::BTreeMap;
use timeline::{Phase, Schedule, ScrollMap};

use crate::frame::FrameSnapshot;

/// Static configuration assembled from the section manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorConfig {
    pub projection: DepthProjection,
    pub schedule: Schedule,
    pub scroll: ScrollMap,
    pub palette: SectionPalette,
    pub fill_policy: FrostFillPolicy,
    pub band_resolution_m: f64,
    /// Resting opacity of the temperature overlay while a record is lit.
    pub overlay_opacity: f64,
    /// Records after this date are aggregated but never played back.
    pub cutoff_date: Option<NaiveDate>,
}

/// Stage elements the director drives, keyed for retained-mode hosts.
#[derive(Debug, Clone)]
pub struct ElementRegistry {
    /// One opacity-only element per named setup cue.
    pub cues: BTreeMap<String, ElementId>,
    pub overlay: ElementId,
    pub regions: Vec<ElementId>,
    pub frost_line: ElementId,
    pub date_display: ElementId,
    /// In the same order as extracted annual-label snapshots.
    pub year_markers: Vec<YearElements>,
}

#[derive(Debug, Copy, Clone)]
pub struct YearElements {
    pub year: i32,
    pub marker: ElementId,
    pub label: ElementId,
    pub leader: ElementId,
}

/// Owns the records, the schedule and the retained stage, and turns timeline
/// positions into frames.
#[derive(Debug)]
pub struct Director {
    records: Vec<ProfileRecord>,
    maxima: Vec<AnnualMaximum>,
    projection: DepthProjection,
    schedule: Schedule,
    scroll: ScrollMap,
    overlay_opacity: f64,
    section_layer: CrossSectionLayer,
    scale_layer: DepthScaleLayer,
    labels_layer: AnnualLabelsLayer,
    stage: Stage,
    registry: ElementRegistry,
}

impl Director {
    /// Builds the director from configuration and the full record sequence.
    ///
    /// Annual maxima are computed over every record before the playback
    /// sequence drops records past the cutoff date.
    pub fn new(config: DirectorConfig, records: Vec<ProfileRecord>) -> Self {
        let max_render_depth_m = config.projection.max_render_depth(MAX_SAMPLED_DEPTH_M);
        let maxima = annual_maxima(&records, max_render_depth_m);

        let records: Vec<ProfileRecord> = match config.cutoff_date {
            Some(cutoff) => records.into_iter().filter(|r| r.date <= cutoff).collect(),
            None => records,
        };

        let section_layer = CrossSectionLayer::new(
            config.fill_policy,
            config.band_resolution_m,
            config.palette,
        );
        let scale_layer = DepthScaleLayer::new();
        let labels_layer = AnnualLabelsLayer::new();

        let capacity = region_capacity(
            config.fill_policy,
            config.band_resolution_m,
            max_render_depth_m,
        );
        let mut stage = Stage::new();
        let registry = build_registry(&mut stage, &config, &maxima, &labels_layer, capacity);

        Self {
            records,
            maxima,
            projection: config.projection,
            schedule: config.schedule,
            scroll: config.scroll,
            overlay_opacity: config.overlay_opacity,
            section_layer,
            scale_layer,
            labels_layer,
            stage,
            registry,
        }
    }

    /// Pure frame at timeline position `t`.
    pub fn sample(&self, t: Progress) -> FrameSnapshot {
        let sample = self.schedule.sample(t, self.records.len());
        let record = sample
            .record_index
            .and_then(|index| self.records.get(index));

        let section = record.map(|r| self.section_layer.extract(r, &self.projection));
        let annual_labels =
            record.map(|r| self.labels_layer.extract(&self.maxima, r.date, &self.projection));

        let frost_line_drawable = section.as_ref().is_some_and(|s| s.frost_line.is_some());
        let frost_line_opacity = if frost_line_drawable {
            sample.overlay_scale
        } else {
            0.0
        };

        let date_text = self
            .records
            .get(sample.record_index.unwrap_or(0))
            .map(|r| format_display_date(r.date));
        let background_frame = match sample.phase {
            Phase::Playback => record.map(|r| weekly_frame_name(r.date)),
            Phase::Intro | Phase::Hold => None,
        };

        FrameSnapshot {
            progress: t,
            phase: sample.phase,
            record_index: sample.record_index,
            record_date: record.map(|r| r.date),
            date_text,
            date_display_value: sample.date_display_value,
            background_frame,
            overlay_opacity: self.overlay_opacity * sample.overlay_scale,
            frost_line_opacity,
            cue_values: sample.cue_values,
            section,
            depth_scale: self.scale_layer.extract(&self.projection),
            annual_labels,
        }
    }

    /// Frame for a raw scroll offset in pixels.
    pub fn sample_scroll(&self, scroll_px: f64) -> FrameSnapshot {
        self.sample(self.scroll.progress_at(scroll_px))
    }

    /// Samples `t` and writes the frame into the retained stage.
    ///
    /// Re-applying the same position leaves the stage unchanged.
    pub fn apply(&mut self, t: Progress) -> FrameSnapshot {
        let frame = self.sample(t);

        for (name, element) in &self.registry.cues {
            let value = frame.cue_values.get(name).copied().unwrap_or(0.0);
            self.stage.set_opacity(*element, Opacity::new(value));
        }
        self.stage
            .set_opacity(self.registry.overlay, Opacity::new(frame.overlay_opacity));

        match &frame.section {
            Some(section) => {
                for (index, element) in self.registry.regions.iter().enumerate() {
                    match section.regions.get(index) {
                        Some(region) => {
                            self.stage.set_geometry(
                                *element,
                                Geometry2D::polygon(region.outline.clone()),
                            );
                            self.stage.set_opacity(*element, Opacity::opaque());
                        }
                        None => self.stage.set_opacity(*element, Opacity::transparent()),
                    }
                }
                match &section.frost_line {
                    Some(line) => {
                        self.stage.set_geometry(
                            self.registry.frost_line,
                            Geometry2D::polyline(vec![line.start, line.end]),
                        );
                        self.stage.set_opacity(
                            self.registry.frost_line,
                            Opacity::new(frame.frost_line_opacity),
                        );
                    }
                    None => self
                        .stage
                        .set_opacity(self.registry.frost_line, Opacity::transparent()),
                }
            }
            None => {
                for element in &self.registry.regions {
                    self.stage.set_opacity(*element, Opacity::transparent());
                }
                self.stage
                    .set_opacity(self.registry.frost_line, Opacity::transparent());
            }
        }

        match &frame.annual_labels {
            Some(snapshot) => {
                for (entry, label) in self.registry.year_markers.iter().zip(&snapshot.labels) {
                    let opacity = if label.visible {
                        Opacity::opaque()
                    } else {
                        Opacity::transparent()
                    };
                    self.stage.set_geometry(
                        entry.marker,
                        Geometry2D::polyline(vec![label.marker_start, label.marker_end]),
                    );
                    self.stage.set_opacity(entry.marker, opacity);
                    self.stage
                        .set_geometry(entry.leader, Geometry2D::polyline(label.leader.to_vec()));
                    self.stage.set_opacity(entry.leader, opacity);
                    self.stage
                        .set_geometry(entry.label, Geometry2D::anchor(label.label_anchor));
                    self.stage
                        .set_text(entry.label, TextContent::new(label.text.clone()));
                    self.stage.set_opacity(entry.label, opacity);
                }
            }
            None => {
                for entry in &self.registry.year_markers {
                    self.stage.set_opacity(entry.marker, Opacity::transparent());
                    self.stage.set_opacity(entry.leader, Opacity::transparent());
                    self.stage.set_opacity(entry.label, Opacity::transparent());
                }
            }
        }

        if let Some(text) = &frame.date_text {
            self.stage
                .set_text(self.registry.date_display, TextContent::new(text.clone()));
        }
        self.stage.set_opacity(
            self.registry.date_display,
            Opacity::new(frame.date_display_value),
        );

        frame
    }

    /// Playback record sequence, after the cutoff filter.
    pub fn records(&self) -> &[ProfileRecord] {
        &self.records
    }

    pub fn annual_maxima(&self) -> &[AnnualMaximum] {
        &self.maxima
    }

    pub fn projection(&self) -> &DepthProjection {
        &self.projection
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn elements(&self) -> &ElementRegistry {
        &self.registry
    }

    pub fn depth_scale(&self) -> DepthScaleSnapshot {
        self.scale_layer.extract(&self.projection)
    }

    pub fn total_duration(&self) -> f64 {
        self.schedule.total_duration(self.records.len())
    }

    pub fn scroll_extent_px(&self) -> f64 {
        self.scroll.scroll_extent_px(self.total_duration())
    }
}

fn build_registry(
    stage: &mut Stage,
    config: &DirectorConfig,
    maxima: &[AnnualMaximum],
    labels_layer: &AnnualLabelsLayer,
    region_capacity: usize,
) -> ElementRegistry {
    let cues = config
        .schedule
        .cues()
        .keys()
        .map(|name| (name.clone(), stage.spawn()))
        .collect();

    let overlay = stage.spawn();
    let regions = (0..region_capacity).map(|_| stage.spawn()).collect();
    let frost_line = stage.spawn();

    let date_display = stage.spawn();
    stage.set_geometry(date_display, Geometry2D::anchor(DATE_DISPLAY_ANCHOR_PX));
    stage.set_opacity(date_display, Opacity::transparent());

    // Spawned in placement order so a frame's labels and the registry can be
    // walked in step. Placement order ignores visibility, so it is fixed.
    let placement = labels_layer.extract(maxima, NaiveDate::MAX, &config.projection);
    let year_markers = placement
        .labels
        .iter()
        .map(|label| YearElements {
            year: label.year,
            marker: stage.spawn(),
            label: stage.spawn(),
            leader: stage.spawn(),
        })
        .collect();

    ElementRegistry {
        cues,
        overlay,
        regions,
        frost_line,
        date_display,
        year_markers,
    }
}

fn region_capacity(
    policy: FrostFillPolicy,
    band_resolution_m: f64,
    max_render_depth_m: f64,
) -> usize {
    match policy {
        FrostFillPolicy::TwoRegion => 2,
        FrostFillPolicy::GranularBands => {
            let mut count = 0;
            let mut top = 0.0;
            while top < max_render_depth_m {
                let bottom = (top + band_resolution_m).min(max_render_depth_m);
                if bottom <= top {
                    break;
                }
                count += 1;
                top = bottom;
            }
            count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Director, DirectorConfig};
    use chrono::NaiveDate;
    use foundation::math::{DepthProjection, EdgeLine};
    use foundation::progress::Progress;
    use layers::section::FrostFillPolicy;
    use layers::symbology::SectionPalette;
    use profile::{ProfileRecord, SAMPLED_DEPTHS_M};
    use scene::components::{Geometry2D, Opacity};
    use scene::element::ElementId;
    use std::collections::BTreeMap;
    use timeline::{HoldPhase, Phase, PlaybackPhase, Schedule, ScrollMap, SetupCue};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn record(year: i32, month: u32, frost: Option<f64>) -> ProfileRecord {
        ProfileRecord::new(
            date(year, month, 15),
            vec![None; SAMPLED_DEPTHS_M.len()],
            frost,
        )
    }

    fn records() -> Vec<ProfileRecord> {
        vec![
            record(2008, 1, Some(1.0)),
            record(2008, 7, Some(2.5)),
            record(2008, 10, Some(0.5)),
            record(2009, 2, Some(3.0)),
            record(2009, 8, Some(1.5)),
            record(2009, 11, None),
        ]
    }

    fn config(cutoff: Option<NaiveDate>) -> DirectorConfig {
        let mut cues = BTreeMap::new();
        cues.insert(
            "intro-annotation".to_string(),
            SetupCue::reveal_then_hide(0.0, 10.0, 5.0),
        );
        cues.insert("section-visuals".to_string(), SetupCue::reveal(20.0, 5.0));

        DirectorConfig {
            projection: DepthProjection::new(
                1888.0,
                2560.0,
                EdgeLine::new(760.0, 930.0),
                EdgeLine::new(2100.0, 2560.0),
                4.0,
            )
            .expect("valid projection"),
            schedule: Schedule::new(
                cues,
                HoldPhase::new(20.0, 15.0, 1.0),
                PlaybackPhase::new(45.0, 0.5, 5.0),
            )
            .expect("valid schedule"),
            scroll: ScrollMap::new(100.0),
            palette: SectionPalette::default(),
            fill_policy: FrostFillPolicy::TwoRegion,
            band_resolution_m: 0.05,
            overlay_opacity: 0.5,
            cutoff_date: cutoff,
        }
    }

    fn stage_state(director: &Director) -> Vec<(ElementId, Opacity, Geometry2D)> {
        director
            .stage()
            .visible_elements()
            .into_iter()
            .map(|(id, opacity, geometry)| (id, opacity, geometry.clone()))
            .collect()
    }

    #[test]
    fn sampling_is_independent_of_scrub_history() {
        let director = Director::new(config(None), records());
        let direct = director.sample(Progress(46.0));
        for step in 0..=95 {
            let _ = director.sample(Progress(step as f64 * 0.5));
        }
        assert_eq!(director.sample(Progress(46.0)), direct);
    }

    #[test]
    fn record_advances_with_playback() {
        let director = Director::new(config(None), records());

        let hold = director.sample(Progress(20.0));
        assert_eq!(hold.phase, Phase::Hold);
        assert_eq!(hold.record_index, Some(0));
        assert_eq!(hold.date_text.as_deref(), Some("2008 Jan"));
        assert_eq!(hold.background_frame, None);

        let playback = director.sample(Progress(45.0));
        assert_eq!(playback.phase, Phase::Playback);
        assert_eq!(playback.record_index, Some(1));
        assert_eq!(playback.record_date, Some(date(2008, 7, 15)));
        assert_eq!(playback.date_text.as_deref(), Some("2008 Jul"));
        assert_eq!(playback.background_frame.as_deref(), Some("week-29.webp"));

        // 2008's maximum has been reached, 2009's has not.
        let labels = playback.annual_labels.expect("labels during playback");
        assert_eq!(labels.labels.len(), 2);
        assert!(labels.labels[0].visible);
        assert_eq!(labels.labels[0].year, 2008);
        assert!(!labels.labels[1].visible);
        assert_eq!(labels.labels[1].year, 2009);
    }

    #[test]
    fn cutoff_drops_playback_but_not_aggregation() {
        let director = Director::new(config(Some(date(2008, 12, 31))), records());

        assert_eq!(director.records().len(), 3);
        let years: Vec<i32> = director.annual_maxima().iter().map(|m| m.year).collect();
        assert_eq!(years, [2008, 2009]);

        assert_eq!(director.total_duration(), 46.5);
        assert_eq!(director.scroll_extent_px(), 4650.0);
    }

    #[test]
    fn overlay_follows_the_hold_fade() {
        let director = Director::new(config(None), records());
        assert_eq!(director.sample(Progress(10.0)).overlay_opacity, 0.0);
        assert_eq!(director.sample(Progress(25.0)).overlay_opacity, 0.5);
        assert_eq!(director.sample(Progress(34.5)).overlay_opacity, 0.25);
        assert_eq!(director.sample(Progress(40.0)).overlay_opacity, 0.0);
        assert_eq!(director.sample(Progress(45.0)).overlay_opacity, 0.5);
    }

    #[test]
    fn apply_is_idempotent() {
        let mut director = Director::new(config(None), records());

        let first = director.apply(Progress(45.0));
        let after_first = {
            let mut d = Director::new(config(None), records());
            let _ = d.apply(Progress(45.0));
            stage_state(&d)
        };
        let second = director.apply(Progress(45.0));
        let after_second = stage_state(&director);

        assert_eq!(first, second);
        assert_eq!(after_first, after_second);
    }

    #[test]
    fn apply_writes_section_state_into_the_stage() {
        let mut director = Director::new(config(None), records());

        let _ = director.apply(Progress(10.0));
        let overlay = director.elements().overlay;
        let region = director.elements().regions[0];
        assert_eq!(director.stage().opacity(overlay), Some(Opacity::new(0.0)));
        assert_eq!(director.stage().opacity(region), Some(Opacity::new(0.0)));

        let _ = director.apply(Progress(25.0));
        assert_eq!(director.stage().opacity(overlay), Some(Opacity::new(0.5)));
        assert_eq!(director.stage().opacity(region), Some(Opacity::new(1.0)));
        assert!(matches!(
            director.stage().geometry(region),
            Some(Geometry2D::Polygon { .. })
        ));

        let frost = director.elements().frost_line;
        assert_eq!(director.stage().opacity(frost), Some(Opacity::new(1.0)));
    }

    #[test]
    fn empty_dataset_never_panics() {
        let director = Director::new(config(None), Vec::new());
        let frame = director.sample(Progress(50.0));
        assert_eq!(frame.record_index, None);
        assert_eq!(frame.date_text, None);
        assert!(frame.section.is_none());
        assert_eq!(director.total_duration(), 45.0);
    }
}
