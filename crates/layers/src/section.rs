use earcutr::earcut;
use foundation::math::{DepthProjection, Vec2};
use profile::{MAX_SAMPLED_DEPTH_M, ProfileRecord};

use crate::symbology::SectionPalette;

/// How the frozen/unfrozen split of the ground is filled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FrostFillPolicy {
    /// Two quads meeting at the frost depth line.
    TwoRegion,
    /// Horizontal bands colored by the interpolated temperature at their top.
    GranularBands,
}

/// One filled area of the cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRegion {
    /// Closed outline in image coordinates.
    pub outline: Vec<Vec2>,
    // Flat triangle list (3 vertices per triangle) in image coordinates.
    pub triangles: Vec<Vec2>,
    pub color: [f32; 4],
}

/// The frost depth boundary across the section, when drawable.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrostLine {
    pub start: Vec2,
    pub end: Vec2,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct SectionSnapshot {
    pub regions: Vec<FilledRegion>,
    pub frost_line: Option<FrostLine>,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CrossSectionLayer {
    policy: FrostFillPolicy,
    band_resolution_m: f64,
    palette: SectionPalette,
}

impl CrossSectionLayer {
    pub fn new(policy: FrostFillPolicy, band_resolution_m: f64, palette: SectionPalette) -> Self {
        Self {
            policy,
            band_resolution_m,
            palette,
        }
    }

    /// Geometry for one record of the measurement sequence.
    ///
    /// The render depth is bounded by the image bottom at the left edge, so
    /// the right side of a region may extend past the image and get clipped
    /// by the host.
    pub fn extract(&self, record: &ProfileRecord, projection: &DepthProjection) -> SectionSnapshot {
        let max_render_depth_m = projection.max_render_depth(MAX_SAMPLED_DEPTH_M);
        let regions = match self.policy {
            FrostFillPolicy::TwoRegion => {
                self.two_region_fill(record, projection, max_render_depth_m)
            }
            FrostFillPolicy::GranularBands => {
                self.banded_fill(record, projection, max_render_depth_m)
            }
        };

        SectionSnapshot {
            regions,
            frost_line: frost_line_span(record.frost_depth_m, projection, max_render_depth_m),
        }
    }

    fn two_region_fill(
        &self,
        record: &ProfileRecord,
        projection: &DepthProjection,
        max_render_depth_m: f64,
    ) -> Vec<FilledRegion> {
        let w = projection.width_px();
        let ground_left = projection.ground_y(0.0);
        let ground_right = projection.ground_y(w);
        let floor_left = projection.y_for_depth(max_render_depth_m, 0.0);
        let floor_right = projection.y_for_depth(max_render_depth_m, w);

        let split = record
            .frost_depth_m
            .filter(|d| *d >= 0.0 && *d <= max_render_depth_m);
        let Some(frost_depth_m) = split else {
            // No boundary on screen: one full-depth region in the above fill.
            return vec![filled(
                quad(w, ground_left, ground_right, floor_right, floor_left),
                self.palette.above_frost,
            )];
        };

        let boundary_left = projection.y_for_depth(frost_depth_m, 0.0);
        let boundary_right = projection.y_for_depth(frost_depth_m, w);
        vec![
            filled(
                quad(w, ground_left, ground_right, boundary_right, boundary_left),
                self.palette.above_frost,
            ),
            filled(
                quad(w, boundary_left, boundary_right, floor_right, floor_left),
                self.palette.below_frost,
            ),
        ]
    }

    fn banded_fill(
        &self,
        record: &ProfileRecord,
        projection: &DepthProjection,
        max_render_depth_m: f64,
    ) -> Vec<FilledRegion> {
        let w = projection.width_px();
        let mut regions = Vec::new();
        let mut top = 0.0;
        while top < max_render_depth_m {
            let bottom = (top + self.band_resolution_m).min(max_render_depth_m);
            if bottom <= top {
                break;
            }
            let color = match record.temperature_at(top) {
                Some(t) if t <= 0.0 => self.palette.below_frost,
                _ => self.palette.above_frost,
            };
            regions.push(filled(
                quad(
                    w,
                    projection.y_for_depth(top, 0.0),
                    projection.y_for_depth(top, w),
                    projection.y_for_depth(bottom, w),
                    projection.y_for_depth(bottom, 0.0),
                ),
                color,
            ));
            top = bottom;
        }
        regions
    }
}

fn frost_line_span(
    frost_depth_m: Option<f64>,
    projection: &DepthProjection,
    max_render_depth_m: f64,
) -> Option<FrostLine> {
    let depth_m = frost_depth_m.filter(|d| *d >= 0.0 && *d <= max_render_depth_m)?;
    let w = projection.width_px();
    let y_left = projection.y_for_depth(depth_m, 0.0);
    let y_right = projection.y_for_depth(depth_m, w);
    let on_screen = y_left.min(y_right) < projection.height_px() && y_left.max(y_right) > 0.0;
    if !on_screen {
        return None;
    }
    Some(FrostLine {
        start: Vec2::new(0.0, y_left),
        end: Vec2::new(w, y_right),
    })
}

// Left edge, right edge, then back along the bottom.
fn quad(
    width_px: f64,
    top_left_y: f64,
    top_right_y: f64,
    bottom_right_y: f64,
    bottom_left_y: f64,
) -> Vec<Vec2> {
    vec![
        Vec2::new(0.0, top_left_y),
        Vec2::new(width_px, top_right_y),
        Vec2::new(width_px, bottom_right_y),
        Vec2::new(0.0, bottom_left_y),
    ]
}

fn filled(outline: Vec<Vec2>, color: [f32; 4]) -> FilledRegion {
    let triangles = triangulate_outline(&outline);
    FilledRegion {
        outline,
        triangles,
        color,
    }
}

fn triangulate_outline(outline: &[Vec2]) -> Vec<Vec2> {
    if outline.len() < 3 {
        return Vec::new();
    }
    let mut coords_2d: Vec<f64> = Vec::with_capacity(outline.len() * 2);
    for p in outline {
        coords_2d.push(p.x);
        coords_2d.push(p.y);
    }
    let hole_indices: Vec<usize> = Vec::new();

    let indices = match earcut(&coords_2d, &hole_indices, 2) {
        Ok(ix) => ix,
        Err(_) => return Vec::new(),
    };

    let mut out: Vec<Vec2> = Vec::with_capacity(indices.len());
    for idx in indices {
        if let Some(v) = outline.get(idx) {
            out.push(*v);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{CrossSectionLayer, FrostFillPolicy};
    use crate::symbology::SectionPalette;
    use chrono::NaiveDate;
    use foundation::math::{DepthProjection, EdgeLine, Vec2};
    use profile::{ProfileRecord, SAMPLED_DEPTHS_M};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    fn arctic_projection() -> DepthProjection {
        DepthProjection::new(
            1888.0,
            2560.0,
            EdgeLine::new(760.0, 930.0),
            EdgeLine::new(2100.0, 2560.0),
            4.0,
        )
        .expect("valid projection")
    }

    fn record(frost_depth_m: Option<f64>) -> ProfileRecord {
        let date = NaiveDate::from_ymd_opt(2008, 1, 15).unwrap();
        ProfileRecord::new(date, vec![None; SAMPLED_DEPTHS_M.len()], frost_depth_m)
    }

    fn thawing_record() -> ProfileRecord {
        // Temperature 2 C at the surface, falling 1 C per meter of depth.
        let date = NaiveDate::from_ymd_opt(2008, 7, 15).unwrap();
        let temps = SAMPLED_DEPTHS_M.iter().map(|d| Some(2.0 - d)).collect();
        ProfileRecord::new(date, temps, Some(2.0))
    }

    fn two_region_layer() -> CrossSectionLayer {
        CrossSectionLayer::new(FrostFillPolicy::TwoRegion, 0.25, SectionPalette::default())
    }

    #[test]
    fn frost_depth_splits_the_section_into_two_quads() {
        let layer = two_region_layer();
        let snap = layer.extract(&record(Some(1.0)), &arctic_projection());

        assert_eq!(snap.regions.len(), 2);
        let above = &snap.regions[0];
        let below = &snap.regions[1];

        assert_eq!(above.outline[0], Vec2::new(0.0, 760.0));
        assert_eq!(above.outline[1], Vec2::new(1888.0, 930.0));
        assert_close(above.outline[2].y, 1337.5, 1e-9);
        assert_close(above.outline[3].y, 1095.0, 1e-9);

        assert_close(below.outline[0].y, 1095.0, 1e-9);
        assert_close(below.outline[1].y, 1337.5, 1e-9);
        // Render floor: image bottom on the left, extrapolated on the right.
        assert_close(below.outline[2].y, 3119.552238805970, 1e-9);
        assert_close(below.outline[3].y, 2560.0, 1e-9);

        assert_eq!(above.color, SectionPalette::default().above_frost);
        assert_eq!(below.color, SectionPalette::default().below_frost);
        assert!(above.triangles.len() >= 3);
        assert_eq!(above.triangles.len() % 3, 0);
    }

    #[test]
    fn missing_frost_depth_fills_the_full_section() {
        let layer = two_region_layer();
        let snap = layer.extract(&record(None), &arctic_projection());

        assert_eq!(snap.regions.len(), 1);
        assert_eq!(snap.regions[0].color, SectionPalette::default().above_frost);
        assert_close(snap.regions[0].outline[3].y, 2560.0, 1e-9);
        assert!(snap.frost_line.is_none());
    }

    #[test]
    fn out_of_range_frost_depths_read_as_unsplit() {
        let layer = two_region_layer();
        let projection = arctic_projection();

        for frost in [Some(-1.0), Some(10.0)] {
            let snap = layer.extract(&record(frost), &projection);
            assert_eq!(snap.regions.len(), 1);
            assert!(snap.frost_line.is_none());
        }
    }

    #[test]
    fn frost_at_the_surface_keeps_both_regions() {
        let layer = two_region_layer();
        let snap = layer.extract(&record(Some(0.0)), &arctic_projection());

        assert_eq!(snap.regions.len(), 2);
        let above = &snap.regions[0];
        assert_eq!(above.outline[0].y, above.outline[3].y);
        assert_eq!(above.outline[1].y, above.outline[2].y);
    }

    #[test]
    fn frost_line_spans_the_section_when_drawable() {
        let layer = two_region_layer();
        let snap = layer.extract(&record(Some(1.0)), &arctic_projection());

        let line = snap.frost_line.expect("drawable frost line");
        assert_eq!(line.start.x, 0.0);
        assert_close(line.start.y, 1095.0, 1e-9);
        assert_eq!(line.end.x, 1888.0);
        assert_close(line.end.y, 1337.5, 1e-9);
    }

    #[test]
    fn bands_color_by_temperature_at_their_top() {
        let layer =
            CrossSectionLayer::new(FrostFillPolicy::GranularBands, 1.0, SectionPalette::default());
        let snap = layer.extract(&thawing_record(), &arctic_projection());

        // Render depth is 1800/335, so six bands with a short last one.
        assert_eq!(snap.regions.len(), 6);
        let palette = SectionPalette::default();
        // 2 C and 1 C at the tops of the first two bands, 0 C and below after.
        assert_eq!(snap.regions[0].color, palette.above_frost);
        assert_eq!(snap.regions[1].color, palette.above_frost);
        for band in &snap.regions[2..] {
            assert_eq!(band.color, palette.below_frost);
        }

        assert_eq!(snap.regions[0].outline[0], Vec2::new(0.0, 760.0));
        assert_close(snap.regions[0].outline[3].y, 1095.0, 1e-9);
        assert_close(snap.regions[5].outline[3].y, 2560.0, 1e-9);
    }

    #[test]
    fn bands_without_readings_use_the_above_fill() {
        let layer =
            CrossSectionLayer::new(FrostFillPolicy::GranularBands, 1.0, SectionPalette::default());
        let snap = layer.extract(&record(Some(2.0)), &arctic_projection());

        for band in &snap.regions {
            assert_eq!(band.color, SectionPalette::default().above_frost);
        }
    }
}
