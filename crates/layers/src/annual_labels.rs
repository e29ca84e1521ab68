use chrono::NaiveDate;
use foundation::VerticalSpan;
use foundation::math::{DepthProjection, Vec2, stable_total_cmp_f64};
use profile::AnnualMaximum;

pub const LABEL_FONT_SIZE_PX: f64 = 35.0;
/// Approximate glyph height used for stacking, 0.8 of the font size.
pub const ESTIMATED_LABEL_HEIGHT_PX: f64 = 28.0;
pub const VERTICAL_LABEL_PADDING_PX: f64 = 10.0;
pub const LEADER_BASE_OFFSET_PX: f64 = 20.0;
pub const LEADER_STEP_PX: f64 = 5.0;
pub const LABEL_MARGIN_PX: f64 = 100.0;
pub const LEADER_END_MARGIN_PX: f64 = 98.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnualMaxLabel {
    pub year: i32,
    /// False until the playhead reaches the record that set this maximum.
    pub visible: bool,
    /// Depth marker across the full section width.
    pub marker_start: Vec2,
    pub marker_end: Vec2,
    pub label_anchor: Vec2,
    pub text: String,
    /// Right-angle path from the marker out to the label column.
    pub leader: [Vec2; 4],
}

/// Listed shallowest maximum first.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnnualLabelsSnapshot {
    pub labels: Vec<AnnualMaxLabel>,
}

/// Year labels for the deepest frost reached each year.
///
/// Labels live in a margin column right of the image. Stacking is resolved
/// shallowest first: a label that would crowd an already placed one slides
/// below it. All geometry is a pure function of the maxima and the current
/// record date, so any scrub order produces identical placement.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct AnnualLabelsLayer;

impl AnnualLabelsLayer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(
        &self,
        maxima: &[AnnualMaximum],
        current_date: NaiveDate,
        projection: &DepthProjection,
    ) -> AnnualLabelsSnapshot {
        let w = projection.width_px();

        let mut order: Vec<usize> = (0..maxima.len()).collect();
        order.sort_by(|a, b| {
            stable_total_cmp_f64(maxima[*a].max_frost_depth_m, maxima[*b].max_frost_depth_m)
        });

        let mut placed: Vec<VerticalSpan> = Vec::new();
        let mut labels = Vec::with_capacity(maxima.len());

        // Leader offsets index the full sorted list, not just the visible
        // part, so a label keeps its lane as more years appear.
        for (leader_index, &index) in order.iter().enumerate() {
            let item = &maxima[index];
            let marker_y_left = projection.y_for_depth(item.max_frost_depth_m, 0.0);
            let marker_y_right = projection.y_for_depth(item.max_frost_depth_m, w);

            let visible = current_date >= item.date;
            let mut target_y = marker_y_right;
            if visible {
                target_y = resolve_collisions(marker_y_right, &placed);
                placed.push(VerticalSpan::centered(target_y, ESTIMATED_LABEL_HEIGHT_PX));
                placed.sort_by(|a, b| stable_total_cmp_f64(a.top, b.top));
            }

            let leader_x = w + LEADER_BASE_OFFSET_PX + leader_index as f64 * LEADER_STEP_PX;
            labels.push(AnnualMaxLabel {
                year: item.year,
                visible,
                marker_start: Vec2::new(0.0, marker_y_left),
                marker_end: Vec2::new(w, marker_y_right),
                label_anchor: Vec2::new(w + LABEL_MARGIN_PX, target_y),
                text: item.year.to_string(),
                leader: [
                    Vec2::new(w, marker_y_right),
                    Vec2::new(leader_x, marker_y_right),
                    Vec2::new(leader_x, target_y),
                    Vec2::new(w + LEADER_END_MARGIN_PX, target_y),
                ],
            });
        }

        AnnualLabelsSnapshot { labels }
    }
}

fn resolve_collisions(candidate_y: f64, placed: &[VerticalSpan]) -> f64 {
    let mut target_y = candidate_y;
    let mut needs_adjustment = true;
    let mut attempts = 0;
    let max_attempts = placed.len() + 2;
    while needs_adjustment && attempts < max_attempts {
        needs_adjustment = false;
        attempts += 1;
        for span in placed {
            let label = VerticalSpan::centered(target_y, ESTIMATED_LABEL_HEIGHT_PX);
            if label.overlaps(*span, VERTICAL_LABEL_PADDING_PX) {
                target_y =
                    span.bottom + VERTICAL_LABEL_PADDING_PX + ESTIMATED_LABEL_HEIGHT_PX / 2.0;
                needs_adjustment = true;
                break;
            }
        }
    }
    target_y
}
