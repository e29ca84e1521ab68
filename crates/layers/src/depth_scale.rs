use foundation::math::{DepthProjection, Vec2};

pub const DEPTH_SCALE_DIVISIONS: usize = 4;
pub const DEPTH_SCALE_TICK_HALF_WIDTH_PX: f64 = 30.0;
pub const DEPTH_SCALE_LABEL_OFFSET_PX: f64 = 30.0;
pub const DEPTH_SCALE_FONT_SIZE_PX: f64 = 40.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DepthTick {
    pub depth_m: f64,
    pub start: Vec2,
    pub end: Vec2,
    pub label: String,
    pub label_anchor: Vec2,
    /// Shear that keeps the label parallel to the tick it annotates.
    pub skew_deg: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DepthScaleSnapshot {
    pub axis_start: Vec2,
    pub axis_end: Vec2,
    pub ticks: Vec<DepthTick>,
}

/// Vertical depth ruler down the middle of the section.
///
/// The ruler covers ground level to the reference depth. Ticks follow the
/// perspective of the projection, so they lean the way the ground does.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DepthScaleLayer;

impl DepthScaleLayer {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, projection: &DepthProjection) -> DepthScaleSnapshot {
        let x = projection.width_px() / 2.0;
        let scale_depth_m = projection.reference_depth_m();

        let mut ticks = Vec::with_capacity(DEPTH_SCALE_DIVISIONS + 1);
        for i in 0..=DEPTH_SCALE_DIVISIONS {
            let depth_m = i as f64 / DEPTH_SCALE_DIVISIONS as f64 * scale_depth_m;
            let start = Vec2::new(
                x - DEPTH_SCALE_TICK_HALF_WIDTH_PX,
                projection.y_for_depth(depth_m, x - DEPTH_SCALE_TICK_HALF_WIDTH_PX),
            );
            let end = Vec2::new(
                x + DEPTH_SCALE_TICK_HALF_WIDTH_PX,
                projection.y_for_depth(depth_m, x + DEPTH_SCALE_TICK_HALF_WIDTH_PX),
            );
            ticks.push(DepthTick {
                depth_m,
                start,
                end,
                label: format_depth_label(depth_m),
                label_anchor: Vec2::new(end.x + DEPTH_SCALE_LABEL_OFFSET_PX, end.y),
                skew_deg: (end.y - start.y)
                    .atan2(2.0 * DEPTH_SCALE_TICK_HALF_WIDTH_PX)
                    .to_degrees(),
            });
        }

        DepthScaleSnapshot {
            axis_start: Vec2::new(x, projection.y_for_depth(0.0, x)),
            axis_end: Vec2::new(x, projection.y_for_depth(scale_depth_m, x)),
            ticks,
        }
    }
}

fn format_depth_label(depth_m: f64) -> String {
    if depth_m.fract() == 0.0 {
        format!("{depth_m:.0}m")
    } else {
        format!("{depth_m:.1}m")
    }
}
