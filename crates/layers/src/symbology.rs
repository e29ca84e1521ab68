pub const FROST_LINE_WIDTH_PX: f64 = 2.0;
pub const ANNUAL_MAX_LINE_WIDTH_PX: f64 = 4.0;
pub const LEADER_LINE_WIDTH_PX: f64 = 1.5;
pub const DEPTH_SCALE_AXIS_WIDTH_PX: f64 = 6.0;
pub const DEPTH_SCALE_TICK_WIDTH_PX: f64 = 4.0;

/// Palette for the cross-section presentation.
///
/// Colors are RGBA in `0..=1`. Alphas bake in the resting stroke opacity of
/// each element; timeline fades multiply on top of these.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SectionPalette {
    /// Fill for ground above the frost boundary.
    pub above_frost: [f32; 4],
    /// Fill for ground below the frost boundary.
    pub below_frost: [f32; 4],
    pub frost_line: [f32; 4],
    pub annual_max_line: [f32; 4],
    pub label_fill: [f32; 4],
    pub leader: [f32; 4],
    pub depth_scale: [f32; 4],
}

impl Default for SectionPalette {
    fn default() -> Self {
        Self {
            above_frost: rgb8(0x71, 0x67, 0x49, 1.0),
            below_frost: rgb8(0x37, 0x8b, 0xb1, 1.0),
            frost_line: rgb8(0xcb, 0xf3, 0xf0, 0.2),
            annual_max_line: rgb8(0xcb, 0xf3, 0xf0, 0.8),
            label_fill: rgb8(0x36, 0x41, 0x56, 1.0),
            leader: rgb8(0x36, 0x41, 0x56, 1.0),
            depth_scale: rgb8(0xef, 0xef, 0xef, 1.0),
        }
    }
}

fn rgb8(r: u8, g: u8, b: u8, a: f32) -> [f32; 4] {
    [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a,
    ]
}
