use chrono::NaiveDate;
use foundation::math::Vec2;

pub const DATE_DISPLAY_FORMAT: &str = "%Y %b";
pub const DATE_DISPLAY_FONT_SIZE_PX: f64 = 150.0;
pub const DATE_DISPLAY_ANCHOR_PX: Vec2 = Vec2 { x: 100.0, y: 180.0 };

/// Formats a record date the way the on-screen readout shows it, e.g.
/// "2008 Jan".
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}
