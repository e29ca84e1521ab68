pub mod annual_labels;
pub mod background;
pub mod date_display;
pub mod depth_scale;
pub mod section;
pub mod symbology;
