pub mod contour;
pub mod dataset;
pub mod manifest;
pub mod section_loader;
pub mod section_package;

pub use contour::*;
pub use dataset::*;
pub use manifest::*;
pub use section_loader::*;
pub use section_package::*;
