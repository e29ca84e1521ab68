pub mod geometry;
pub mod opacity;
pub mod text;

pub use geometry::*;
pub use opacity::*;
pub use text::*;
