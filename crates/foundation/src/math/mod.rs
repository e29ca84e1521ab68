pub mod linear;
pub mod precision;
pub mod section;
pub mod vec;

pub use linear::*;
pub use precision::*;
pub use section::*;
pub use vec::*;
