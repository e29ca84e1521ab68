pub mod director;
pub mod frame;

pub use director::*;
pub use frame::*;
