pub mod cue;
pub mod phase;
pub mod schedule;
pub mod scroll;

pub use cue::*;
pub use phase::*;
pub use schedule::*;
pub use scroll::*;
