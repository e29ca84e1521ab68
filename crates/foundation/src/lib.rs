pub mod bounds;
pub mod handles;
pub mod math;
pub mod progress;

// Foundation crate: small, well-tested primitives only.
pub use bounds::*;
pub use handles::*;
pub use progress::*;
