pub mod annual;
pub mod depths;
pub mod record;
pub mod stats;

// Borehole time series: typed records and the aggregates derived from them.
pub use annual::*;
pub use depths::*;
pub use record::*;
pub use stats::*;
