pub mod components;
pub mod element;
pub mod stage;

pub use stage::*;
