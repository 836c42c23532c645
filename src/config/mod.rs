//! Declarative visualization configuration.

mod mark;
mod vizconfig;

pub use mark::MarkType;
pub use vizconfig::{Axis, VizConfig};
