//! Color types used by clears.

mod color;

pub use color::Color;
