//! Pixel-space geometry.
//!
//! Convention: physical pixels, top-left origin, +Y down.

mod rect;

pub use rect::PixelRect;
