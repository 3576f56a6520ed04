//! Easywin engine crate.
//!
//! A native window whose client area is cleared and presented by a graphics
//! device on every idle cycle of a cooperative message loop.
//!
//! - [`window`]: window shell, platform seam, message loop
//! - [`device`]: graphics API seam, device lifetime, the wgpu backend
//! - [`frame`]: the per-frame clear/scene/present sequence
//! - [`core`]: [`core::GraphicsWindow`] and the [`core::App`] hooks

pub mod core;
pub mod coords;
pub mod device;
pub mod error;
pub mod frame;
pub mod logging;
pub mod paint;
pub mod window;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
