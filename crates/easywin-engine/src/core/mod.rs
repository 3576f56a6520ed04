//! Application-facing layer.
//!
//! [`GraphicsWindow`] composes a window shell with a device manager and runs
//! the frame sequence on every idle cycle; applications plug in through the
//! [`App`] hooks.

mod app;
mod graphics_window;

pub use app::App;
pub use graphics_window::GraphicsWindow;
