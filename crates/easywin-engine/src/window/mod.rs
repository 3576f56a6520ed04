//! Window shell + platform layer.
//!
//! [`WindowShell`] owns the native window and runs the message loop on top of a
//! [`Platform`]. [`WinitPlatform`] is the desktop implementation.

mod message;
mod params;
mod platform;
mod shell;

#[cfg(any(windows, target_os = "macos", target_os = "linux"))]
mod desktop;

pub use message::Message;
pub use params::{ShowCommand, WindowFlags, WindowParams};
pub use platform::Platform;
pub use shell::WindowShell;

#[cfg(any(windows, target_os = "macos", target_os = "linux"))]
pub use desktop::WinitPlatform;

use crate::error::Result;

/// Capabilities shared by every window flavour.
///
/// Layers compose by delegation: a graphics window holds a [`WindowShell`] and
/// overrides [`Window::on_idle_cycle`] to render.
pub trait Window {
    /// Creates the native window.
    fn create(&mut self, params: &WindowParams) -> Result<()>;

    /// Releases everything `create` acquired. Safe to call repeatedly.
    fn destroy(&mut self);

    /// Runs until a quit message arrives.
    fn run_loop(&mut self) -> Result<()>;

    /// Called once per loop iteration after pending messages are drained.
    fn on_idle_cycle(&mut self) {}
}
