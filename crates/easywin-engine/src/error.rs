//! Setup errors.
//!
//! Only window and device setup can fail. Once the loop is running, failures
//! (a scene that does not open, a present that reports loss) are handled inside
//! the frame and never surface here.

/// Errors raised while creating the window or the graphics device.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The platform returned no native handle.
    #[error("cannot create window `{name}` (os error {code:#x})")]
    WindowCreation {
        /// Display name of the window that failed.
        name: String,
        /// Platform last-error code captured right after the failed call.
        code: u32,
    },

    /// The graphics factory (API entry object) could not be constructed.
    #[error("cannot create graphics factory")]
    DeviceFactory,

    /// The factory refused to create a device for the window.
    #[error("cannot create graphics device: {reason}")]
    DeviceCreation {
        /// Backend diagnostic, including its context chain.
        reason: String,
    },

    /// A device was requested before the window had a native handle.
    #[error("window has no native handle; call `create` first")]
    WindowNotCreated,

    /// The windowing platform itself could not be initialized.
    #[error("failed to initialize the windowing platform: {0}")]
    PlatformInit(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
