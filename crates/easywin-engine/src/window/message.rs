/// Platform messages as seen by the window shell.
///
/// Only what the shell reacts to is modelled; everything else arrives as
/// `Other` and is dispatched without further handling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Message {
    /// End of the message loop, with the process exit code.
    Quit(i32),
    /// The user asked to close the window.
    CloseRequested,
    /// The native window has been destroyed.
    Destroyed,
    /// Client area changed size (physical pixels).
    Resized { width: u32, height: u32 },
    Other,
}
