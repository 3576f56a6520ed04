use super::{Message, ShowCommand, WindowParams};

/// Thin wrapper over the OS windowing API.
///
/// One platform instance backs one window. Every call is a pass-through; the
/// shell owns the policy (guards, ordering, liveness).
pub trait Platform {
    /// Native window handle.
    type Handle: Clone + std::fmt::Debug;

    /// Registers a window class. Returns `false` when `class_name` was already
    /// registered, which callers treat as success.
    fn register_class(&mut self, class_name: &str) -> bool;

    fn unregister_class(&mut self, class_name: &str);

    /// Creates the native window. `None` means failure; details are available
    /// through [`Platform::last_error`].
    fn create_window(
        &mut self,
        class_name: &str,
        title: &str,
        params: &WindowParams,
    ) -> Option<Self::Handle>;

    /// Last OS error code for the calling thread.
    fn last_error(&self) -> u32;

    fn destroy_window(&mut self, handle: Self::Handle);

    fn show_window(&mut self, handle: &Self::Handle, cmd: ShowCommand);

    fn update_window(&mut self, handle: &Self::Handle);

    /// Collects pending OS events without blocking. Called once at the start
    /// of every drain; [`Platform::poll_message`] then hands them out.
    fn pump(&mut self);

    /// Next queued message, or `None` once the queue is empty.
    fn poll_message(&mut self) -> Option<Message>;

    /// Routes a message to platform-side handlers before the shell sees it.
    fn dispatch_message(&mut self, message: &Message) {
        let _ = message;
    }

    /// Queues a [`Message::Quit`].
    fn post_quit(&mut self, exit_code: i32);
}
