use crate::error::{Error, Result};

use super::{Message, Platform, ShowCommand, Window, WindowParams};

/// Suffix appended to the display name to form the window class name.
const CLASS_SUFFIX: &str = "_WINDOWCLASS";

/// Platform window: native handle, class registration and the message loop.
///
/// Releasing is guarded per resource, so `destroy` is safe on a shell that was
/// never created, was partially created, or was already destroyed.
pub struct WindowShell<P: Platform> {
    platform: P,
    name: String,
    class_name: String,

    handle: Option<P::Handle>,
    class_registered: bool,
    params: Option<WindowParams>,

    alive: bool,
    exit_code: i32,
}

impl<P: Platform> WindowShell<P> {
    pub fn new(platform: P, name: impl Into<String>) -> Self {
        let name = name.into();
        let class_name = format!("{name}{CLASS_SUFFIX}");
        Self {
            platform,
            name,
            class_name,
            handle: None,
            class_registered: false,
            params: None,
            alive: false,
            exit_code: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Native handle, present between a successful `create` and `destroy`.
    pub fn handle(&self) -> Option<&P::Handle> {
        self.handle.as_ref()
    }

    /// Parameters of the last successful `create`.
    pub fn params(&self) -> Option<&WindowParams> {
        self.params.as_ref()
    }

    /// True only while the message loop is running.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Exit code carried by the quit message that ended the loop.
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn show(&mut self, cmd: ShowCommand) {
        if let Some(handle) = &self.handle {
            self.platform.show_window(handle, cmd);
        }
    }

    pub fn refresh(&mut self) {
        if let Some(handle) = &self.handle {
            self.platform.update_window(handle);
        }
    }

    /// Runs the cooperative loop, calling `idle` once after every drain.
    ///
    /// `idle` gets the shell back so it can query the window between drains.
    ///
    /// A quit message seen during a drain ends the loop before `idle` runs
    /// again. Draining never blocks, so the loop spins.
    pub fn run_loop_with<F>(&mut self, mut idle: F)
    where
        F: FnMut(&mut Self),
    {
        self.alive = true;
        log::debug!("entering message loop for `{}`", self.name);

        while self.alive {
            self.drain_messages();
            if !self.alive {
                break;
            }
            idle(self);
        }

        log::debug!("message loop for `{}` ended (exit code {})", self.name, self.exit_code);
    }

    fn drain_messages(&mut self) {
        self.platform.pump();
        while let Some(message) = self.platform.poll_message() {
            self.platform.dispatch_message(&message);
            self.handle_message(message);
        }
    }

    fn handle_message(&mut self, message: Message) {
        match message {
            Message::Quit(code) => {
                self.alive = false;
                self.exit_code = code;
            }
            // Closing destroys the window, and a destroyed window ends the loop.
            Message::CloseRequested => self.release_window(),
            Message::Destroyed => {
                if self.handle.take().is_some() {
                    self.platform.post_quit(0);
                }
            }
            Message::Resized { width, height } => {
                log::trace!("`{}` resized to {width}x{height}", self.name);
            }
            Message::Other => {}
        }
    }

    fn release_window(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.platform.destroy_window(handle);
            log::info!("window `{}` destroyed", self.name);
            self.platform.post_quit(0);
        }
    }
}

impl<P: Platform> Window for WindowShell<P> {
    fn create(&mut self, params: &WindowParams) -> Result<()> {
        if !self.platform.register_class(&self.class_name) {
            log::debug!("window class `{}` already registered", self.class_name);
        }
        self.class_registered = true;

        // A second create replaces the window instead of leaking it.
        if let Some(old) = self.handle.take() {
            self.platform.destroy_window(old);
            log::debug!("window `{}` replaced", self.name);
        }

        let handle = self
            .platform
            .create_window(&self.class_name, &self.name, params)
            .ok_or_else(|| Error::WindowCreation {
                name: self.name.clone(),
                code: self.platform.last_error(),
            })?;

        log::info!(
            "window `{}` created at {:?} size {:?} flags {:?}",
            self.name,
            params.position,
            params.size,
            params.flags
        );

        self.handle = Some(handle);
        self.params = Some(*params);
        Ok(())
    }

    fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.platform.destroy_window(handle);
            log::info!("window `{}` destroyed", self.name);
        }

        if self.class_registered {
            self.platform.unregister_class(&self.class_name);
            self.class_registered = false;
        }
    }

    fn run_loop(&mut self) -> Result<()> {
        self.run_loop_with(|_| {});
        Ok(())
    }
}

impl<P: Platform> Drop for WindowShell<P> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakePlatform;
    use crate::window::WindowFlags;

    fn params() -> WindowParams {
        WindowParams::new(WindowFlags::OVERLAPPED | WindowFlags::SYSMENU)
            .with_position(100, 100)
            .with_size(400, 600)
    }

    // ── create / destroy ──────────────────────────────────────────────────

    #[test]
    fn create_registers_class_and_window() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");

        shell.create(&params()).unwrap();

        assert!(shell.handle().is_some());
        assert!(!shell.is_alive());
        assert_eq!(os.borrow().live_windows(), 1);
        assert!(os.borrow().has_class("main_WINDOWCLASS"));
        assert_eq!(os.borrow().last_created_params(), Some(params()));
    }

    #[test]
    fn create_twice_replaces_the_live_window() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");

        shell.create(&params()).unwrap();
        shell.create(&params()).unwrap();

        assert_eq!(shell.handle(), Some(&2));
        assert_eq!(os.borrow().live_windows(), 1);
        assert_eq!(os.borrow().quits_posted(), 0);

        shell.destroy();

        assert_eq!(os.borrow().live_windows(), 0);
        assert_eq!(os.borrow().class_count(), 0);
    }

    #[test]
    fn create_then_destroy_leaves_nothing_behind() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");

        shell.create(&params()).unwrap();
        shell.destroy();

        assert!(shell.handle().is_none());
        assert_eq!(os.borrow().live_windows(), 0);
        assert_eq!(os.borrow().class_count(), 0);
    }

    #[test]
    fn destroy_twice_matches_destroy_once() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");
        shell.create(&params()).unwrap();

        shell.destroy();
        let after_once = os.borrow().journal().to_vec();
        shell.destroy();

        assert_eq!(os.borrow().journal(), after_once.as_slice());
    }

    #[test]
    fn destroy_never_created_is_a_no_op() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");

        shell.destroy();
        shell.destroy();

        assert!(os.borrow().journal().is_empty());
    }

    #[test]
    fn failed_create_reports_last_error_and_keeps_class_releasable() {
        let platform = FakePlatform::new();
        let os = platform.os();
        os.borrow_mut().fail_window_creation(0x57);
        let mut shell = WindowShell::new(platform, "main");

        let err = shell.create(&params()).unwrap_err();
        assert!(matches!(err, Error::WindowCreation { code: 0x57, .. }));
        assert!(shell.handle().is_none());

        shell.destroy();
        assert_eq!(os.borrow().class_count(), 0);
    }

    #[test]
    fn class_registration_is_idempotent_per_name() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");

        shell.create(&params()).unwrap();
        shell.destroy();
        shell.create(&params()).unwrap();

        assert_eq!(os.borrow().class_count(), 1);
        assert_eq!(os.borrow().live_windows(), 1);
    }

    #[test]
    fn drop_releases_everything() {
        let platform = FakePlatform::new();
        let os = platform.os();
        {
            let mut shell = WindowShell::new(platform, "main");
            shell.create(&params()).unwrap();
        }
        assert_eq!(os.borrow().live_windows(), 0);
        assert_eq!(os.borrow().class_count(), 0);
    }

    // ── show / refresh ────────────────────────────────────────────────────

    #[test]
    fn show_and_refresh_pass_through_only_with_a_handle() {
        let platform = FakePlatform::new();
        let os = platform.os();
        let mut shell = WindowShell::new(platform, "main");

        shell.show(ShowCommand::Default);
        shell.refresh();
        assert!(os.borrow().journal().is_empty());

        shell.create(&params()).unwrap();
        shell.show(ShowCommand::Default);
        shell.refresh();
        assert_eq!(os.borrow().shows(), 1);
        assert_eq!(os.borrow().updates(), 1);
    }

    // ── run_loop ──────────────────────────────────────────────────────────

    #[test]
    fn quit_ends_loop_before_next_idle_cycle() {
        let platform = FakePlatform::new();
        let os = platform.os();
        os.borrow_mut().script(vec![vec![], vec![Message::Other], vec![Message::Quit(3)]]);
        let mut shell = WindowShell::new(platform, "main");
        shell.create(&params()).unwrap();

        let mut cycles = 0;
        shell.run_loop_with(|_| cycles += 1);

        assert_eq!(cycles, 2);
        assert!(!shell.is_alive());
        assert_eq!(shell.exit_code(), 3);
    }

    #[test]
    fn messages_after_quit_in_same_drain_are_still_dispatched() {
        let platform = FakePlatform::new();
        let os = platform.os();
        os.borrow_mut().script(vec![vec![Message::Quit(0), Message::Other]]);
        let mut shell = WindowShell::new(platform, "main");
        shell.create(&params()).unwrap();

        shell.run_loop().unwrap();

        assert_eq!(os.borrow().dispatched(), 2);
    }

    #[test]
    fn alive_only_while_the_loop_runs() {
        let platform = FakePlatform::new();
        let os = platform.os();
        os.borrow_mut().script(vec![vec![]]);
        let mut shell = WindowShell::new(platform, "main");
        shell.create(&params()).unwrap();
        assert!(!shell.is_alive());

        let mut seen = Vec::new();
        shell.run_loop_with(|s| seen.push(s.is_alive()));

        assert_eq!(seen, vec![true]);
        assert!(!shell.is_alive());
    }

    #[test]
    fn close_request_destroys_window_and_ends_loop() {
        let platform = FakePlatform::new();
        let os = platform.os();
        os.borrow_mut().script(vec![vec![Message::CloseRequested]]);
        let mut shell = WindowShell::new(platform, "main");
        shell.create(&params()).unwrap();

        let mut cycles = 0;
        shell.run_loop_with(|_| cycles += 1);

        assert_eq!(cycles, 0);
        assert!(shell.handle().is_none());
        assert_eq!(os.borrow().live_windows(), 0);
        assert_eq!(shell.exit_code(), 0);
    }

    #[test]
    fn external_destroy_posts_a_single_quit() {
        let platform = FakePlatform::new();
        let os = platform.os();
        os.borrow_mut()
            .script(vec![vec![Message::Destroyed, Message::Destroyed], vec![]]);
        let mut shell = WindowShell::new(platform, "main");
        shell.create(&params()).unwrap();

        shell.run_loop().unwrap();

        assert_eq!(os.borrow().quits_posted(), 1);
        assert!(shell.handle().is_none());
    }
}
