use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use winit::application::ApplicationHandler;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowButtons, WindowId};

use crate::error::{Error, Result};

use super::{Message, Platform, ShowCommand, WindowFlags, WindowParams};

/// Desktop platform backed by a `winit` event loop.
///
/// The loop is pumped with a zero timeout, so draining never blocks. Window
/// classes are bookkeeping only: `winit` owns the OS class on Windows and the
/// name is forwarded to it.
pub struct WinitPlatform {
    event_loop: EventLoop<()>,
    queue: EventQueue,
    classes: HashSet<String>,
    last_error: u32,
}

impl WinitPlatform {
    pub fn new() -> Result<Self> {
        let event_loop = EventLoop::new().map_err(|e| Error::PlatformInit(e.to_string()))?;
        Ok(Self {
            event_loop,
            queue: EventQueue::default(),
            classes: HashSet::new(),
            last_error: 0,
        })
    }
}

impl Platform for WinitPlatform {
    type Handle = Arc<Window>;

    fn register_class(&mut self, class_name: &str) -> bool {
        self.classes.insert(class_name.to_owned())
    }

    fn unregister_class(&mut self, class_name: &str) {
        self.classes.remove(class_name);
    }

    fn create_window(
        &mut self,
        class_name: &str,
        title: &str,
        params: &WindowParams,
    ) -> Option<Self::Handle> {
        let attrs = window_attributes(class_name, title, params);

        // Windows are created ahead of the loop, which `ActiveEventLoop` cannot do.
        #[allow(deprecated)]
        let created = self.event_loop.create_window(attrs);

        match created {
            Ok(window) => {
                self.queue.window_id = Some(window.id());
                Some(Arc::new(window))
            }
            Err(e) => {
                self.last_error = std::io::Error::last_os_error()
                    .raw_os_error()
                    .map_or(0, |code| code as u32);
                log::error!("winit refused to create `{title}`: {e}");
                None
            }
        }
    }

    fn last_error(&self) -> u32 {
        self.last_error
    }

    fn destroy_window(&mut self, handle: Self::Handle) {
        if self.queue.window_id == Some(handle.id()) {
            self.queue.window_id = None;
        }
        handle.set_visible(false);
        // The OS window closes once the last clone (the surface's) is gone.
        drop(handle);
    }

    fn show_window(&mut self, handle: &Self::Handle, cmd: ShowCommand) {
        match cmd {
            ShowCommand::Default | ShowCommand::Show => handle.set_visible(true),
            ShowCommand::Hide => handle.set_visible(false),
            ShowCommand::Minimize => {
                handle.set_visible(true);
                handle.set_minimized(true);
            }
            ShowCommand::Maximize => {
                handle.set_visible(true);
                handle.set_maximized(true);
            }
            ShowCommand::Restore => {
                handle.set_minimized(false);
                handle.set_maximized(false);
                handle.set_visible(true);
            }
        }
    }

    fn update_window(&mut self, handle: &Self::Handle) {
        handle.request_redraw();
    }

    fn pump(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.queue);
        if let PumpStatus::Exit(code) = status {
            self.queue.pending.push_back(Message::Quit(code));
        }
    }

    fn poll_message(&mut self) -> Option<Message> {
        self.queue.pending.pop_front()
    }

    fn post_quit(&mut self, exit_code: i32) {
        self.queue.pending.push_back(Message::Quit(exit_code));
    }
}

/// Collects window events delivered during a pump.
#[derive(Default)]
struct EventQueue {
    window_id: Option<WindowId>,
    pending: VecDeque<Message>,
}

impl ApplicationHandler for EventQueue {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window_id != Some(id) {
            return;
        }

        let message = match event {
            WindowEvent::CloseRequested => Message::CloseRequested,
            WindowEvent::Destroyed => Message::Destroyed,
            WindowEvent::Resized(size) => Message::Resized {
                width: size.width,
                height: size.height,
            },
            _ => Message::Other,
        };
        self.pending.push_back(message);
    }
}

fn window_attributes(
    class_name: &str,
    title: &str,
    params: &WindowParams,
) -> winit::window::WindowAttributes {
    let flags = params.flags;
    let (x, y) = params.position;
    let (w, h) = params.size;

    let mut buttons = WindowButtons::empty();
    if flags.contains(WindowFlags::SYSMENU) {
        buttons |= WindowButtons::CLOSE;
    }
    if flags.contains(WindowFlags::MINIMIZEBOX) {
        buttons |= WindowButtons::MINIMIZE;
    }
    if flags.contains(WindowFlags::MAXIMIZEBOX) {
        buttons |= WindowButtons::MAXIMIZE;
    }

    let attrs = Window::default_attributes()
        .with_title(title)
        .with_position(PhysicalPosition::new(x, y))
        .with_inner_size(PhysicalSize::new(w.max(1), h.max(1)))
        .with_decorations(flags.decorated())
        .with_resizable(flags.resizable())
        .with_enabled_buttons(buttons)
        .with_maximized(flags.contains(WindowFlags::MAXIMIZE))
        .with_visible(flags.contains(WindowFlags::VISIBLE));

    #[cfg(windows)]
    let attrs = {
        use winit::platform::windows::WindowAttributesExtWindows;
        attrs.with_class_name(class_name)
    };
    #[cfg(not(windows))]
    let _ = class_name;

    attrs
}
