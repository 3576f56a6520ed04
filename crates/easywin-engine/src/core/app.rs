use crate::device::RenderDevice;

/// Hooks implemented by applications.
///
/// Every hook receives the device it runs against. All have defaults, so `()`
/// is a valid app that just shows the cleared window.
pub trait App<D: RenderDevice> {
    /// Called once, right after the device is created and before the first
    /// frame. Allocate device-dependent resources here.
    fn on_device_ready(&mut self, device: &mut D) {
        let _ = device;
    }

    /// Called once per frame inside the scene bracket, with render states
    /// already reset.
    fn render(&mut self, device: &mut D) {
        let _ = device;
    }

    /// Closes the scene bracket after [`App::render`].
    fn apply_render(&mut self, device: &mut D) {
        device.end_scene();
    }
}

impl<D: RenderDevice> App<D> for () {}
