use crate::device::{DeviceManager, DeviceState, GraphicsApi, SwapChainConfig};
use crate::error::{Error, Result};
use crate::frame;
use crate::window::{Platform, ShowCommand, Window, WindowParams, WindowShell};

use super::App;

/// A window that renders with a graphics device every idle cycle.
///
/// Owns the shell, the device manager and the application. Teardown releases
/// the device before the window it is bound to.
pub struct GraphicsWindow<P, G, A>
where
    P: Platform,
    G: GraphicsApi<Target = P::Handle>,
    A: App<G::Device>,
{
    shell: WindowShell<P>,
    devices: DeviceManager<G>,
    app: A,
}

impl<P, G, A> GraphicsWindow<P, G, A>
where
    P: Platform,
    G: GraphicsApi<Target = P::Handle>,
    A: App<G::Device>,
{
    pub fn new(shell: WindowShell<P>, api: G, app: A) -> Self {
        Self::with_config(shell, api, SwapChainConfig::default(), app)
    }

    pub fn with_config(shell: WindowShell<P>, api: G, config: SwapChainConfig, app: A) -> Self {
        Self {
            shell,
            devices: DeviceManager::with_config(api, config),
            app,
        }
    }

    pub fn shell(&self) -> &WindowShell<P> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut WindowShell<P> {
        &mut self.shell
    }

    pub fn devices(&self) -> &DeviceManager<G> {
        &self.devices
    }

    pub fn app(&self) -> &A {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut A {
        &mut self.app
    }

    pub fn show(&mut self, cmd: ShowCommand) {
        self.shell.show(cmd);
    }

    pub fn refresh(&mut self) {
        self.shell.refresh();
    }

    /// Creates the device for the current window and runs the ready hook.
    ///
    /// Does nothing if the device already exists.
    pub fn create_device(&mut self) -> Result<()> {
        if self.devices.state() == DeviceState::Ready {
            return Ok(());
        }

        let handle = self.shell.handle().ok_or(Error::WindowNotCreated)?;
        self.devices.create_device(handle)?;

        if let Some(device) = self.devices.device_mut() {
            self.app.on_device_ready(device);
        }
        Ok(())
    }

    pub fn destroy_device(&mut self) {
        self.devices.destroy_device();
    }
}

impl<P, G, A> Window for GraphicsWindow<P, G, A>
where
    P: Platform,
    G: GraphicsApi<Target = P::Handle>,
    A: App<G::Device>,
{
    fn create(&mut self, params: &WindowParams) -> Result<()> {
        self.shell.create(params)
    }

    fn destroy(&mut self) {
        self.devices.destroy_device();
        self.shell.destroy();
    }

    fn run_loop(&mut self) -> Result<()> {
        self.create_device()?;

        let Self { shell, devices, app } = self;
        shell.run_loop_with(|_| {
            frame::run_frame(&mut *devices, &mut *app);
        });
        Ok(())
    }

    fn on_idle_cycle(&mut self) {
        frame::run_frame(&mut self.devices, &mut self.app);
    }
}

impl<P, G, A> Drop for GraphicsWindow<P, G, A>
where
    P: Platform,
    G: GraphicsApi<Target = P::Handle>,
    A: App<G::Device>,
{
    fn drop(&mut self) {
        self.destroy();
    }
}
