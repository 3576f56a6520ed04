use anyhow::Result;

use easywin_engine::coords::PixelRect;
use easywin_engine::core::{App, GraphicsWindow};
use easywin_engine::device::{ClearFlags, RenderDevice, WgpuApi, WgpuDevice};
use easywin_engine::logging::{init_logging, LoggingConfig};
use easywin_engine::paint::Color;
use easywin_engine::window::{ShowCommand, Window, WindowFlags, WindowParams, WindowShell, WinitPlatform};

/// Paints a white square in the top-left corner of the blue frame.
struct Demo;

impl App<WgpuDevice> for Demo {
    fn on_device_ready(&mut self, _device: &mut WgpuDevice) {
        log::info!("device ready");
    }

    fn render(&mut self, device: &mut WgpuDevice) {
        device.clear(
            &[PixelRect::new(0, 0, 100, 100)],
            ClearFlags::TARGET,
            Color::WHITE,
            1.0,
            0,
        );
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let platform = WinitPlatform::new()?;
    let shell = WindowShell::new(platform, "I'm a window");
    let mut window = GraphicsWindow::new(shell, WgpuApi::default(), Demo);

    let params = WindowParams::new(WindowFlags::OVERLAPPED | WindowFlags::SYSMENU)
        .with_position(100, 100)
        .with_size(400, 600);

    window.create(&params)?;
    window.show(ShowCommand::Default);
    window.refresh();

    window.run_loop()?;

    log::info!("exited with code {}", window.shell().exit_code());
    Ok(())
}
