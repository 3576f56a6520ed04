//! The per-frame sequence run on every idle cycle.
//!
//! Nothing here outlives a frame. Device loss is read off the present result
//! and acted on immediately instead of being stored.

use crate::core::App;
use crate::device::{
    ClearFlags, CooperativeLevel, DeviceManager, GraphicsApi, PresentOutcome, RenderDevice,
    RenderState,
};
use crate::paint::Color;

/// Colour every frame starts from.
pub const CLEAR_COLOR: Color = Color::BLUE;

/// Depth every frame starts from (far plane).
pub const CLEAR_DEPTH: f32 = 1.0;

/// States forced off before the render hook runs.
const RESET_STATES: [RenderState; 3] = [
    RenderState::DepthTest,
    RenderState::AlphaBlend,
    RenderState::ScissorTest,
];

/// What happened during one frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// The scene opened and the render hook ran.
    pub rendered: bool,
    pub present: PresentOutcome,
    /// The device was reset after the present.
    pub reset: bool,
}

/// Runs one frame. Returns `None` when there is no device to render with.
///
/// 1. reset render states
/// 2. clear colour and depth
/// 3. `render` + `apply_render` inside the scene bracket, if it opens
/// 4. present, and reset in place when the device is lost but resettable
pub fn run_frame<G, A>(devices: &mut DeviceManager<G>, app: &mut A) -> Option<FrameReport>
where
    G: GraphicsApi,
    A: App<G::Device>,
{
    let device = devices.device_mut()?;

    for state in RESET_STATES {
        device.set_render_state(state, false);
    }
    device.clear(
        &[],
        ClearFlags::TARGET | ClearFlags::ZBUFFER,
        CLEAR_COLOR,
        CLEAR_DEPTH,
        0,
    );

    let rendered = device.begin_scene();
    if rendered {
        app.render(device);
        app.apply_render(device);
    } else {
        log::trace!("scene did not open; frame dropped");
    }

    let present = device.present();
    let reset = present == PresentOutcome::DeviceLost
        && device.test_cooperative_level() == CooperativeLevel::NotReset;

    if reset {
        log::debug!("device lost; resetting");
        devices.reset_device();
    } else if present == PresentOutcome::DeviceLost {
        log::trace!("device lost and not yet resettable");
    }

    Some(FrameReport { rendered, present, reset })
}
