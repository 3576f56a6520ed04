use bitflags::bitflags;

use crate::coords::PixelRect;
use crate::paint::Color;

use super::SwapChainConfig;

/// Entry point of a graphics API: builds factories and devices.
pub trait GraphicsApi {
    /// What a device binds to (the native window handle).
    type Target;
    /// API root object; must outlive every device it creates.
    type Factory;
    type Device: RenderDevice;

    /// Constructs the factory. `None` means the API is unavailable.
    fn create_factory(&mut self) -> Option<Self::Factory>;

    fn create_device(
        &mut self,
        factory: &Self::Factory,
        target: &Self::Target,
        config: &SwapChainConfig,
    ) -> anyhow::Result<Self::Device>;
}

/// Fixed-function toggles reset at the start of every frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RenderState {
    DepthTest,
    AlphaBlend,
    ScissorTest,
}

/// Snapshot of the [`RenderState`] toggles.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RenderStates {
    pub depth_test: bool,
    pub alpha_blend: bool,
    pub scissor_test: bool,
}

impl RenderStates {
    pub fn set(&mut self, state: RenderState, enabled: bool) {
        match state {
            RenderState::DepthTest => self.depth_test = enabled,
            RenderState::AlphaBlend => self.alpha_blend = enabled,
            RenderState::ScissorTest => self.scissor_test = enabled,
        }
    }

    pub fn get(&self, state: RenderState) -> bool {
        match state {
            RenderState::DepthTest => self.depth_test,
            RenderState::AlphaBlend => self.alpha_blend,
            RenderState::ScissorTest => self.scissor_test,
        }
    }
}

bitflags! {
    /// Buffers touched by [`RenderDevice::clear`].
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct ClearFlags: u32 {
        const TARGET  = 0x1;
        const ZBUFFER = 0x2;
        const STENCIL = 0x4;
    }
}

/// Result of handing a frame to the display.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PresentOutcome {
    Presented,
    /// The device is unusable until reset or recreated.
    DeviceLost,
    /// Nothing was shown for a reason other than loss.
    Dropped,
}

/// Whether a device can currently render.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CooperativeLevel {
    Ok,
    /// Lost and not yet recoverable; try again later.
    Lost,
    /// Lost and ready to be reset in place.
    NotReset,
}

/// A device bound to one window.
///
/// Scene-level failures are reported through return values, never panics, so
/// the frame loop can drop a frame and carry on.
pub trait RenderDevice {
    fn set_render_state(&mut self, state: RenderState, enabled: bool);

    /// Clears `flags` buffers. An empty `rects` clears the whole target;
    /// otherwise only the given rectangles of the colour target are cleared.
    fn clear(&mut self, rects: &[PixelRect], flags: ClearFlags, color: Color, depth: f32, stencil: u32);

    /// Opens the scene bracket. `false` means drawing is not possible this frame.
    fn begin_scene(&mut self) -> bool;

    fn end_scene(&mut self);

    fn present(&mut self) -> PresentOutcome;

    fn test_cooperative_level(&self) -> CooperativeLevel;

    /// Re-applies `config` to this device in place.
    fn reset(&mut self, config: &SwapChainConfig) -> anyhow::Result<()>;
}
