//! wgpu implementation of [`GraphicsApi`](super::GraphicsApi).
//!
//! The factory is the `wgpu::Instance`; a device owns the adapter, the logical
//! device, its queue and the surface bound to the window. Device loss maps to
//! surface loss: acquisition failures are remembered until the next present,
//! and a reset reconfigures the surface in place.

mod device;
mod fill;
mod surface;

use std::sync::Arc;

use winit::window::Window;

use super::{GraphicsApi, SwapChainConfig};

pub use device::WgpuDevice;

/// Backend settings that have no swap-chain counterpart.
///
/// Keep this structure minimal. Add fields only when a concrete platform or
/// backend requirement exists.
#[derive(Debug, Clone)]
pub struct WgpuApi {
    /// Backends the instance may pick from.
    pub backends: wgpu::Backends,

    pub power_preference: wgpu::PowerPreference,

    /// Favor an empty set for portability.
    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// If unsupported by the surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for WgpuApi {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            alpha_mode: None,
            desired_maximum_frame_latency: 2,
        }
    }
}

/// The wgpu instance. Devices do not borrow it, but it is kept alive for as
/// long as they are.
pub struct WgpuFactory {
    instance: wgpu::Instance,
}

impl WgpuFactory {
    pub fn instance(&self) -> &wgpu::Instance {
        &self.instance
    }
}

impl GraphicsApi for WgpuApi {
    type Target = Arc<Window>;
    type Factory = WgpuFactory;
    type Device = WgpuDevice;

    fn create_factory(&mut self) -> Option<WgpuFactory> {
        if self.backends.is_empty() {
            log::error!("no wgpu backends enabled");
            return None;
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        });
        Some(WgpuFactory { instance })
    }

    fn create_device(
        &mut self,
        factory: &WgpuFactory,
        target: &Arc<Window>,
        config: &SwapChainConfig,
    ) -> anyhow::Result<WgpuDevice> {
        // Adapter/device acquisition is asynchronous under wgpu.
        pollster::block_on(WgpuDevice::new(&factory.instance, Arc::clone(target), config, self))
    }
}
