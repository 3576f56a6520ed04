//! Graphics device management.
//!
//! This module is responsible for:
//! - the backend seam ([`GraphicsApi`], [`RenderDevice`])
//! - swap-chain configuration ([`SwapChainConfig`])
//! - device lifetime: create, destroy, reset on loss ([`DeviceManager`])
//! - the wgpu backend ([`WgpuApi`])

mod api;
mod config;
mod gpu;
mod manager;

pub use api::{
    ClearFlags, CooperativeLevel, GraphicsApi, PresentOutcome, RenderDevice, RenderState,
    RenderStates,
};
pub use config::{
    BackBufferFormat, DepthStencilFormat, PresentInterval, RefreshRate, SwapChainConfig,
    SwapEffect, VertexProcessing,
};
pub use gpu::{WgpuApi, WgpuDevice, WgpuFactory};
pub use manager::{DeviceManager, DeviceState};
