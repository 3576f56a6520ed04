//! Swap-chain policy: maps [`SwapChainConfig`] onto wgpu surface settings.

use winit::dpi::PhysicalSize;

use crate::device::{BackBufferFormat, DepthStencilFormat, PresentInterval, SwapChainConfig};

/// Surface health as last observed by frame acquisition.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(super) enum SurfaceStatus {
    Ready,
    /// Lost or outdated; a reconfigure brings it back.
    Lost,
    /// This frame could not be acquired, but the surface is fine.
    Skipped,
    /// Unrecoverable without recreating the device (commonly OOM).
    Failed,
}

pub(super) fn classify_surface_error(err: &wgpu::SurfaceError) -> SurfaceStatus {
    match err {
        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceStatus::Lost,
        wgpu::SurfaceError::OutOfMemory => SurfaceStatus::Failed,
        wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other => SurfaceStatus::Skipped,
    }
}

pub(super) fn choose_surface_format(
    formats: &[wgpu::TextureFormat],
    requested: BackBufferFormat,
) -> Option<wgpu::TextureFormat> {
    let explicit = match requested {
        BackBufferFormat::Auto => None,
        BackBufferFormat::Bgra8 => Some(wgpu::TextureFormat::Bgra8Unorm),
        BackBufferFormat::Rgba8 => Some(wgpu::TextureFormat::Rgba8Unorm),
        BackBufferFormat::Bgra8Srgb => Some(wgpu::TextureFormat::Bgra8UnormSrgb),
        BackBufferFormat::Rgba8Srgb => Some(wgpu::TextureFormat::Rgba8UnormSrgb),
    };

    if let Some(f) = explicit {
        if formats.contains(&f) {
            return Some(f);
        }
        log::warn!("back-buffer format {f:?} unsupported by this surface; picking automatically");
    }

    let preferred = [
        wgpu::TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::Rgba8UnormSrgb,
    ];
    preferred
        .into_iter()
        .find(|f| formats.contains(f))
        .or_else(|| formats.first().copied())
}

pub(super) fn choose_alpha_mode(
    modes: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    requested
        .filter(|m| modes.contains(m))
        .or_else(|| modes.first().copied())
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// FIFO is guaranteed everywhere, so vsync never needs a fallback.
pub(super) fn choose_present_mode(
    modes: &[wgpu::PresentMode],
    interval: PresentInterval,
) -> wgpu::PresentMode {
    match interval {
        PresentInterval::One => wgpu::PresentMode::Fifo,
        PresentInterval::Immediate => [wgpu::PresentMode::Immediate, wgpu::PresentMode::Mailbox]
            .into_iter()
            .find(|m| modes.contains(m))
            .unwrap_or(wgpu::PresentMode::Fifo),
    }
}

pub(super) fn depth_texture_format(format: DepthStencilFormat) -> Option<wgpu::TextureFormat> {
    match format {
        DepthStencilFormat::None => None,
        DepthStencilFormat::D16 => Some(wgpu::TextureFormat::Depth16Unorm),
        DepthStencilFormat::D24S8 => Some(wgpu::TextureFormat::Depth24PlusStencil8),
        DepthStencilFormat::D32F => Some(wgpu::TextureFormat::Depth32Float),
    }
}

/// Builds the surface configuration for `size`. `None` if the surface reports
/// no formats at all.
pub(super) fn surface_configuration(
    caps: &wgpu::SurfaceCapabilities,
    config: &SwapChainConfig,
    alpha_mode: Option<wgpu::CompositeAlphaMode>,
    frame_latency: u32,
    size: PhysicalSize<u32>,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = choose_surface_format(&caps.formats, config.back_buffer_format)?;
    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode: choose_present_mode(&caps.present_modes, config.presentation_interval),
        alpha_mode: choose_alpha_mode(&caps.alpha_modes, alpha_mode),
        view_formats: vec![],
        desired_maximum_frame_latency: frame_latency,
    })
}
