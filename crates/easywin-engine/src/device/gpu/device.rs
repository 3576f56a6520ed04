use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::{Fullscreen, Window};

use crate::coords::PixelRect;
use crate::device::{
    ClearFlags, CooperativeLevel, DepthStencilFormat, PresentOutcome, RenderDevice, RenderState,
    RenderStates, SwapChainConfig, VertexProcessing,
};
use crate::paint::Color;

use super::fill::{FillRenderer, FillTarget};
use super::surface::{self, SurfaceStatus};
use super::WgpuApi;

/// wgpu device bound to one window.
///
/// Scene bracket mapping:
/// - `begin_scene` acquires the surface texture and opens a command encoder
/// - clears are recorded as render passes in call order
/// - `end_scene` submits, `present` hands the texture to the compositor
pub struct WgpuDevice {
    window: Arc<Window>,

    /// Surface bound to the window; holds its own window reference.
    surface: wgpu::Surface<'static>,

    adapter: wgpu::Adapter,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,
    alpha_mode: Option<wgpu::CompositeAlphaMode>,
    frame_latency: u32,

    depth: Option<DepthBuffer>,
    states: RenderStates,
    fill: FillRenderer,

    /// Clears waiting for an open scene.
    pending: Vec<ClearOp>,
    frame: Option<Frame>,
    status: SurfaceStatus,
}

struct Frame {
    texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    /// `None` once the scene has been submitted.
    encoder: Option<wgpu::CommandEncoder>,
}

struct DepthBuffer {
    _texture: wgpu::Texture,
    view: wgpu::TextureView,
    format: wgpu::TextureFormat,
    has_stencil: bool,
}

enum ClearOp {
    Full {
        flags: ClearFlags,
        color: Color,
        depth: f32,
        stencil: u32,
    },
    Rects {
        rects: Vec<PixelRect>,
        color: Color,
    },
}

impl WgpuDevice {
    pub(super) async fn new(
        instance: &wgpu::Instance,
        window: Arc<Window>,
        config: &SwapChainConfig,
        api: &WgpuApi,
    ) -> Result<Self> {
        let size = window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: api.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: config.vertex_processing == VertexProcessing::Software,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("easywin device"),
                required_features: api.required_features,
                required_limits: api.required_limits.clone(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let caps = surface.get_capabilities(&adapter);
        let surface_config = surface::surface_configuration(
            &caps,
            config,
            api.alpha_mode,
            api.desired_maximum_frame_latency,
            size,
        )
        .context("no supported surface formats")?;
        surface.configure(&device, &surface_config);

        let depth = DepthBuffer::new(&device, config.depth_stencil_format, &surface_config);

        let info = adapter.get_info();
        log::info!(
            "using adapter `{}` ({:?}), format {:?}, present {:?}",
            info.name,
            info.backend,
            surface_config.format,
            surface_config.present_mode
        );

        let this = Self {
            window,
            surface,
            adapter,
            device,
            queue,
            config: surface_config,
            alpha_mode: api.alpha_mode,
            frame_latency: api.desired_maximum_frame_latency,
            depth,
            states: RenderStates::default(),
            fill: FillRenderer::default(),
            pending: Vec::new(),
            frame: None,
            status: SurfaceStatus::Ready,
        };
        this.apply_display_mode(config);
        Ok(this)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth.as_ref().map(|d| d.format)
    }

    /// Back-buffer size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Toggles set through [`RenderDevice::set_render_state`]. Pipelines built
    /// by the application should honor them.
    pub fn render_states(&self) -> RenderStates {
        self.states
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    fn apply_display_mode(&self, config: &SwapChainConfig) {
        if config.windowed {
            if self.window.fullscreen().is_some() {
                self.window.set_fullscreen(None);
            }
        } else {
            // Exclusive modes are left to the compositor; refresh rate is advisory.
            log::debug!("fullscreen requested, refresh rate {:?}", config.refresh_rate);
            self.window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }
    }

    fn flush_clears(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let Some(frame) = self.frame.as_mut() else { return };
        let Some(encoder) = frame.encoder.as_mut() else { return };

        for op in self.pending.drain(..) {
            match op {
                ClearOp::Full { flags, color, depth, stencil } => {
                    encode_full_clear(encoder, &frame.view, self.depth.as_ref(), flags, color, depth, stencil);
                }
                ClearOp::Rects { rects, color } => {
                    let target = FillTarget {
                        encoder: &mut *encoder,
                        view: &frame.view,
                        format: self.config.format,
                        width: self.config.width,
                        height: self.config.height,
                    };
                    self.fill.fill(&self.device, &self.queue, target, &rects, color);
                }
            }
        }
    }

    fn submit_scene(&mut self) {
        self.flush_clears();
        let Some(frame) = self.frame.as_mut() else { return };
        if let Some(encoder) = frame.encoder.take() {
            self.queue.submit(std::iter::once(encoder.finish()));
        }
    }
}

impl RenderDevice for WgpuDevice {
    fn set_render_state(&mut self, state: RenderState, enabled: bool) {
        self.states.set(state, enabled);
    }

    fn clear(&mut self, rects: &[PixelRect], flags: ClearFlags, color: Color, depth: f32, stencil: u32) {
        if rects.is_empty() {
            self.pending.push(ClearOp::Full { flags, color, depth, stencil });
        } else if flags.contains(ClearFlags::TARGET) {
            // Partial clears touch the colour target only.
            self.pending.push(ClearOp::Rects { rects: rects.to_vec(), color });
        }
    }

    fn begin_scene(&mut self) -> bool {
        if self.frame.is_some() {
            log::warn!("begin_scene while a scene is already open");
            return false;
        }

        match self.surface.get_current_texture() {
            Ok(texture) => {
                let view = texture
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());
                let encoder = self
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("easywin frame encoder"),
                    });
                self.frame = Some(Frame { texture, view, encoder: Some(encoder) });
                self.status = SurfaceStatus::Ready;
                self.flush_clears();
                true
            }
            Err(err) => {
                log::trace!("surface acquisition failed: {err}");
                self.status = surface::classify_surface_error(&err);
                self.pending.clear();
                false
            }
        }
    }

    fn end_scene(&mut self) {
        self.submit_scene();
    }

    fn present(&mut self) -> PresentOutcome {
        // A scene left open by the application is still submitted.
        self.submit_scene();
        self.pending.clear();

        match self.frame.take() {
            Some(frame) => {
                self.window.pre_present_notify();
                frame.texture.present();
                PresentOutcome::Presented
            }
            None => match self.status {
                SurfaceStatus::Lost | SurfaceStatus::Failed => PresentOutcome::DeviceLost,
                SurfaceStatus::Skipped => {
                    self.status = SurfaceStatus::Ready;
                    PresentOutcome::Dropped
                }
                SurfaceStatus::Ready => PresentOutcome::Dropped,
            },
        }
    }

    fn test_cooperative_level(&self) -> CooperativeLevel {
        match self.status {
            SurfaceStatus::Ready | SurfaceStatus::Skipped => CooperativeLevel::Ok,
            SurfaceStatus::Lost => {
                // A minimized window has no size to configure for yet.
                let size = self.window.inner_size();
                if size.width > 0 && size.height > 0 {
                    CooperativeLevel::NotReset
                } else {
                    CooperativeLevel::Lost
                }
            }
            SurfaceStatus::Failed => CooperativeLevel::Lost,
        }
    }

    fn reset(&mut self, config: &SwapChainConfig) -> Result<()> {
        let size = self.window.inner_size();
        anyhow::ensure!(size.width > 0 && size.height > 0, "window has zero size");

        self.frame = None;
        self.pending.clear();

        let caps = self.surface.get_capabilities(&self.adapter);
        self.config = surface::surface_configuration(
            &caps,
            config,
            self.alpha_mode,
            self.frame_latency,
            size,
        )
        .context("no supported surface formats")?;
        self.surface.configure(&self.device, &self.config);
        self.depth = DepthBuffer::new(&self.device, config.depth_stencil_format, &self.config);
        self.apply_display_mode(config);

        self.status = SurfaceStatus::Ready;
        log::debug!("surface reconfigured to {}x{}", self.config.width, self.config.height);
        Ok(())
    }
}

impl DepthBuffer {
    fn new(
        device: &wgpu::Device,
        format: DepthStencilFormat,
        config: &wgpu::SurfaceConfiguration,
    ) -> Option<Self> {
        let texture_format = surface::depth_texture_format(format)?;
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("easywin depth buffer"),
            size: wgpu::Extent3d {
                width: config.width,
                height: config.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: texture_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Some(Self {
            _texture: texture,
            view,
            format: texture_format,
            has_stencil: format.has_stencil(),
        })
    }
}

fn encode_full_clear(
    encoder: &mut wgpu::CommandEncoder,
    color_view: &wgpu::TextureView,
    depth: Option<&DepthBuffer>,
    flags: ClearFlags,
    color: Color,
    depth_value: f32,
    stencil: u32,
) {
    let color_load = if flags.contains(ClearFlags::TARGET) {
        wgpu::LoadOp::Clear(wgpu::Color::from(color.clamped()))
    } else {
        wgpu::LoadOp::Load
    };

    let depth_attachment = depth.map(|d| wgpu::RenderPassDepthStencilAttachment {
        view: &d.view,
        depth_ops: Some(wgpu::Operations {
            load: if flags.contains(ClearFlags::ZBUFFER) {
                wgpu::LoadOp::Clear(depth_value.clamp(0.0, 1.0))
            } else {
                wgpu::LoadOp::Load
            },
            store: wgpu::StoreOp::Store,
        }),
        stencil_ops: d.has_stencil.then(|| wgpu::Operations {
            load: if flags.contains(ClearFlags::STENCIL) {
                wgpu::LoadOp::Clear(stencil)
            } else {
                wgpu::LoadOp::Load
            },
            store: wgpu::StoreOp::Store,
        }),
    });

    let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("easywin clear"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: color_load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: depth_attachment,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    });
}
