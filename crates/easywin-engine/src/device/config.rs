/// How presented back buffers are recycled.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SwapEffect {
    /// Contents are undefined after present.
    #[default]
    Discard,
    Flip,
    Copy,
}

/// Back-buffer pixel format.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum BackBufferFormat {
    /// Let the backend pick the display's preferred format.
    #[default]
    Auto,
    Bgra8,
    Rgba8,
    Bgra8Srgb,
    Rgba8Srgb,
}

/// Depth/stencil buffer created alongside the back buffer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum DepthStencilFormat {
    None,
    #[default]
    D16,
    D24S8,
    D32F,
}

impl DepthStencilFormat {
    pub fn has_stencil(self) -> bool {
        matches!(self, Self::D24S8)
    }
}

/// Vertical sync policy.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum PresentInterval {
    /// Present immediately; may tear.
    Immediate,
    /// Wait for one vertical blank.
    #[default]
    One,
}

/// Fullscreen refresh rate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RefreshRate {
    #[default]
    Default,
    Hz(u32),
}

/// Where vertex processing runs.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum VertexProcessing {
    #[default]
    Hardware,
    Software,
}

/// Swap-chain parameters applied on device creation and on every reset.
///
/// The defaults are the fixed policy used by the graphics window: windowed,
/// discard, automatic format, 16-bit depth, one vsync interval, default rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapChainConfig {
    pub windowed: bool,
    pub swap_effect: SwapEffect,
    pub back_buffer_format: BackBufferFormat,
    pub depth_stencil_format: DepthStencilFormat,
    pub presentation_interval: PresentInterval,
    pub refresh_rate: RefreshRate,
    pub vertex_processing: VertexProcessing,
}

impl Default for SwapChainConfig {
    fn default() -> Self {
        Self {
            windowed: true,
            swap_effect: SwapEffect::Discard,
            back_buffer_format: BackBufferFormat::Auto,
            depth_stencil_format: DepthStencilFormat::D16,
            presentation_interval: PresentInterval::One,
            refresh_rate: RefreshRate::Default,
            vertex_processing: VertexProcessing::Hardware,
        }
    }
}
