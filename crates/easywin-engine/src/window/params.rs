use bitflags::bitflags;

bitflags! {
    /// Window style bits.
    ///
    /// Values match the Win32 `WS_*` constants so style words written for that
    /// API can be passed through unchanged. Backends translate the subset they
    /// understand and ignore the rest.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        const OVERLAPPED  = 0x0000_0000;
        const MAXIMIZEBOX = 0x0001_0000;
        const MINIMIZEBOX = 0x0002_0000;
        const THICKFRAME  = 0x0004_0000;
        const SYSMENU     = 0x0008_0000;
        const DLGFRAME    = 0x0040_0000;
        const BORDER      = 0x0080_0000;
        const CAPTION     = Self::BORDER.bits() | Self::DLGFRAME.bits();
        const MAXIMIZE    = 0x0100_0000;
        const DISABLED    = 0x0800_0000;
        const VISIBLE     = 0x1000_0000;
        const MINIMIZE    = 0x2000_0000;
        const POPUP       = 0x8000_0000;

        const OVERLAPPEDWINDOW = Self::OVERLAPPED.bits()
            | Self::CAPTION.bits()
            | Self::SYSMENU.bits()
            | Self::THICKFRAME.bits()
            | Self::MINIMIZEBOX.bits()
            | Self::MAXIMIZEBOX.bits();
    }
}

impl WindowFlags {
    /// Popup windows have no frame; everything else is decorated.
    pub fn decorated(self) -> bool {
        !self.contains(Self::POPUP)
    }

    pub fn resizable(self) -> bool {
        self.contains(Self::THICKFRAME)
    }
}

/// Window creation parameters.
///
/// `position` is the top-left corner in screen coordinates; `size` is the
/// client-area size in physical pixels.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindowParams {
    pub flags: WindowFlags,
    pub position: (i32, i32),
    pub size: (u32, u32),
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            flags: WindowFlags::OVERLAPPEDWINDOW,
            position: (100, 100),
            size: (1280, 720),
        }
    }
}

impl WindowParams {
    pub fn new(flags: WindowFlags) -> Self {
        Self { flags, ..Self::default() }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

/// How `show` changes the window's visibility.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ShowCommand {
    /// Whatever the platform considers the initial state; shown, not resized.
    #[default]
    Default,
    Show,
    Hide,
    Minimize,
    Maximize,
    Restore,
}
