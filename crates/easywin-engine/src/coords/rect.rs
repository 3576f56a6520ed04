/// Axis-aligned rectangle in physical pixels, stored as edges.
///
/// Half-open: `[left, right) x [top, bottom)`. Used to restrict clears to part
/// of the render target.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl PixelRect {
    #[inline]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle from origin and size.
    #[inline]
    pub const fn from_origin_size(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left).max(0)
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top).max(0)
    }

    /// Returns a rectangle with `left <= right` and `top <= bottom`.
    pub fn normalized(self) -> Self {
        Self::new(
            self.left.min(self.right),
            self.top.min(self.bottom),
            self.left.max(self.right),
            self.top.max(self.bottom),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Intersects with a `width x height` target anchored at the origin.
    ///
    /// Returns `None` when nothing of the rectangle is inside the target.
    pub fn clip_to(self, width: u32, height: u32) -> Option<Self> {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        let r = self.normalized();
        let clipped = Self::new(r.left.max(0), r.top.max(0), r.right.min(w), r.bottom.min(h));
        if clipped.is_empty() { None } else { Some(clipped) }
    }
}
