/// Window state the surface layer reads.
///
/// Owned by the hosting application and mutated only in response to
/// window-system notifications. `handle` is whatever the graphics backend binds
/// swap chains to.
#[derive(Debug, Clone)]
pub struct WindowDescriptor<H> {
    pub handle: H,
    pub width: u32,
    pub height: u32,
    pub minimized: bool,
}

impl<H> WindowDescriptor<H> {
    pub fn new(handle: H, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
            minimized: false,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// A surface can only back a visible, non-empty client area.
    pub fn is_renderable(&self) -> bool {
        !self.minimized && self.width > 0 && self.height > 0
    }
}
