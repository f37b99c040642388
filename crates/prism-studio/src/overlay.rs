use std::cell::Cell;
use std::rc::Rc;

use prism_engine::coords::{ColorRgba, Viewport};
use prism_engine::device::{DeviceError, RenderTargetView, WgpuDevice, WgpuRenderTarget};
use prism_engine::gui::{DrawData, DrawList};
use prism_engine::render::{DrawDataRenderer, ExtensionHook, WgpuDrawRenderer};

/// Pointer position shared between the app's event handler and the overlay.
pub type SharedCursor = Rc<Cell<Option<[f32; 2]>>>;

const CROSSHAIR: ColorRgba = ColorRgba::new(1.0, 0.25, 0.25, 0.85);

/// Draws a crosshair at the pointer on top of the GUI, right before present.
pub struct CursorOverlay {
    cursor: SharedCursor,
    renderer: WgpuDrawRenderer,
}

impl CursorOverlay {
    pub fn new(cursor: SharedCursor) -> Self {
        Self {
            cursor,
            renderer: WgpuDrawRenderer::new(),
        }
    }
}

impl ExtensionHook<WgpuDevice> for CursorOverlay {
    fn draw(&mut self, device: &mut WgpuDevice, target: &WgpuRenderTarget) -> Result<(), DeviceError> {
        let Some([x, y]) = self.cursor.get() else {
            return Ok(());
        };

        let (w, h) = target.size();
        let mut list = DrawList::new();
        list.add_rect_filled([x - 8.0, y - 0.5], [x + 8.0, y + 0.5], CROSSHAIR);
        list.add_rect_filled([x - 0.5, y - 8.0], [x + 0.5, y + 8.0], CROSSHAIR);

        let data = DrawData {
            display_size: Viewport::from_pixels(w, h),
            lists: vec![list],
        };
        self.renderer.render(device, target, &data)
    }
}
