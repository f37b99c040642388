//! Recording doubles for the device, swap chain, GUI context and renderer.
//!
//! Every observable call lands in a shared `CallLog`; releases are logged from
//! `Drop` so tests can assert teardown order and counts.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::coords::{ColorRgba, Viewport};
use crate::device::{
    DeviceError, GraphicsDevice, PresentFormat, RenderTargetView, SwapChain, SwapChainDesc,
};
use crate::gui::{DrawData, DrawList, GuiContext};
use crate::input::InputEvent;
use crate::render::{DrawDataRenderer, ExtensionHook};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    CreateSwapChain { window: u32, desc: SwapChainDesc },
    GetBackBuffer { id: u32 },
    CreateView { buffer: u32 },
    ResizeBuffers { count: u32, width: u32, height: u32, format: PresentFormat },
    ReleaseView { buffer: u32 },
    ReleaseBackBuffer { id: u32 },
    ReleaseSwapChain,
    Bind { buffer: u32 },
    Clear { buffer: u32, color: [f32; 4] },
    SubmitDrawData { buffer: u32, indices: usize },
    Hook { buffer: u32 },
    Present { sync_interval: u32 },

    MakeCurrent,
    SetDeltaTime(f32),
    SetDisplaySize(u32, u32),
    PushInput(InputEvent),
    NewFrame,
    BuildUi,
    Render,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Rc<RefCell<Vec<Call>>>);

impl CallLog {
    pub(crate) fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    /// Drains and returns everything recorded so far.
    pub(crate) fn take(&self) -> Vec<Call> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.0.borrow().iter().filter(|c| pred(c)).count()
    }
}

/// Failure switches shared between a `MockDevice` and its swap chains.
#[derive(Debug, Default)]
pub(crate) struct SwapChainControl {
    pub(crate) fail_resize: Cell<bool>,
    pub(crate) fail_present: Cell<bool>,
}

#[derive(Debug)]
pub(crate) struct MockDevice {
    log: CallLog,
    next_buffer: Rc<Cell<u32>>,
    control: Rc<SwapChainControl>,
    pub(crate) fail_create_swap_chain: bool,
}

impl MockDevice {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            next_buffer: Rc::new(Cell::new(1)),
            control: Rc::new(SwapChainControl::default()),
            fail_create_swap_chain: false,
        }
    }

    pub(crate) fn swap_chain_control(&self) -> &SwapChainControl {
        &self.control
    }
}

#[derive(Debug)]
pub(crate) struct MockSwapChain {
    log: CallLog,
    next_buffer: Rc<Cell<u32>>,
    control: Rc<SwapChainControl>,
    width: u32,
    height: u32,
}

#[derive(Debug)]
pub(crate) struct MockTexture {
    log: CallLog,
    id: u32,
    width: u32,
    height: u32,
}

#[derive(Debug)]
pub(crate) struct MockView {
    log: CallLog,
    buffer: u32,
    width: u32,
    height: u32,
}

impl RenderTargetView for MockView {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Drop for MockView {
    fn drop(&mut self) {
        self.log.push(Call::ReleaseView { buffer: self.buffer });
    }
}

impl Drop for MockTexture {
    fn drop(&mut self) {
        self.log.push(Call::ReleaseBackBuffer { id: self.id });
    }
}

impl Drop for MockSwapChain {
    fn drop(&mut self) {
        self.log.push(Call::ReleaseSwapChain);
    }
}

impl SwapChain for MockSwapChain {
    type Texture = MockTexture;

    fn back_buffer(&mut self) -> Result<MockTexture, DeviceError> {
        let id = self.next_buffer.get();
        self.next_buffer.set(id + 1);
        self.log.push(Call::GetBackBuffer { id });
        Ok(MockTexture {
            log: self.log.clone(),
            id,
            width: self.width,
            height: self.height,
        })
    }

    fn resize_buffers(
        &mut self,
        buffer_count: u32,
        width: u32,
        height: u32,
        format: PresentFormat,
    ) -> Result<(), DeviceError> {
        if self.control.fail_resize.get() {
            return Err(DeviceError::new("resize_buffers", "injected failure"));
        }
        self.log.push(Call::ResizeBuffers {
            count: buffer_count,
            width,
            height,
            format,
        });
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn present(&mut self, sync_interval: u32) -> Result<(), DeviceError> {
        if self.control.fail_present.get() {
            return Err(DeviceError::new("present", "injected failure"));
        }
        self.log.push(Call::Present { sync_interval });
        Ok(())
    }
}

impl GraphicsDevice for MockDevice {
    type Window = u32;
    type Texture = MockTexture;
    type SwapChain = MockSwapChain;
    type RenderTargetView = MockView;

    fn create_swap_chain(
        &mut self,
        window: &u32,
        desc: &SwapChainDesc,
    ) -> Result<MockSwapChain, DeviceError> {
        if self.fail_create_swap_chain {
            return Err(DeviceError::new("create_swap_chain", "injected failure"));
        }
        self.log.push(Call::CreateSwapChain {
            window: *window,
            desc: desc.clone(),
        });
        Ok(MockSwapChain {
            log: self.log.clone(),
            next_buffer: self.next_buffer.clone(),
            control: self.control.clone(),
            width: desc.width,
            height: desc.height,
        })
    }

    fn create_render_target_view(&mut self, back_buffer: &MockTexture) -> Result<MockView, DeviceError> {
        self.log.push(Call::CreateView { buffer: back_buffer.id });
        Ok(MockView {
            log: self.log.clone(),
            buffer: back_buffer.id,
            width: back_buffer.width,
            height: back_buffer.height,
        })
    }

    fn bind_render_target(&mut self, view: &MockView) -> Result<(), DeviceError> {
        self.log.push(Call::Bind { buffer: view.buffer });
        Ok(())
    }

    fn clear_render_target(&mut self, view: &MockView, color: ColorRgba) -> Result<(), DeviceError> {
        self.log.push(Call::Clear {
            buffer: view.buffer,
            color: color.to_array(),
        });
        Ok(())
    }
}

/// GUI context that records calls and emits whatever was queued for the frame.
#[derive(Debug)]
pub(crate) struct MockGui {
    log: CallLog,
    display_size: Viewport,
    pending: DrawList,
    draw_data: DrawData,
    pub(crate) capture_mouse: bool,
    pub(crate) capture_keyboard: bool,
}

impl MockGui {
    pub(crate) fn new(log: CallLog) -> Self {
        Self {
            log,
            display_size: Viewport::default(),
            pending: DrawList::new(),
            draw_data: DrawData::default(),
            capture_mouse: false,
            capture_keyboard: false,
        }
    }

    /// Queues one rectangle (6 indices) for the current frame.
    pub(crate) fn queue_rect(&mut self) {
        self.pending
            .add_rect_filled([0.0, 0.0], [4.0, 4.0], ColorRgba::white());
    }
}

impl GuiContext for MockGui {
    fn make_current(&mut self) {
        self.log.push(Call::MakeCurrent);
    }

    fn set_delta_time(&mut self, dt: f32) {
        self.log.push(Call::SetDeltaTime(dt));
    }

    fn set_display_size(&mut self, size: Viewport) {
        self.log
            .push(Call::SetDisplaySize(size.width as u32, size.height as u32));
        self.display_size = size;
    }

    fn display_size(&self) -> Viewport {
        self.display_size
    }

    fn push_input(&mut self, event: InputEvent) {
        self.log.push(Call::PushInput(event));
    }

    fn new_frame(&mut self) {
        self.log.push(Call::NewFrame);
        self.pending.clear();
    }

    fn render(&mut self) {
        self.log.push(Call::Render);
        self.draw_data = DrawData {
            display_size: self.display_size,
            lists: vec![std::mem::take(&mut self.pending)],
        };
    }

    fn draw_data(&self) -> &DrawData {
        &self.draw_data
    }

    fn wants_capture_mouse(&self) -> bool {
        self.capture_mouse
    }

    fn wants_capture_keyboard(&self) -> bool {
        self.capture_keyboard
    }
}

#[derive(Debug)]
pub(crate) struct MockRenderer {
    log: CallLog,
}

impl MockRenderer {
    pub(crate) fn new(log: CallLog) -> Self {
        Self { log }
    }
}

impl DrawDataRenderer<MockDevice> for MockRenderer {
    fn render(&mut self, _device: &mut MockDevice, target: &MockView, data: &DrawData) -> Result<(), DeviceError> {
        self.log.push(Call::SubmitDrawData {
            buffer: target.buffer,
            indices: data.total_index_count(),
        });
        Ok(())
    }
}

#[derive(Debug)]
pub(crate) struct RecordingHook {
    log: CallLog,
    pub(crate) fail: bool,
}

impl RecordingHook {
    pub(crate) fn new(log: CallLog) -> Self {
        Self { log, fail: false }
    }
}

impl ExtensionHook<MockDevice> for RecordingHook {
    fn draw(&mut self, _device: &mut MockDevice, target: &MockView) -> Result<(), DeviceError> {
        if self.fail {
            return Err(DeviceError::new("extension hook", "injected failure"));
        }
        self.log.push(Call::Hook { buffer: target.buffer });
        Ok(())
    }
}
