//! A deliberately small immediate-mode GUI used to exercise the engine.
//!
//! Widgets are plain colored geometry (no text rendering). State that must
//! survive between frames (hover, active widget, frame-time history) lives in
//! the context; everything else is rebuilt every frame.

use std::collections::VecDeque;

use prism_engine::coords::{ColorRgba, Viewport};
use prism_engine::gui::{ClipRect, DrawData, DrawList, GuiContext};
use prism_engine::input::{InputEvent, MouseButton};

const HISTORY_LEN: usize = 120;

const PANEL_BG: ColorRgba = ColorRgba::new(0.10, 0.11, 0.13, 0.92);
const PANEL_BORDER: ColorRgba = ColorRgba::new(0.30, 0.33, 0.38, 1.0);
const ACCENT: ColorRgba = ColorRgba::new(0.26, 0.59, 0.98, 1.0);
const ACCENT_HOVER: ColorRgba = ColorRgba::new(0.40, 0.68, 1.0, 1.0);
const GRAPH_BAR: ColorRgba = ColorRgba::new(0.90, 0.70, 0.00, 1.0);

pub struct StudioGui {
    display_size: Viewport,
    dt: f32,
    history: VecDeque<f32>,

    pointer: Option<[f32; 2]>,
    pointer_down: bool,
    released_this_frame: bool,
    hovering_panel: bool,

    list: DrawList,
    draw_data: DrawData,
}

impl StudioGui {
    pub fn new() -> Self {
        Self {
            display_size: Viewport::default(),
            dt: 0.0,
            history: VecDeque::with_capacity(HISTORY_LEN),
            pointer: None,
            pointer_down: false,
            released_this_frame: false,
            hovering_panel: false,
            list: DrawList::new(),
            draw_data: DrawData::default(),
        }
    }

    fn hovered(&self, min: [f32; 2], max: [f32; 2]) -> bool {
        self.pointer.is_some_and(|[x, y]| x >= min[0] && x < max[0] && y >= min[1] && y < max[1])
    }

    /// Background panel with a border. Marks the pointer as captured while over it.
    pub fn panel(&mut self, min: [f32; 2], max: [f32; 2]) {
        if self.hovered(min, max) {
            self.hovering_panel = true;
        }
        self.list.add_rect_filled(min, max, PANEL_BG);
        self.list.add_rect(min, max, PANEL_BORDER, 1.0);
    }

    /// A filled button. Returns `true` on the frame it is clicked.
    pub fn button(&mut self, min: [f32; 2], max: [f32; 2], on: bool) -> bool {
        let hovered = self.hovered(min, max);
        let fill = match (on, hovered) {
            (_, true) => ACCENT_HOVER,
            (true, false) => ACCENT,
            (false, false) => PANEL_BORDER,
        };
        self.list.add_rect_filled(min, max, fill);
        hovered && self.released_this_frame
    }

    /// Bar graph of recent frame times, scaled so 33 ms fills the height.
    pub fn frame_graph(&mut self, min: [f32; 2], max: [f32; 2]) {
        let (w, h) = (max[0] - min[0], max[1] - min[1]);
        if w <= 0.0 || h <= 0.0 || self.history.is_empty() {
            return;
        }

        self.list.push_clip_rect(ClipRect::new(min, max));
        let bar_w = w / HISTORY_LEN as f32;
        for (i, dt) in self.history.iter().enumerate() {
            let frac = (dt / 0.033).clamp(0.0, 1.0);
            let x0 = min[0] + i as f32 * bar_w;
            self.list
                .add_rect_filled([x0, max[1] - frac * h], [x0 + bar_w, max[1]], GRAPH_BAR);
        }
        self.list.pop_clip_rect();
    }

    pub fn delta_time(&self) -> f32 {
        self.dt
    }
}

impl GuiContext for StudioGui {
    // All state is in `self`; nothing global to switch.
    fn make_current(&mut self) {}

    fn set_delta_time(&mut self, dt: f32) {
        self.dt = dt;
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(dt);
    }

    fn set_display_size(&mut self, size: Viewport) {
        self.display_size = size;
    }

    fn display_size(&self) -> Viewport {
        self.display_size
    }

    fn push_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMoved { x, y } => self.pointer = Some([x, y]),
            InputEvent::PointerLeft => self.pointer = None,
            InputEvent::PointerButton {
                button: MouseButton::Left,
                pressed,
            } => {
                if !pressed && self.pointer_down {
                    self.released_this_frame = true;
                }
                self.pointer_down = pressed;
            }
            InputEvent::Focused(false) => {
                self.pointer_down = false;
            }
            _ => {}
        }
    }

    fn new_frame(&mut self) {
        self.list.clear();
        self.hovering_panel = false;
    }

    fn render(&mut self) {
        self.draw_data = DrawData {
            display_size: self.display_size,
            lists: vec![std::mem::take(&mut self.list)],
        };
        self.released_this_frame = false;
    }

    fn draw_data(&self) -> &DrawData {
        &self.draw_data
    }

    fn wants_capture_mouse(&self) -> bool {
        self.hovering_panel
    }
}
