use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, Viewport};

/// Vertex of GUI geometry: display-space position and straight-alpha color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct DrawVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

/// Axis-aligned clip rectangle in display pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ClipRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
}

impl ClipRect {
    pub const fn new(min: [f32; 2], max: [f32; 2]) -> Self {
        Self { min, max }
    }

    /// Overlap of two rectangles (may be empty).
    pub fn intersect(self, other: ClipRect) -> ClipRect {
        ClipRect {
            min: [self.min[0].max(other.min[0]), self.min[1].max(other.min[1])],
            max: [self.max[0].min(other.max[0]), self.max[1].min(other.max[1])],
        }
    }

    pub fn is_empty(self) -> bool {
        self.max[0] <= self.min[0] || self.max[1] <= self.min[1]
    }

    /// Converts to a scissor `(x, y, w, h)` clamped to `viewport`.
    ///
    /// Returns `None` when nothing of the rectangle is visible.
    pub fn to_scissor(self, viewport: Viewport) -> Option<(u32, u32, u32, u32)> {
        let vw = viewport.width.max(0.0);
        let vh = viewport.height.max(0.0);

        let x0 = self.min[0].clamp(0.0, vw) as u32;
        let y0 = self.min[1].clamp(0.0, vh) as u32;
        let x1 = self.max[0].clamp(0.0, vw) as u32;
        let y1 = self.max[1].clamp(0.0, vh) as u32;

        let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
        if w == 0 || h == 0 { None } else { Some((x0, y0, w, h)) }
    }
}

/// A run of indices sharing one clip rectangle.
///
/// `clip_rect = None` means no scissor (the whole target).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DrawCommand {
    pub clip_rect: Option<ClipRect>,
    pub index_offset: u32,
    pub index_count: u32,
}

/// Geometry of one GUI layer (window, popup, overlay), in paint order.
///
/// Indices are relative to this list's vertex buffer.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub vertices: Vec<DrawVertex>,
    pub indices: Vec<u32>,
    pub commands: Vec<DrawCommand>,
    clip_stack: Vec<ClipRect>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.commands.clear();
        self.clip_stack.clear();
    }

    /// Pushes a clip rectangle, intersected with the current one.
    pub fn push_clip_rect(&mut self, rect: ClipRect) {
        let rect = match self.clip_stack.last() {
            Some(top) => top.intersect(rect),
            None => rect,
        };
        self.clip_stack.push(rect);
    }

    pub fn pop_clip_rect(&mut self) {
        self.clip_stack.pop();
    }

    fn current_clip(&self) -> Option<ClipRect> {
        self.clip_stack.last().copied()
    }

    /// Appends an indexed triangle list, extending the last command when the clip matches.
    pub fn add_mesh(&mut self, vertices: &[DrawVertex], indices: &[u32]) {
        if indices.is_empty() {
            return;
        }

        let clip = self.current_clip();
        if clip.is_some_and(ClipRect::is_empty) {
            return;
        }

        let base = self.vertices.len() as u32;
        let index_offset = self.indices.len() as u32;
        self.vertices.extend_from_slice(vertices);
        self.indices.extend(indices.iter().map(|i| base + i));

        match self.commands.last_mut() {
            Some(cmd) if cmd.clip_rect == clip => cmd.index_count += indices.len() as u32,
            _ => self.commands.push(DrawCommand {
                clip_rect: clip,
                index_offset,
                index_count: indices.len() as u32,
            }),
        }
    }

    /// Appends a filled axis-aligned rectangle.
    pub fn add_rect_filled(&mut self, min: [f32; 2], max: [f32; 2], color: ColorRgba) {
        if max[0] <= min[0] || max[1] <= min[1] {
            return;
        }
        let color = color.to_array();
        let vertices = [
            DrawVertex { pos: [min[0], min[1]], color },
            DrawVertex { pos: [max[0], min[1]], color },
            DrawVertex { pos: [max[0], max[1]], color },
            DrawVertex { pos: [min[0], max[1]], color },
        ];
        self.add_mesh(&vertices, &[0, 1, 2, 0, 2, 3]);
    }

    /// Appends a rectangle outline of the given thickness.
    pub fn add_rect(&mut self, min: [f32; 2], max: [f32; 2], color: ColorRgba, thickness: f32) {
        let t = thickness.max(0.0);
        self.add_rect_filled(min, [max[0], min[1] + t], color);
        self.add_rect_filled([min[0], max[1] - t], max, color);
        self.add_rect_filled([min[0], min[1] + t], [min[0] + t, max[1] - t], color);
        self.add_rect_filled([max[0] - t, min[1] + t], [max[0], max[1] - t], color);
    }

    pub fn add_triangle_filled(&mut self, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: ColorRgba) {
        let color = color.to_array();
        let vertices = [
            DrawVertex { pos: a, color },
            DrawVertex { pos: b, color },
            DrawVertex { pos: c, color },
        ];
        self.add_mesh(&vertices, &[0, 1, 2]);
    }
}

/// Finalized output of one GUI frame.
#[derive(Debug, Clone, Default)]
pub struct DrawData {
    pub display_size: Viewport,
    pub lists: Vec<DrawList>,
}

impl DrawData {
    pub fn new(display_size: Viewport) -> Self {
        Self {
            display_size,
            lists: Vec::new(),
        }
    }

    pub fn total_vertex_count(&self) -> usize {
        self.lists.iter().map(|l| l.vertices.len()).sum()
    }

    pub fn total_index_count(&self) -> usize {
        self.lists.iter().map(|l| l.indices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(DrawList::is_empty)
    }
}
