//! UiFrame: a thin wrapper around `ratatui::Frame` that clamps drawing to the
//! visible area.
//!
//! The swipe-in child routinely sits partly outside its container (that is
//! what "collapsed" means), so its placement carries signed coordinates.
//! `UiFrame` owns the clipping needed to composite such a child without
//! writing outside the buffer.
use crate::geometry::ChildPlacement;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Construct a `UiFrame` directly from an area and buffer, for offscreen
    /// rendering and tests.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: Widget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Copy `src` (whose area starts at 0,0) to `dest`, which may begin at
    /// negative coordinates. `dest` is relative to `origin`; cells falling
    /// outside `clip` are skipped.
    pub fn blit_from_signed(
        &mut self,
        src: &Buffer,
        origin: (u16, u16),
        dest: ChildPlacement,
        clip: Rect,
    ) {
        let Some(clip) = self.clip_rect(clip) else {
            return;
        };
        let clip_x0 = clip.x as i32;
        let clip_y0 = clip.y as i32;
        let clip_x1 = clip_x0 + clip.width as i32;
        let clip_y1 = clip_y0 + clip.height as i32;
        let base_x = origin.0 as i32 + dest.x;
        let base_y = origin.1 as i32 + dest.y;
        for sy in 0..dest.height as i32 {
            let dy = base_y + sy;
            if dy < clip_y0 || dy >= clip_y1 {
                continue;
            }
            for sx in 0..dest.width as i32 {
                let dx = base_x + sx;
                if dx < clip_x0 || dx >= clip_x1 {
                    continue;
                }
                if let (Some(src_cell), Some(dst_cell)) = (
                    src.cell((sx as u16, sy as u16)),
                    self.buffer.cell_mut((dx as u16, dy as u16)),
                ) {
                    *dst_cell = src_cell.clone();
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
