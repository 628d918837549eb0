//! PixelView: maps an engine draw target into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each cell holds two pixel rows ("half-rows") using [`HALF_BLOCK`]. A screen
//! pixel covers `scale_x` columns and `scale_y` half-rows, and the image is
//! centered in the viewport. Cells outside the image are black.

use crate::core::Sprite;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Upper half block: foreground paints the top half, background the bottom.
pub const HALF_BLOCK: char = '\u{2580}';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Placement of the screen inside a viewport, in columns and half-rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub screen_width: i32,
    pub screen_height: i32,
    pub scale_x: i32,
    pub scale_y: i32,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Layout {
    /// Screen pixel under a terminal cell. Rows address the upper half of the
    /// cell; results are clamped onto the screen.
    pub fn cell_to_pixel(&self, col: u16, row: u16) -> (i32, i32) {
        let x = (col as i32 - self.offset_x).div_euclid(self.scale_x);
        let y = (row as i32 * 2 - self.offset_y).div_euclid(self.scale_y);
        (
            x.clamp(0, (self.screen_width - 1).max(0)),
            y.clamp(0, (self.screen_height - 1).max(0)),
        )
    }

    /// Screen pixel shown at column `col`, half-row `hy`, if any.
    #[inline]
    fn pixel_at(&self, col: i32, hy: i32) -> Option<(i32, i32)> {
        let dx = col - self.offset_x;
        let dy = hy - self.offset_y;
        if dx < 0 || dy < 0 {
            return None;
        }
        let (x, y) = (dx / self.scale_x, dy / self.scale_y);
        if x >= self.screen_width || y >= self.screen_height {
            return None;
        }
        Some((x, y))
    }
}

/// Sprite-to-cells renderer for one window configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelView {
    pixel_w: i32,
    pixel_h: i32,
    full_screen: bool,
}

impl Default for PixelView {
    fn default() -> Self {
        Self::new(1, 1, false)
    }
}

impl PixelView {
    /// Non-positive pixel sizes are treated as 1.
    pub fn new(pixel_w: i32, pixel_h: i32, full_screen: bool) -> Self {
        Self {
            pixel_w: pixel_w.max(1),
            pixel_h: pixel_h.max(1),
            full_screen,
        }
    }

    /// Cells needed to show a screen at its nominal pixel size.
    pub fn required_viewport(&self, screen_w: i32, screen_h: i32) -> Viewport {
        let cols = (screen_w as i64 * self.pixel_w as i64).clamp(0, u16::MAX as i64);
        let half_rows = screen_h as i64 * self.pixel_h as i64;
        let rows = ((half_rows + 1) / 2).clamp(0, u16::MAX as i64);
        Viewport::new(cols as u16, rows as u16)
    }

    /// Place a `screen_w` x `screen_h` image in `viewport`.
    ///
    /// In full-screen mode the pixel size is multiplied by the largest
    /// integer factor that still fits.
    pub fn layout(&self, screen_w: i32, screen_h: i32, viewport: Viewport) -> Layout {
        let avail_x = viewport.width as i64;
        let avail_y = viewport.height as i64 * 2;
        let (sw, sh) = (screen_w.max(0) as i64, screen_h.max(0) as i64);

        let factor = if self.full_screen && sw > 0 && sh > 0 {
            let fx = avail_x / (sw * self.pixel_w as i64);
            let fy = avail_y / (sh * self.pixel_h as i64);
            fx.min(fy).max(1)
        } else {
            1
        };

        let scale_x = (self.pixel_w as i64 * factor).min(i32::MAX as i64);
        let scale_y = (self.pixel_h as i64 * factor).min(i32::MAX as i64);
        let offset_x = ((avail_x - sw * scale_x) / 2).max(0);
        let offset_y = ((avail_y - sh * scale_y) / 2).max(0);

        Layout {
            screen_width: screen_w.max(0),
            screen_height: screen_h.max(0),
            scale_x: scale_x as i32,
            scale_y: scale_y as i32,
            offset_x: offset_x as i32,
            offset_y: offset_y as i32,
        }
    }

    /// Render `frame` into `fb`, resizing it to the viewport.
    ///
    /// Callers can reuse a framebuffer across frames; it is only reallocated
    /// when the terminal size changes.
    pub fn render_into(&self, frame: &Sprite, viewport: Viewport, fb: &mut FrameBuffer) -> Layout {
        fb.resize(viewport.width, viewport.height);
        let layout = self.layout(frame.width(), frame.height(), viewport);

        let color_at = |col: i32, hy: i32| -> Rgb {
            layout
                .pixel_at(col, hy)
                .map(|(x, y)| Rgb::from(frame.get_pixel(x, y)))
                .unwrap_or(Rgb::BLACK)
        };

        for row in 0..viewport.height {
            let hy = row as i32 * 2;
            for col in 0..viewport.width {
                let style = CellStyle {
                    fg: color_at(col as i32, hy),
                    bg: color_at(col as i32, hy + 1),
                };
                fb.set(
                    col,
                    row,
                    Cell {
                        ch: HALF_BLOCK,
                        style,
                    },
                );
            }
        }
        layout
    }
}
