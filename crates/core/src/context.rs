//! Drawing context handed to game hooks.
//!
//! The context owns the draw target (the screen sprite the backend presents),
//! the font sheet, the current pixel mode and the frame's input state. All
//! coordinates are screen pixels; anything outside the draw target is
//! clipped.

use crate::font::{self, load_font};
use crate::input::InputState;
use crate::sprite::Sprite;
use crate::types::{Flip, HwButton, Key, MouseButton, Pixel, PixelMode, GLYPH_SIZE};

/// How far outside the draw target a line endpoint may lie before the
/// line is clipped instead of walked pixel by pixel.
const LINE_CLIP_MARGIN: i64 = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CircleReach {
    Outside,
    Edge,
    Covers,
}

pub struct Context {
    draw_target: Sprite,
    font: Sprite,
    pixel_mode: PixelMode,
    blend_factor: f32,
    input: InputState,
    elapsed_time: f32,
    frame_count: u64,
}

impl Context {
    /// Creates a context for a `width` x `height` screen using the built-in font.
    pub fn new(width: i32, height: i32) -> Self {
        Self::with_font(width, height, load_font())
    }

    pub fn with_font(width: i32, height: i32, font: Sprite) -> Self {
        Self {
            draw_target: Sprite::new(width, height),
            font,
            pixel_mode: PixelMode::Normal,
            blend_factor: 1.0,
            input: InputState::new(),
            elapsed_time: 0.0,
            frame_count: 0,
        }
    }

    #[inline]
    pub fn screen_width(&self) -> i32 {
        self.draw_target.width()
    }

    #[inline]
    pub fn screen_height(&self) -> i32 {
        self.draw_target.height()
    }

    #[inline]
    pub fn draw_target(&self) -> &Sprite {
        &self.draw_target
    }

    #[inline]
    pub fn draw_target_mut(&mut self) -> &mut Sprite {
        &mut self.draw_target
    }

    #[inline]
    pub fn pixel_mode(&self) -> PixelMode {
        self.pixel_mode
    }

    #[inline]
    pub fn set_pixel_mode(&mut self, mode: PixelMode) {
        self.pixel_mode = mode;
    }

    #[inline]
    pub fn blend_factor(&self) -> f32 {
        self.blend_factor
    }

    /// Sets the alpha blend factor, clamped to `[0, 1]`.
    pub fn set_pixel_blend(&mut self, blend: f32) {
        self.blend_factor = if blend.is_nan() { 1.0 } else { blend.clamp(0.0, 1.0) };
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    #[inline]
    pub fn key(&self, key: Key) -> HwButton {
        self.input.key(key)
    }

    #[inline]
    pub fn mouse(&self, btn: MouseButton) -> HwButton {
        self.input.mouse(btn)
    }

    #[inline]
    pub fn mouse_x(&self) -> i32 {
        self.input.mouse_x()
    }

    #[inline]
    pub fn mouse_y(&self) -> i32 {
        self.input.mouse_y()
    }

    #[inline]
    pub fn mouse_wheel(&self) -> i32 {
        self.input.mouse_wheel()
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    /// Frames started since the loop began, including the current one.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub(crate) fn begin_frame(&mut self, elapsed_time: f32) {
        self.elapsed_time = elapsed_time;
        self.frame_count += 1;
    }

    /// Writes one pixel using the current pixel mode.
    ///
    /// Returns false only when `(x, y)` is outside the draw target.
    pub fn draw(&mut self, x: i32, y: i32, p: Pixel) -> bool {
        if x < 0 || y < 0 || x >= self.screen_width() || y >= self.screen_height() {
            return false;
        }

        match self.pixel_mode {
            PixelMode::Normal => self.draw_target.set_pixel(x, y, p),
            PixelMode::Mask => {
                if p.is_opaque() {
                    self.draw_target.set_pixel(x, y, p);
                }
                true
            }
            PixelMode::Alpha => {
                let d = self.draw_target.get_pixel(x, y);
                let a = (p.a as f32 / 255.0) * self.blend_factor;
                let c = 1.0 - a;
                let r = a * p.r as f32 + c * d.r as f32;
                let g = a * p.g as f32 + c * d.g as f32;
                let b = a * p.b as f32 + c * d.b as f32;
                self.draw_target.set_pixel(x, y, Pixel::rgb(r as u8, g as u8, b as u8))
            }
        }
    }

    /// Fills the whole draw target, ignoring the pixel mode.
    pub fn clear(&mut self, p: Pixel) {
        self.draw_target.fill(p);
    }

    /// Draws a line; bit `n` of the rotating `pattern` decides whether the
    /// `n`-th pixel is drawn.
    ///
    /// Lines reaching far outside the draw target are clipped to it first;
    /// the pattern then starts at the clipped end.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, p: Pixel, pattern: u32) {
        let (x1, y1, x2, y2) = (x1 as i64, y1 as i64, x2 as i64, y2 as i64);
        let (x1, y1, x2, y2) = if self.near_target(x1, y1) && self.near_target(x2, y2) {
            (x1, y1, x2, y2)
        } else {
            match self.clip_line(x1, y1, x2, y2) {
                Some(clipped) => clipped,
                None => return,
            }
        };

        let mut pattern = pattern;
        let mut rol = || {
            pattern = pattern.rotate_left(1);
            pattern & 1 != 0
        };

        let dx = x2 - x1;
        let dy = y2 - y1;

        if dx == 0 {
            let (ys, ye) = if y2 < y1 { (y2, y1) } else { (y1, y2) };
            for y in ys..=ye {
                if rol() {
                    self.plot(x1, y, p);
                }
            }
            return;
        }

        if dy == 0 {
            let (xs, xe) = if x2 < x1 { (x2, x1) } else { (x1, x2) };
            for x in xs..=xe {
                if rol() {
                    self.plot(x, y1, p);
                }
            }
            return;
        }

        let dx1 = dx.abs();
        let dy1 = dy.abs();
        let mut px = 2 * dy1 - dx1;
        let mut py = 2 * dx1 - dy1;
        let same_sign = (dx < 0 && dy < 0) || (dx > 0 && dy > 0);

        if dy1 <= dx1 {
            let (mut x, mut y, xe) = if dx >= 0 { (x1, y1, x2) } else { (x2, y2, x1) };
            if rol() {
                self.plot(x, y, p);
            }
            while x < xe {
                x += 1;
                if px < 0 {
                    px += 2 * dy1;
                } else {
                    y += if same_sign { 1 } else { -1 };
                    px += 2 * (dy1 - dx1);
                }
                if rol() {
                    self.plot(x, y, p);
                }
            }
        } else {
            let (mut x, mut y, ye) = if dy >= 0 { (x1, y1, y2) } else { (x2, y2, y1) };
            if rol() {
                self.plot(x, y, p);
            }
            while y < ye {
                y += 1;
                if py <= 0 {
                    py += 2 * dx1;
                } else {
                    x += if same_sign { 1 } else { -1 };
                    py += 2 * (dx1 - dy1);
                }
                if rol() {
                    self.plot(x, y, p);
                }
            }
        }
    }

    pub fn draw_line_solid(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, p: Pixel) {
        self.draw_line(x1, y1, x2, y2, p, u32::MAX);
    }

    /// `draw` for wide coordinates; anything outside `i32` is off the target.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, p: Pixel) -> bool {
        match (i32::try_from(x), i32::try_from(y)) {
            (Ok(x), Ok(y)) => self.draw(x, y, p),
            _ => false,
        }
    }

    fn near_target(&self, x: i64, y: i64) -> bool {
        let w = self.screen_width() as i64;
        let h = self.screen_height() as i64;
        (-LINE_CLIP_MARGIN..w + LINE_CLIP_MARGIN).contains(&x)
            && (-LINE_CLIP_MARGIN..h + LINE_CLIP_MARGIN).contains(&y)
    }

    /// Liang-Barsky clip against the draw target grown by one pixel.
    fn clip_line(&self, x1: i64, y1: i64, x2: i64, y2: i64) -> Option<(i64, i64, i64, i64)> {
        let (xmin, ymin) = (-1.0, -1.0);
        let xmax = self.screen_width() as f64;
        let ymax = self.screen_height() as f64;
        let (fx, fy) = (x1 as f64, y1 as f64);
        let dx = (x2 - x1) as f64;
        let dy = (y2 - y1) as f64;

        let mut t0 = 0.0f64;
        let mut t1 = 1.0f64;
        for (q, d) in [(fx - xmin, -dx), (xmax - fx, dx), (fy - ymin, -dy), (ymax - fy, dy)] {
            if d == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / d;
            if d < 0.0 {
                t0 = t0.max(t);
            } else {
                t1 = t1.min(t);
            }
            if t0 > t1 {
                return None;
            }
        }

        Some((
            (fx + t0 * dx).round() as i64,
            (fy + t0 * dy).round() as i64,
            (fx + t1 * dx).round() as i64,
            (fy + t1 * dy).round() as i64,
        ))
    }

    /// Draws the outline of a rectangle spanning `w + 1` by `h + 1` pixels.
    pub fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32, p: Pixel) {
        let x2 = x.saturating_add(w);
        let y2 = y.saturating_add(h);
        self.draw_line_solid(x, y, x2, y, p);
        self.draw_line_solid(x2, y, x2, y2, p);
        self.draw_line_solid(x2, y2, x, y2, p);
        self.draw_line_solid(x, y2, x, y, p);
    }

    /// Fills a `w` by `h` rectangle, clipped to the draw target.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, p: Pixel) {
        let sw = self.screen_width();
        let sh = self.screen_height();
        let x1 = x.clamp(0, sw);
        let y1 = y.clamp(0, sh);
        let x2 = x.saturating_add(w).clamp(0, sw);
        let y2 = y.saturating_add(h).clamp(0, sh);

        for py in y1..y2 {
            for px in x1..x2 {
                self.draw(px, py, p);
            }
        }
    }

    /// Where a circle at (`x`, `y`) can touch the draw target.
    fn circle_reach(&self, x: i64, y: i64, r: i64) -> CircleReach {
        let w = self.screen_width() as i64;
        let h = self.screen_height() as i64;
        if r < 0 || x + r < 0 || y + r < 0 || x - r > w || y - r > h {
            return CircleReach::Outside;
        }

        let far_x = x.abs().max((x - (w - 1)).abs()) as f64;
        let far_y = y.abs().max((y - (h - 1)).abs()) as f64;
        let inner = (r - 1) as f64;
        if inner > 0.0 && far_x * far_x + far_y * far_y < inner * inner {
            CircleReach::Covers
        } else {
            CircleReach::Edge
        }
    }

    /// Draws a circle outline. Each bit of `mask` enables one octant,
    /// clockwise from the top.
    pub fn draw_circle(&mut self, x: i32, y: i32, radius: i32, p: Pixel, mask: u8) {
        let (x, y, radius) = (x as i64, y as i64, radius as i64);
        if self.circle_reach(x, y, radius) != CircleReach::Edge {
            return;
        }

        if radius == 0 {
            self.plot(x, y, p);
            return;
        }

        let mut x0 = 0;
        let mut y0 = radius;
        let mut d = 3 - 2 * radius;

        while y0 >= x0 {
            if mask & 0x01 != 0 {
                self.plot(x + x0, y - y0, p);
            }
            if mask & 0x04 != 0 {
                self.plot(x + y0, y + x0, p);
            }
            if mask & 0x10 != 0 {
                self.plot(x - x0, y + y0, p);
            }
            if mask & 0x40 != 0 {
                self.plot(x - y0, y - x0, p);
            }
            if x0 != 0 && x0 != y0 {
                if mask & 0x02 != 0 {
                    self.plot(x + y0, y - x0, p);
                }
                if mask & 0x08 != 0 {
                    self.plot(x + x0, y + y0, p);
                }
                if mask & 0x20 != 0 {
                    self.plot(x - y0, y + x0, p);
                }
                if mask & 0x80 != 0 {
                    self.plot(x - x0, y - y0, p);
                }
            }

            if d < 0 {
                d += 4 * x0 + 6;
                x0 += 1;
            } else {
                d += 4 * (x0 - y0) + 10;
                x0 += 1;
                y0 -= 1;
            }
        }
    }

    pub fn fill_circle(&mut self, x: i32, y: i32, radius: i32, p: Pixel) {
        let (x, y, radius) = (x as i64, y as i64, radius as i64);
        match self.circle_reach(x, y, radius) {
            CircleReach::Outside => return,
            CircleReach::Covers => {
                self.fill_rect(0, 0, self.screen_width(), self.screen_height(), p);
                return;
            }
            CircleReach::Edge => {}
        }

        if radius == 0 {
            self.plot(x, y, p);
            return;
        }

        let mut x0 = 0;
        let mut y0 = radius;
        let mut d = 3 - 2 * radius;

        while y0 >= x0 {
            self.span(x - y0, x + y0, y - x0, p);
            if x0 > 0 {
                self.span(x - y0, x + y0, y + x0, p);
            }

            if d < 0 {
                d += 4 * x0 + 6;
                x0 += 1;
            } else {
                if x0 != y0 {
                    self.span(x - x0, x + x0, y - y0, p);
                    self.span(x - x0, x + x0, y + y0, p);
                }
                d += 4 * (x0 - y0) + 10;
                x0 += 1;
                y0 -= 1;
            }
        }
    }

    fn span(&mut self, sx: i64, ex: i64, y: i64, p: Pixel) {
        if y < 0 || y >= self.screen_height() as i64 {
            return;
        }
        let sx = sx.max(0);
        let ex = ex.min(self.screen_width() as i64 - 1);
        for x in sx..=ex {
            self.plot(x, y, p);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_triangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        x3: i32,
        y3: i32,
        p: Pixel,
    ) {
        self.draw_line_solid(x1, y1, x2, y2, p);
        self.draw_line_solid(x2, y2, x3, y3, p);
        self.draw_line_solid(x3, y3, x1, y1, p);
    }

    /// Draws text with the 8x8 font, `scale` pixels per font pixel.
    ///
    /// `\n` starts a new line; characters without a glyph are skipped but
    /// still advance the cursor. Opaque colours draw in mask mode,
    /// translucent ones blend; the previous pixel mode is restored.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str, col: Pixel, scale: u32) {
        let scale = scale.max(1) as i64;
        let glyph = GLYPH_SIZE as i64;
        let (x, y) = (x as i64, y as i64);
        let mut sx = 0i64;
        let mut sy = 0i64;

        let mode = self.pixel_mode;
        self.pixel_mode = if col.is_opaque() { PixelMode::Mask } else { PixelMode::Alpha };

        for c in text.chars() {
            if c == '\n' {
                sx = 0;
                sy += glyph * scale;
                continue;
            }

            if let Some((ox, oy)) = font::glyph_origin(c) {
                for i in 0..GLYPH_SIZE {
                    for j in 0..GLYPH_SIZE {
                        if self.font.get_pixel(ox + i, oy + j).r == 0 {
                            continue;
                        }
                        for is in 0..scale {
                            for js in 0..scale {
                                let px = x + sx + i as i64 * scale + is;
                                self.plot(px, y + sy + j as i64 * scale + js, col);
                            }
                        }
                    }
                }
            }

            sx += glyph * scale;
        }

        self.pixel_mode = mode;
    }

    /// Size in pixels `text` would occupy at scale 1.
    pub fn string_size(text: &str) -> (i32, i32) {
        let mut width = 0;
        let mut line = 0;
        let mut lines = 1;
        for c in text.chars() {
            if c == '\n' {
                lines += 1;
                line = 0;
            } else {
                line += 1;
                width = width.max(line);
            }
        }
        (width * GLYPH_SIZE, lines * GLYPH_SIZE)
    }

    pub fn draw_sprite(&mut self, x: i32, y: i32, sprite: &Sprite, scale: u32, flip: Flip) {
        self.draw_partial_sprite(x, y, sprite, 0, 0, sprite.width(), sprite.height(), scale, flip);
    }

    /// Draws the `w` x `h` region of `sprite` starting at `(ox, oy)`.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_partial_sprite(
        &mut self,
        x: i32,
        y: i32,
        sprite: &Sprite,
        ox: i32,
        oy: i32,
        w: i32,
        h: i32,
        scale: u32,
        flip: Flip,
    ) {
        let scale = scale.max(1) as i64;
        let (x, y) = (x as i64, y as i64);
        let (fxs, fxm) = if flip.horizontal() { (w - 1, -1) } else { (0, 1) };
        let (fys, fym) = if flip.vertical() { (h - 1, -1) } else { (0, 1) };

        let mut fx = fxs;
        for i in 0..w {
            let mut fy = fys;
            for j in 0..h {
                let p = sprite.get_pixel(fx + ox, fy + oy);
                for is in 0..scale {
                    for js in 0..scale {
                        self.plot(x + i as i64 * scale + is, y + j as i64 * scale + js, p);
                    }
                }
                fy += fym;
            }
            fx += fxm;
        }
    }
}
