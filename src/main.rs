//! Terminal demo runner (default binary).
//!
//! ```text
//! tui-pge [noise|strings|shapes]
//! ```
//!
//! The screen is sized to fill the terminal at one pixel per half cell.
//! Escape or Ctrl+C quits. Set `RUST_LOG` (with stderr redirected) to see
//! engine logs, and `PGE_MAX_FRAMES` for a bounded smoke run.

use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use log::info;

use tui_pge::core::{Context, Engine, EngineConfig, Game, SimpleRng, Sprite};
use tui_pge::term::TerminalBackend;
use tui_pge::types::{Flip, Key, MouseButton, Pixel, PixelMode};

const MAX_SCREEN_W: i32 = 320;
const MAX_SCREEN_H: i32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scene {
    Noise,
    Strings,
    Shapes,
}

impl FromStr for Scene {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "noise" => Ok(Scene::Noise),
            "strings" => Ok(Scene::Strings),
            "shapes" => Ok(Scene::Shapes),
            other => Err(anyhow!("unknown scene {:?} (expected noise, strings or shapes)", other)),
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scene::Noise => "noise",
            Scene::Strings => "strings",
            Scene::Shapes => "shapes",
        })
    }
}

/// Random colour per pixel, every frame.
struct Noise {
    rng: SimpleRng,
}

impl Game for Noise {
    fn on_update(&mut self, ctx: &mut Context, _elapsed: f32) -> bool {
        for y in 0..ctx.screen_height() {
            for x in 0..ctx.screen_width() {
                ctx.draw(x, y, self.rng.next_pixel());
            }
        }
        true
    }
}

/// Text at several scales plus live input readout.
struct Strings {
    clicks: u32,
}

impl Game for Strings {
    fn on_update(&mut self, ctx: &mut Context, elapsed: f32) -> bool {
        if ctx.mouse(MouseButton::Left).pressed {
            self.clicks += 1;
        }

        ctx.clear(Pixel::VERY_DARK_BLUE);
        ctx.draw_string(2, 2, "Hello, terminal!", Pixel::WHITE, 1);
        ctx.draw_string(2, 12, "x2", Pixel::YELLOW, 2);
        ctx.draw_string(2, 30, "blended", Pixel::rgba(255, 64, 64, 128), 1);

        let info = format!(
            "mouse {},{}\nclicks {}\nfps {:.0}",
            ctx.mouse_x(),
            ctx.mouse_y(),
            self.clicks,
            if elapsed > 0.0 { 1.0 / elapsed } else { 0.0 }
        );
        ctx.draw_string(2, 42, &info, Pixel::GREEN, 1);

        if ctx.key(Key::Space).held {
            ctx.draw_string(2, 70, "SPACE", Pixel::MAGENTA, 1);
        }
        true
    }
}

/// Primitives, sprite flipping and alpha blending.
struct Shapes {
    t: f32,
    tile: Sprite,
}

impl Shapes {
    fn new() -> Self {
        let mut tile = Sprite::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                let p = if x <= y { Pixel::CYAN } else { Pixel::BLANK };
                tile.set_pixel(x, y, p);
            }
        }
        Self { t: 0.0, tile }
    }
}

impl Game for Shapes {
    fn on_update(&mut self, ctx: &mut Context, elapsed: f32) -> bool {
        self.t += elapsed;
        let (w, h) = (ctx.screen_width(), ctx.screen_height());
        let (cx, cy) = (w / 2, h / 2);

        ctx.clear(Pixel::BLACK);
        ctx.draw_rect(0, 0, w - 1, h - 1, Pixel::DARK_GREY);

        let r = (cx.min(cy) - 4).max(1);
        let (s, c) = self.t.sin_cos();
        let ex = cx + (c * r as f32) as i32;
        let ey = cy + (s * r as f32) as i32;
        ctx.draw_circle(cx, cy, r, Pixel::GREY, 0xFF);
        ctx.draw_line(cx, cy, ex, ey, Pixel::YELLOW, 0xF0F0_F0F0);
        ctx.fill_circle(ex, ey, 3, Pixel::RED);

        ctx.fill_rect(4, 4, 16, 10, Pixel::DARK_GREEN);
        ctx.draw_triangle(4, h - 4, 24, h - 24, 44, h - 4, Pixel::MAGENTA);

        ctx.set_pixel_mode(PixelMode::Mask);
        ctx.draw_sprite(w - 40, 4, &self.tile, 2, Flip::None);
        ctx.draw_sprite(w - 20, 4, &self.tile, 2, Flip::Horiz);

        ctx.set_pixel_mode(PixelMode::Alpha);
        ctx.set_pixel_blend(0.5);
        ctx.fill_rect(cx - 10, cy - 6, 20, 12, Pixel::BLUE);
        ctx.set_pixel_blend(1.0);
        ctx.set_pixel_mode(PixelMode::Normal);
        true
    }
}

fn screen_size() -> (i32, i32) {
    let (cols, rows) = crossterm::terminal::size().unwrap_or((80, 24));
    let w = (cols as i32).clamp(16, MAX_SCREEN_W);
    let h = (rows as i32 * 2).clamp(16, MAX_SCREEN_H);
    (w, h)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let scene: Scene = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => Scene::Noise,
    };
    let config = EngineConfig::from_env()?;
    let (w, h) = screen_size();
    info!("running {} at {}x{}", scene, w, h);

    let mut game: Box<dyn Game> = match scene {
        Scene::Noise => Box::new(Noise {
            rng: SimpleRng::from_time(),
        }),
        Scene::Strings => Box::new(Strings { clicks: 0 }),
        Scene::Shapes => Box::new(Shapes::new()),
    };

    let mut engine =
        Engine::new(format!("tui-pge {}", scene), TerminalBackend::new()).with_config(config);
    let code = engine.run(game.as_mut(), w, h, 1, 1, false, true);
    if !code.is_ok() {
        bail!("{} demo failed: {}", scene, code);
    }
    Ok(())
}
