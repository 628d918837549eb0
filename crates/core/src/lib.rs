//! Pixel game engine core - drawing, input, timing and lifecycle
//!
//! Everything here is independent of where frames are shown. A [`Backend`]
//! supplies input and displays finished frames; the engine owns the loop and
//! a [`Context`] that games draw into.
//!
//! # Module Structure
//!
//! - [`engine`]: lifecycle state machine, `construct`/`start`/`run`, the game loop
//! - [`context`]: draw target plus drawing primitives (lines, shapes, text, sprites)
//! - [`sprite`]: RGBA pixel grid and the `.spr` file format
//! - [`font`]: the built-in 8x8 bitmap font
//! - [`input`]: key and mouse button edges per frame
//! - [`backend`]: the presentation trait and a headless implementation
//! - [`config`]: runtime settings from code, environment or JSON
//! - [`rng`]: small deterministic random source for demos
//!
//! # Example
//!
//! ```
//! use tui_pge_core::{Context, Engine, Game};
//! use tui_pge_core::types::{Pixel, RCode};
//!
//! struct Noise(tui_pge_core::SimpleRng);
//!
//! impl Game for Noise {
//!     fn on_update(&mut self, ctx: &mut Context, _elapsed: f32) -> bool {
//!         for y in 0..ctx.screen_height() {
//!             for x in 0..ctx.screen_width() {
//!                 ctx.draw(x, y, self.0.next_pixel());
//!             }
//!         }
//!         ctx.frame_count() < 3
//!     }
//! }
//!
//! let mut engine = Engine::headless("Noise");
//! assert_eq!(engine.construct(32, 24, 4, 4, false, false), RCode::Ok);
//! assert_eq!(engine.start(&mut Noise(tui_pge_core::SimpleRng::new(7))), RCode::Ok);
//! assert_eq!(engine.backend().frames_presented(), 3);
//! ```
//!
//! # Timing
//!
//! `on_update` receives the seconds since the previous frame. With vsync the
//! loop sleeps to hold [`EngineConfig::target_fps`]; `fixed_timestep` replaces
//! wall time entirely. Once a second the backend title becomes
//! `"<name> - FPS: <n>"`.

pub mod backend;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod font;
pub mod input;
pub mod rng;
pub mod sprite;

pub use tui_pge_types as types;

// Re-export commonly used types for convenience
pub use backend::{Backend, EventBatch, HeadlessBackend, OpenFailure, WindowConfig};
pub use config::EngineConfig;
pub use context::Context;
pub use engine::{Engine, EngineState, Game};
pub use error::{Error, Result};
pub use font::load_font;
pub use input::InputState;
pub use rng::SimpleRng;
pub use sprite::Sprite;
