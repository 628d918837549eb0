//! Terminal backend for the pixel game engine.
//!
//! Frames are drawn with the upper-half block character: each terminal cell
//! shows two vertically stacked pixels, the upper one as foreground colour
//! and the lower one as background. Output goes through a cell framebuffer
//! that is diffed against the previous frame, so only changed runs are
//! written to the terminal.
//!
//! - [`fb`]: cell framebuffer and colours
//! - [`pixel_view`]: pure sprite-to-cells mapping, including mouse coordinates
//! - [`renderer`]: terminal setup/teardown and diff encoding
//! - [`backend`]: [`TerminalBackend`], the [`Backend`](crate::core::Backend) implementation

pub mod backend;
pub mod fb;
pub mod pixel_view;
pub mod renderer;

pub use tui_pge_core as core;
pub use tui_pge_types as types;

pub use backend::TerminalBackend;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use pixel_view::{Layout, PixelView, Viewport, HALF_BLOCK};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
