//! Terminal input module (engine-facing).
//!
//! Translates `crossterm` events into engine [`InputEvent`](crate::types::InputEvent)s.
//! Most terminals only report key presses, so [`InputHandler`] synthesizes the
//! matching key-up once a key has not been seen for a short timeout.

pub mod handler;
pub mod map;

pub use tui_pge_types as types;

pub use handler::InputHandler;
pub use map::{map_key_code, map_key_event, map_mouse_event, should_quit, MappedEvents};
