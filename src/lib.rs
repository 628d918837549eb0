//! Terminal pixel game engine (workspace facade crate).
//!
//! Re-exports the crates under `crates/` as `tui_pge::{core,input,term,ffi,types}`.

pub use tui_pge_core as core;
pub use tui_pge_ffi as ffi;
pub use tui_pge_input as input;
pub use tui_pge_term as term;
pub use tui_pge_types as types;
