//! The C entry points driven from Rust, on the headless backend.

use std::ffi::{c_void, CString};

use tui_pge::ffi::{pge_draw, pge_run, pge_screen_width, PgeAppRCode, PgeCallbacks, PgeContext};
use tui_pge::types::Pixel;

struct State {
    width: i32,
    drawn: bool,
    frames: u32,
}

extern "C" fn on_update(ctx: *mut PgeContext, user_data: *mut c_void, _elapsed: f32) -> bool {
    let state = unsafe { &mut *(user_data as *mut State) };
    state.frames += 1;
    state.width = unsafe { pge_screen_width(ctx) };
    state.drawn = unsafe {
        pge_draw(ctx, state.width - 1, 0, Pixel::WHITE)
            && !pge_draw(ctx, state.width, 0, Pixel::WHITE)
    };
    false
}

// Only test in this binary; it sets PGE_BACKEND for the process.
#[test]
fn pge_run_on_headless_backend() {
    std::env::set_var("PGE_BACKEND", "headless");

    let name = CString::new("ffi demo").unwrap();
    let mut state = State {
        width: 0,
        drawn: false,
        frames: 0,
    };
    let callbacks = PgeCallbacks {
        on_create: None,
        on_update: Some(on_update),
        on_destroy: None,
    };
    let user_data = &mut state as *mut State as *mut c_void;

    let code = unsafe { pge_run(name.as_ptr(), user_data, callbacks, 48, 32, 2, 2, false, false) };
    assert_eq!(code, PgeAppRCode::Ok);
    assert_eq!(state.frames, 1);
    assert_eq!(state.width, 48);
    assert!(state.drawn);

    let code = unsafe { pge_run(name.as_ptr(), user_data, callbacks, -1, 32, 2, 2, false, false) };
    assert_eq!(code, PgeAppRCode::ConstructFail);
    assert_eq!(state.frames, 1);
}
