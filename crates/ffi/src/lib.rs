//! Flat C ABI over the engine.
//!
//! C callers hold an opaque `PgeEngine*`, supply three hooks plus a user-data
//! pointer, and draw through the `PgeContext*` each hook receives. The
//! user-data pointer is never dereferenced; it comes back unchanged in every
//! callback.
//!
//! ```c
//! PgeEngine *e = pge_create("Demo");
//! if (pge_construct(e, 160, 100, 4, 4, false, false) == PGE_OK)
//!     pge_start(e, &state, callbacks);
//! pge_destroy(e);
//! ```
//!
//! The backend is the terminal unless `PGE_BACKEND=headless`. Settings come
//! from the `PGE_*` environment variables read by
//! [`EngineConfig::from_env`]. See `include/tui_pge.h` for the C declarations.

use std::cell::RefCell;
use std::ffi::{c_char, c_void, CStr};
use std::panic::{catch_unwind, AssertUnwindSafe};

use log::{error, warn};

use tui_pge_core::{Backend, Context, Engine, EngineConfig, Game, HeadlessBackend, SimpleRng};
use tui_pge_term::TerminalBackend;
use tui_pge_types::{Phase, Pixel, RCode, ResultCode};

/// Engine handle given to C.
pub type PgeEngine = Engine<Box<dyn Backend>>;

/// Drawing context handed to callbacks.
pub type PgeContext = Context;

/// Same layout as `Pixel`: four bytes r, g, b, a.
pub type PgePixel = Pixel;

/// Result of a single construct or start call.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgeRCode {
    Fail = 0,
    Ok = 1,
    NoFile = -1,
}

impl From<RCode> for PgeRCode {
    fn from(code: RCode) -> Self {
        match code {
            RCode::Fail => PgeRCode::Fail,
            RCode::Ok => PgeRCode::Ok,
            RCode::NoFile => PgeRCode::NoFile,
        }
    }
}

/// Result of `pge_run`, naming the phase that failed.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgeAppRCode {
    ConstructFail = 0,
    ConstructNoFile = 1,
    StartFail = 2,
    StartNoFile = 3,
    Ok = 4,
}

impl From<ResultCode> for PgeAppRCode {
    fn from(code: ResultCode) -> Self {
        match code {
            ResultCode::Ok => PgeAppRCode::Ok,
            ResultCode::Fail(Phase::Construct) => PgeAppRCode::ConstructFail,
            ResultCode::NoFile(Phase::Construct) => PgeAppRCode::ConstructNoFile,
            ResultCode::Fail(Phase::Start) => PgeAppRCode::StartFail,
            ResultCode::NoFile(Phase::Start) => PgeAppRCode::StartNoFile,
        }
    }
}

pub type PgeHookFn = extern "C" fn(ctx: *mut PgeContext, user_data: *mut c_void) -> bool;
pub type PgeUpdateFn =
    extern "C" fn(ctx: *mut PgeContext, user_data: *mut c_void, elapsed_time: f32) -> bool;

/// Lifecycle hooks. A NULL hook behaves as one returning true.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct PgeCallbacks {
    pub on_create: Option<PgeHookFn>,
    pub on_update: Option<PgeUpdateFn>,
    pub on_destroy: Option<PgeHookFn>,
}

/// Routes engine hooks to C function pointers.
struct FfiGame {
    callbacks: PgeCallbacks,
    user_data: *mut c_void,
}

impl Game for FfiGame {
    fn on_create(&mut self, ctx: &mut Context) -> bool {
        self.callbacks.on_create.map_or(true, |f| f(ctx, self.user_data))
    }

    fn on_update(&mut self, ctx: &mut Context, elapsed_time: f32) -> bool {
        self.callbacks.on_update.map_or(true, |f| f(ctx, self.user_data, elapsed_time))
    }

    fn on_destroy(&mut self, ctx: &mut Context) -> bool {
        self.callbacks.on_destroy.map_or(true, |f| f(ctx, self.user_data))
    }
}

thread_local! {
    static RNG: RefCell<SimpleRng> = RefCell::new(SimpleRng::from_time());
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("off");
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn backend_from_env() -> Box<dyn Backend> {
    match std::env::var("PGE_BACKEND") {
        Ok(v) if v.eq_ignore_ascii_case("headless") => Box::new(HeadlessBackend::new()),
        _ => Box::new(TerminalBackend::new()),
    }
}

fn config_from_env() -> EngineConfig {
    EngineConfig::from_env().unwrap_or_else(|e| {
        warn!("ignoring engine configuration: {}", e);
        EngineConfig::default()
    })
}

/// Build an engine around `backend`. Shared by `pge_create` and `pge_run`.
pub fn new_engine(name: &str, backend: Box<dyn Backend>, config: EngineConfig) -> PgeEngine {
    Engine::new(name, backend).with_config(config)
}

/// # Safety
///
/// `name` is NULL or a valid NUL-terminated string.
unsafe fn name_from_ptr(name: *const c_char) -> String {
    if name.is_null() {
        return String::new();
    }
    CStr::from_ptr(name).to_string_lossy().into_owned()
}

/// Run `f`, turning a panic into `fallback`.
fn guarded<T>(what: &str, fallback: T, f: impl FnOnce() -> T) -> T {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(v) => v,
        Err(_) => {
            error!("panic in {}", what);
            fallback
        }
    }
}

/// Construct and start `engine`, reporting the failing phase.
#[allow(clippy::too_many_arguments)]
pub fn run_engine(
    engine: &mut PgeEngine,
    user_data: *mut c_void,
    callbacks: PgeCallbacks,
    screen_w: i32,
    screen_h: i32,
    pixel_w: i32,
    pixel_h: i32,
    full_screen: bool,
    vsync: bool,
) -> PgeAppRCode {
    let mut game = FfiGame {
        callbacks,
        user_data,
    };
    run_phases(
        engine,
        &mut game,
        screen_w,
        screen_h,
        pixel_w,
        pixel_h,
        full_screen,
        vsync,
    )
    .into()
}

/// `Engine::run` with each phase guarded on its own, so a panic is
/// reported against the phase it happened in.
#[allow(clippy::too_many_arguments)]
fn run_phases<G: Game + ?Sized>(
    engine: &mut PgeEngine,
    game: &mut G,
    screen_w: i32,
    screen_h: i32,
    pixel_w: i32,
    pixel_h: i32,
    full_screen: bool,
    vsync: bool,
) -> ResultCode {
    let code = guarded("pge_run construct", RCode::Fail, || {
        engine.construct(screen_w, screen_h, pixel_w, pixel_h, full_screen, vsync)
    });
    if !code.is_ok() {
        return ResultCode::from_phase(Phase::Construct, code);
    }
    let code = guarded("pge_run start", RCode::Fail, || engine.start(game));
    ResultCode::from_phase(Phase::Start, code)
}

/// Create an engine. Never returns NULL; free it with `pge_destroy`.
///
/// # Safety
///
/// `name` is NULL or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn pge_create(name: *const c_char) -> *mut PgeEngine {
    init_logging();
    let name = name_from_ptr(name);
    let engine = new_engine(&name, backend_from_env(), config_from_env());
    Box::into_raw(Box::new(engine))
}

/// # Safety
///
/// `engine` is NULL or a pointer returned by `pge_create` that has not been destroyed.
#[no_mangle]
pub unsafe extern "C" fn pge_construct(
    engine: *mut PgeEngine,
    screen_w: i32,
    screen_h: i32,
    pixel_w: i32,
    pixel_h: i32,
    full_screen: bool,
    vsync: bool,
) -> PgeRCode {
    let Some(engine) = engine.as_mut() else {
        warn!("pge_construct: NULL engine");
        return PgeRCode::Fail;
    };
    guarded("pge_construct", RCode::Fail, || {
        engine.construct(screen_w, screen_h, pixel_w, pixel_h, full_screen, vsync)
    })
    .into()
}

/// Run the game loop until it ends. Blocks the calling thread.
///
/// # Safety
///
/// `engine` is NULL or a live pointer from `pge_create`. The callbacks must
/// not call `pge_start`, `pge_construct` or `pge_destroy` on the same engine.
#[no_mangle]
pub unsafe extern "C" fn pge_start(
    engine: *mut PgeEngine,
    user_data: *mut c_void,
    callbacks: PgeCallbacks,
) -> PgeRCode {
    let Some(engine) = engine.as_mut() else {
        warn!("pge_start: NULL engine");
        return PgeRCode::Fail;
    };
    let mut game = FfiGame {
        callbacks,
        user_data,
    };
    guarded("pge_start", RCode::Fail, || engine.start(&mut game)).into()
}

/// Create, construct, start and destroy an engine in one call.
///
/// # Safety
///
/// `name` is NULL or a valid NUL-terminated string.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn pge_run(
    name: *const c_char,
    user_data: *mut c_void,
    callbacks: PgeCallbacks,
    screen_w: i32,
    screen_h: i32,
    pixel_w: i32,
    pixel_h: i32,
    full_screen: bool,
    vsync: bool,
) -> PgeAppRCode {
    init_logging();
    let name = name_from_ptr(name);
    let mut engine = new_engine(&name, backend_from_env(), config_from_env());
    run_engine(
        &mut engine,
        user_data,
        callbacks,
        screen_w,
        screen_h,
        pixel_w,
        pixel_h,
        full_screen,
        vsync,
    )
}

/// Draw one pixel. False when out of bounds or `ctx` is NULL.
///
/// # Safety
///
/// `ctx` is NULL or the context pointer passed to the current callback.
#[no_mangle]
pub unsafe extern "C" fn pge_draw(ctx: *mut PgeContext, x: i32, y: i32, p: PgePixel) -> bool {
    match ctx.as_mut() {
        Some(ctx) => ctx.draw(x, y, p),
        None => false,
    }
}

/// # Safety
///
/// `ctx` is NULL or the context pointer passed to the current callback.
#[no_mangle]
pub unsafe extern "C" fn pge_screen_width(ctx: *const PgeContext) -> i32 {
    ctx.as_ref().map_or(0, |c| c.screen_width())
}

/// # Safety
///
/// `ctx` is NULL or the context pointer passed to the current callback.
#[no_mangle]
pub unsafe extern "C" fn pge_screen_height(ctx: *const PgeContext) -> i32 {
    ctx.as_ref().map_or(0, |c| c.screen_height())
}

/// Free an engine. NULL is ignored.
///
/// # Safety
///
/// `engine` is NULL or a pointer from `pge_create`, destroyed at most once
/// and not while its loop is running.
#[no_mangle]
pub unsafe extern "C" fn pge_destroy(engine: *mut PgeEngine) {
    if engine.is_null() {
        return;
    }
    drop(Box::from_raw(engine));
}

/// Non-negative pseudo-random integer.
#[no_mangle]
pub extern "C" fn pge_rand() -> i32 {
    RNG.with(|rng| rng.borrow_mut().next_i32())
}
