//! Engine: lifecycle, state machine and the blocking game loop.
//!
//! ```text
//! Uninitialized --construct--> Constructed --start--> Running --> Terminated
//!        \                          \
//!         +------ any failure -------+--> Failed
//! ```
//!
//! The loop runs on the thread that calls [`Engine::start`]. Each frame it
//! polls the backend, updates input, calls [`Game::on_update`] and presents
//! the draw target. A hook returning `false`, a close request, or Escape
//! (when enabled) ends the loop; [`Game::on_destroy`] can veto the shutdown
//! by returning `false`.

use std::time::{Duration, Instant};

use log::{debug, error, info, warn};

use crate::backend::{Backend, EventBatch, HeadlessBackend, WindowConfig};
use crate::config::EngineConfig;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::font::{is_font_sheet, load_font};
use crate::sprite::Sprite;
use crate::types::{Key, Phase, Pixel, RCode, ResultCode, DEFAULT_APP_NAME, FPS_WINDOW_SECS};

/// Lifecycle hooks supplied by the application.
///
/// Each hook returns whether the engine should keep running.
pub trait Game {
    /// Called once before the first frame. Returning `false` skips the loop.
    fn on_create(&mut self, _ctx: &mut Context) -> bool {
        true
    }

    /// Called once per frame with the seconds elapsed since the previous frame.
    fn on_update(&mut self, ctx: &mut Context, elapsed_time: f32) -> bool;

    /// Called when the loop is about to end. Returning `false` resumes it.
    fn on_destroy(&mut self, _ctx: &mut Context) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Constructed,
    Running,
    Terminated,
    Failed,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Uninitialized => "uninitialized",
            EngineState::Constructed => "constructed",
            EngineState::Running => "running",
            EngineState::Terminated => "terminated",
            EngineState::Failed => "failed",
        }
    }
}

pub struct Engine<B: Backend> {
    name: String,
    backend: B,
    config: EngineConfig,
    state: EngineState,
    window: Option<WindowConfig>,
    context: Option<Context>,
}

impl Engine<HeadlessBackend> {
    pub fn headless(name: impl Into<String>) -> Self {
        Self::new(name, HeadlessBackend::new())
    }
}

impl<B: Backend> Engine<B> {
    /// Creates an engine showing `name` as its title. An empty name falls
    /// back to the default application name.
    pub fn new(name: impl Into<String>, backend: B) -> Self {
        let mut engine = Self {
            name: String::new(),
            backend,
            config: EngineConfig::default(),
            state: EngineState::Uninitialized,
            window: None,
            context: None,
        };
        engine.set_name(name);
        engine
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.is_empty() { DEFAULT_APP_NAME.to_string() } else { name };
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn window(&self) -> Option<&WindowConfig> {
        self.window.as_ref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Drawing context; `None` until `construct` succeeds.
    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut Context> {
        self.context.as_mut()
    }

    /// Sets up the screen: `screen_w` x `screen_h` pixels, each shown as
    /// `pixel_w` x `pixel_h` backend units.
    pub fn construct(
        &mut self,
        screen_w: i32,
        screen_h: i32,
        pixel_w: i32,
        pixel_h: i32,
        full_screen: bool,
        vsync: bool,
    ) -> RCode {
        let window = WindowConfig {
            screen_width: screen_w,
            screen_height: screen_h,
            pixel_width: pixel_w,
            pixel_height: pixel_h,
            full_screen,
            vsync,
        };

        match self.try_construct(window) {
            Ok(()) => {
                info!(
                    "{}: constructed {}x{} screen, {}x{} pixels",
                    self.name, screen_w, screen_h, pixel_w, pixel_h
                );
                self.state = EngineState::Constructed;
                RCode::Ok
            }
            Err(e) => self.fail(Phase::Construct, e),
        }
    }

    fn try_construct(&mut self, window: WindowConfig) -> Result<()> {
        if self.state != EngineState::Uninitialized {
            return Err(Error::InvalidState {
                op: "construct",
                state: self.state.as_str(),
            });
        }

        let WindowConfig {
            screen_width: sw,
            screen_height: sh,
            pixel_width: pw,
            pixel_height: ph,
            ..
        } = window;

        if sw <= 0 || sh <= 0 || sw.checked_mul(sh).is_none() {
            return Err(Error::InvalidScreenSize(sw, sh));
        }
        if pw <= 0 || ph <= 0 || sw.checked_mul(pw).is_none() || sh.checked_mul(ph).is_none() {
            return Err(Error::InvalidPixelSize(pw, ph));
        }

        let font = match &self.config.font_path {
            Some(path) => {
                let sheet = Sprite::load_from_file(path)?;
                if !is_font_sheet(&sheet) {
                    return Err(Error::InvalidSprite(format!(
                        "font sheet {} is {}x{}",
                        path.display(),
                        sheet.width(),
                        sheet.height()
                    )));
                }
                sheet
            }
            None => load_font(),
        };

        self.context = Some(Context::with_font(sw, sh, font));
        self.window = Some(window);
        Ok(())
    }

    /// Runs the game loop until it ends. Blocks the calling thread.
    pub fn start<G: Game + ?Sized>(&mut self, game: &mut G) -> RCode {
        match self.try_start(game) {
            Ok(()) => RCode::Ok,
            Err(e) => self.fail(Phase::Start, e),
        }
    }

    fn try_start<G: Game + ?Sized>(&mut self, game: &mut G) -> Result<()> {
        let (window, context) = match (self.state, self.window, self.context.as_mut()) {
            (EngineState::Constructed, Some(window), Some(context)) => (window, context),
            _ => {
                return Err(Error::InvalidState {
                    op: "start",
                    state: self.state.as_str(),
                })
            }
        };

        self.backend.open(&self.name, &window)?;
        self.state = EngineState::Running;
        info!("{}: loop started", self.name);

        let result = run_loop(&self.name, &self.config, &window, &mut self.backend, context, game);
        let closed = self.backend.close();
        self.state = EngineState::Terminated;

        let frames = result?;
        closed?;
        info!("{}: loop ended after {} frames", self.name, frames);
        Ok(())
    }

    /// `construct` followed by `start`, reporting which phase failed.
    #[allow(clippy::too_many_arguments)]
    pub fn run<G: Game + ?Sized>(
        &mut self,
        game: &mut G,
        screen_w: i32,
        screen_h: i32,
        pixel_w: i32,
        pixel_h: i32,
        full_screen: bool,
        vsync: bool,
    ) -> ResultCode {
        let code = self.construct(screen_w, screen_h, pixel_w, pixel_h, full_screen, vsync);
        if !code.is_ok() {
            return ResultCode::from_phase(Phase::Construct, code);
        }
        ResultCode::from_phase(Phase::Start, self.start(game))
    }

    /// Writes one pixel to the draw target.
    ///
    /// Drawing is allowed once constructed and while running, so a first
    /// frame can be prepared before `start`. Returns false when out of
    /// bounds, and in any other state (logged).
    pub fn draw(&mut self, x: i32, y: i32, p: Pixel) -> bool {
        let drawable = matches!(self.state, EngineState::Constructed | EngineState::Running);
        match self.context.as_mut() {
            Some(ctx) if drawable => ctx.draw(x, y, p),
            _ => {
                warn!("{}: draw called while {}", self.name, self.state.as_str());
                false
            }
        }
    }

    /// Draw target width, or 0 before `construct`.
    pub fn screen_width(&self) -> i32 {
        self.context.as_ref().map(|c| c.screen_width()).unwrap_or(0)
    }

    /// Draw target height, or 0 before `construct`.
    pub fn screen_height(&self) -> i32 {
        self.context.as_ref().map(|c| c.screen_height()).unwrap_or(0)
    }

    fn fail(&mut self, phase: Phase, e: Error) -> RCode {
        let code = e.rcode();
        error!("{}: {} failed ({}): {}", self.name, phase.as_str(), code.as_str(), e);
        self.state = EngineState::Failed;
        code
    }
}

/// Wall-clock or fixed frame timing plus optional vsync pacing.
struct FrameClock {
    last: Instant,
    fixed_step: Option<f32>,
    frame_budget: Option<Duration>,
}

impl FrameClock {
    fn new(config: &EngineConfig, window: &WindowConfig) -> Self {
        let frame_budget = if window.vsync {
            Some(Duration::from_secs_f64(1.0 / config.target_fps.max(1) as f64))
        } else {
            None
        };
        Self {
            last: Instant::now(),
            fixed_step: config.fixed_timestep,
            frame_budget,
        }
    }

    /// Seconds since the previous call.
    fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.fixed_step.unwrap_or(elapsed)
    }

    /// Sleep out the rest of the frame when pacing.
    fn pace(&self) {
        if let Some(budget) = self.frame_budget {
            if let Some(rest) = budget.checked_sub(self.last.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }
}

/// Why the inner loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Game,
    Close,
    Escape,
    FrameLimit,
}

fn run_loop<B: Backend, G: Game + ?Sized>(
    name: &str,
    config: &EngineConfig,
    window: &WindowConfig,
    backend: &mut B,
    ctx: &mut Context,
    game: &mut G,
) -> Result<u64> {
    if !game.on_create(ctx) {
        info!("{}: on_create declined, skipping loop", name);
        return Ok(0);
    }

    let mut clock = FrameClock::new(config, window);
    let mut events = EventBatch::new();
    let mut frames: u64 = 0;
    let mut fps_timer: f32 = 0.0;
    let mut fps_frames: u32 = 0;

    loop {
        let stop = loop {
            events.clear();
            backend.poll_events(&mut events)?;
            let input = ctx.input_mut();
            for e in events.drain(..) {
                input.apply(e);
            }
            input.update();

            if input.take_close_request() {
                break Stop::Close;
            }
            if config.quit_on_escape && input.key(Key::Escape).pressed {
                break Stop::Escape;
            }

            let elapsed = clock.tick();
            ctx.begin_frame(elapsed);
            let keep_running = game.on_update(ctx, elapsed);

            backend.present(ctx.draw_target())?;
            frames += 1;

            fps_timer += elapsed;
            fps_frames += 1;
            if fps_timer >= FPS_WINDOW_SECS {
                fps_timer -= FPS_WINDOW_SECS;
                debug!("{}: {} fps", name, fps_frames);
                backend.set_title(&format!("{} - FPS: {}", name, fps_frames))?;
                fps_frames = 0;
            }

            if !keep_running {
                break Stop::Game;
            }
            if config.max_frames.is_some_and(|max| frames >= max) {
                break Stop::FrameLimit;
            }

            clock.pace();
        };

        debug!("{}: loop stopping ({:?})", name, stop);
        if game.on_destroy(ctx) || stop == Stop::FrameLimit {
            break;
        }
        info!("{}: on_destroy declined, resuming", name);
    }

    Ok(frames)
}
