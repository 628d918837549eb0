//! Engine lifecycle through the facade crate, on the headless backend.

use tui_pge::core::{
    Context, Engine, EngineConfig, EngineState, Game, HeadlessBackend, OpenFailure, Sprite,
};
use tui_pge::types::{InputEvent, Key, Phase, Pixel, RCode, ResultCode};

/// Counts hooks; stops after `frames` updates.
struct Counter {
    frames: u32,
    creates: u32,
    updates: u32,
    destroys: u32,
    size_seen: (i32, i32),
}

impl Counter {
    fn stopping_after(frames: u32) -> Self {
        Self {
            frames,
            creates: 0,
            updates: 0,
            destroys: 0,
            size_seen: (0, 0),
        }
    }
}

impl Game for Counter {
    fn on_create(&mut self, ctx: &mut Context) -> bool {
        self.creates += 1;
        self.size_seen = (ctx.screen_width(), ctx.screen_height());
        true
    }

    fn on_update(&mut self, _ctx: &mut Context, _elapsed: f32) -> bool {
        self.updates += 1;
        self.updates < self.frames
    }

    fn on_destroy(&mut self, _ctx: &mut Context) -> bool {
        self.destroys += 1;
        true
    }
}

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("tui-pge-{}-{}", std::process::id(), name))
}

#[test]
fn construct_with_positive_dimensions_is_ok() {
    for &(sw, sh, pw, ph) in &[(1, 1, 1, 1), (256, 240, 4, 4), (640, 480, 1, 2), (3, 7, 5, 1)] {
        for &full_screen in &[false, true] {
            let mut engine = Engine::headless("dims");
            let code = engine.construct(sw, sh, pw, ph, full_screen, false);
            assert_eq!(code, RCode::Ok, "{}x{}", sw, sh);
        }
    }
}

#[test]
fn missing_font_resource_is_no_file() {
    let config = EngineConfig::default().with_font_path(temp_path("missing-font.spr"));
    let mut engine = Engine::headless("font").with_config(config);
    assert_eq!(engine.construct(32, 32, 1, 1, false, false), RCode::NoFile);
    assert_eq!(engine.state(), EngineState::Failed);
}

#[test]
fn font_sheet_from_disk_is_used() {
    let path = temp_path("font.spr");
    tui_pge::core::load_font().save_to_file(&path).unwrap();

    let config = EngineConfig::default().with_font_path(&path);
    let mut engine = Engine::headless("font").with_config(config);
    let code = engine.construct(32, 16, 1, 1, false, false);
    let _ = std::fs::remove_file(&path);
    assert_eq!(code, RCode::Ok);

    let ctx = engine.context_mut().unwrap();
    ctx.draw_string(0, 0, "A", Pixel::WHITE, 1);
    assert!(ctx.draw_target().data().iter().any(|p| *p == Pixel::WHITE));
}

#[test]
fn wrong_sized_font_sheet_fails() {
    let path = temp_path("tiny-font.spr");
    Sprite::new(4, 4).save_to_file(&path).unwrap();

    let config = EngineConfig::default().with_font_path(&path);
    let mut engine = Engine::headless("font").with_config(config);
    let code = engine.construct(32, 16, 1, 1, false, false);
    let _ = std::fs::remove_file(&path);
    assert_eq!(code, RCode::Fail);
}

#[test]
fn screen_size_matches_construct_after_start() {
    let mut engine = Engine::headless("size");
    let mut game = Counter::stopping_after(1);
    assert_eq!(engine.construct(120, 75, 2, 2, false, false), RCode::Ok);
    assert_eq!(engine.start(&mut game), RCode::Ok);
    assert_eq!((engine.screen_width(), engine.screen_height()), (120, 75));
    assert_eq!(game.size_seen, (120, 75));
}

#[test]
fn draw_is_true_exactly_inside_the_screen() {
    let mut engine = Engine::headless("draw");
    engine.construct(10, 6, 1, 1, false, false);
    let (w, h) = (engine.screen_width(), engine.screen_height());

    for y in -2..h + 2 {
        for x in -2..w + 2 {
            let inside = (0..w).contains(&x) && (0..h).contains(&y);
            assert_eq!(engine.draw(x, y, Pixel::GREEN), inside, "({}, {})", x, y);
        }
    }
}

#[test]
fn update_returning_false_first_runs_one_frame() {
    let mut engine = Engine::headless("once");
    let mut game = Counter::stopping_after(1);
    engine.construct(8, 8, 1, 1, false, false);
    assert_eq!(engine.start(&mut game), RCode::Ok);
    assert_eq!(game.updates, 1);
    assert_eq!(engine.backend().frames_presented(), 1);
    assert_eq!((game.creates, game.destroys), (1, 1));
}

#[test]
fn result_code_mapping_is_total_and_injective() {
    let mapped: Vec<(Phase, RCode)> = ResultCode::ALL
        .iter()
        .filter_map(|c| c.phase().map(|p| (p, c.rcode())))
        .collect();
    assert_eq!(mapped.len(), 4);

    for phase in [Phase::Construct, Phase::Start] {
        for code in RCode::ALL {
            let unified = ResultCode::from_phase(phase, code);
            assert_eq!(unified.rcode(), code);
            if code.is_ok() {
                assert_eq!(unified, ResultCode::Ok);
            } else {
                assert_eq!(unified.phase(), Some(phase));
            }
        }
    }

    let mut names: Vec<String> = ResultCode::ALL.iter().map(|c| c.to_string()).collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), ResultCode::ALL.len());
}

#[test]
fn run_reports_the_failing_phase() {
    let mut engine = Engine::headless("run");
    let code = engine.run(&mut Counter::stopping_after(1), 8, 0, 1, 1, false, false);
    assert_eq!(code, ResultCode::Fail(Phase::Construct));

    let backend = HeadlessBackend::new().fail_open(OpenFailure::Fail);
    let mut engine = Engine::new("run", backend);
    let code = engine.run(&mut Counter::stopping_after(1), 8, 8, 1, 1, false, false);
    assert_eq!(code, ResultCode::Fail(Phase::Start));
}

#[test]
fn escape_can_be_left_to_the_game() {
    let backend = HeadlessBackend::new()
        .with_frame_events([InputEvent::KeyDown(Key::Escape)])
        .close_after(3);
    let config = EngineConfig {
        quit_on_escape: false,
        ..EngineConfig::default()
    };
    let mut engine = Engine::new("esc", backend).with_config(config);
    let mut game = Counter::stopping_after(u32::MAX);
    engine.construct(8, 8, 1, 1, false, false);
    assert_eq!(engine.start(&mut game), RCode::Ok);
    assert_eq!(game.updates, 3);
}

#[test]
fn independent_engines_coexist() {
    let mut a = Engine::headless("a");
    let mut b = Engine::headless("b");
    a.construct(4, 4, 1, 1, false, false);
    b.construct(9, 3, 1, 1, false, false);
    assert_eq!(a.start(&mut Counter::stopping_after(2)), RCode::Ok);
    assert_eq!(b.start(&mut Counter::stopping_after(5)), RCode::Ok);
    assert_eq!(a.backend().frames_presented(), 2);
    assert_eq!(b.backend().frames_presented(), 5);
    assert_eq!(b.screen_width(), 9);
}
