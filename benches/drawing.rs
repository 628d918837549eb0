use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_pge::core::{Context, Engine, Game, SimpleRng, Sprite};
use tui_pge::term::{encode_diff_into, FrameBuffer, PixelView};
use tui_pge::types::{Flip, Pixel};

fn bench_clear(c: &mut Criterion) {
    let mut ctx = Context::new(256, 240);
    c.bench_function("clear_256x240", |b| {
        b.iter(|| ctx.clear(black_box(Pixel::DARK_BLUE)))
    });
}

fn bench_noise_fill(c: &mut Criterion) {
    let mut ctx = Context::new(256, 240);
    let mut rng = SimpleRng::new(12345);
    c.bench_function("noise_fill_256x240", |b| {
        b.iter(|| {
            for y in 0..240 {
                for x in 0..256 {
                    ctx.draw(x, y, rng.next_pixel());
                }
            }
        })
    });
}

fn bench_draw_string(c: &mut Criterion) {
    let mut ctx = Context::new(256, 240);
    c.bench_function("draw_string_32_chars", |b| {
        let text = black_box("The quick brown fox jumps over!!");
        b.iter(|| ctx.draw_string(0, 0, text, Pixel::WHITE, 1))
    });
}

fn bench_fill_circle(c: &mut Criterion) {
    let mut ctx = Context::new(256, 240);
    c.bench_function("fill_circle_r100", |b| {
        b.iter(|| ctx.fill_circle(128, 120, black_box(100), Pixel::GREEN))
    });
}

fn bench_draw_sprite(c: &mut Criterion) {
    let mut ctx = Context::new(256, 240);
    let sprite = Sprite::filled(32, 32, Pixel::RED);
    c.bench_function("draw_sprite_32_scale2_flipped", |b| {
        b.iter(|| ctx.draw_sprite(10, 10, black_box(&sprite), 2, Flip::Both))
    });
}

fn bench_pixel_view(c: &mut Criterion) {
    let mut ctx = Context::new(160, 100);
    let mut rng = SimpleRng::new(7);
    for y in 0..100 {
        for x in 0..160 {
            ctx.draw(x, y, rng.next_pixel());
        }
    }
    let view = PixelView::new(1, 1, false);
    let viewport = view.required_viewport(160, 100);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    c.bench_function("pixel_view_render_160x100", |b| {
        b.iter(|| view.render_into(black_box(ctx.draw_target()), viewport, &mut fb))
    });

    let prev = FrameBuffer::new(viewport.width, viewport.height);
    let mut out = Vec::with_capacity(256 * 1024);
    c.bench_function("encode_diff_160x50", |b| {
        b.iter(|| {
            out.clear();
            encode_diff_into(&prev, &fb, &mut out).unwrap();
        })
    });
}

struct Frames(u32);

impl Game for Frames {
    fn on_update(&mut self, ctx: &mut Context, _elapsed: f32) -> bool {
        ctx.clear(Pixel::BLACK);
        ctx.fill_rect(8, 8, 32, 32, Pixel::YELLOW);
        self.0 -= 1;
        self.0 > 0
    }
}

fn bench_headless_loop(c: &mut Criterion) {
    c.bench_function("headless_100_frames", |b| {
        b.iter(|| {
            let mut engine = Engine::headless("bench");
            engine.construct(128, 96, 1, 1, false, false);
            engine.start(&mut Frames(100))
        })
    });
}

criterion_group!(
    benches,
    bench_clear,
    bench_noise_fill,
    bench_draw_string,
    bench_fill_circle,
    bench_draw_sprite,
    bench_pixel_view,
    bench_headless_loop
);
criterion_main!(benches);
