use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_pge::core::{Context, Sprite};
use tui_pge::term::{FrameBuffer, PixelView};
use tui_pge::types::{Flip, Pixel, PixelMode};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

// Single test per binary: the counter is process-wide.
#[test]
fn frame_hot_paths_do_not_allocate() {
    let mut ctx = Context::new(160, 100);
    let sprite = Sprite::filled(16, 16, Pixel::CYAN);
    let view = PixelView::new(1, 1, false);
    let viewport = view.required_viewport(160, 100);
    let mut fb = FrameBuffer::new(viewport.width, viewport.height);

    let allocs = with_alloc_counting(|| {
        for i in 0..20 {
            ctx.clear(Pixel::BLACK);
            ctx.draw_line(0, 0, 159, 99, Pixel::RED, 0xF0F0_F0F0);
            ctx.fill_circle(80, 50, 20 + i, Pixel::GREEN);
            ctx.draw_triangle(10, 90, 40, 10, 70, 90, Pixel::YELLOW);
            ctx.draw_string(4, 4, "no allocations here", Pixel::WHITE, 1);
            ctx.set_pixel_mode(PixelMode::Alpha);
            ctx.draw_sprite(100, 40, &sprite, 2, Flip::Both);
            ctx.set_pixel_mode(PixelMode::Normal);
            view.render_into(ctx.draw_target(), viewport, &mut fb);
        }
    });

    assert_eq!(allocs, 0, "expected zero allocations, got {}", allocs);
}
