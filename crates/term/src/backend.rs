//! TerminalBackend: runs the engine inside a terminal via crossterm.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::terminal;
use log::{debug, info, warn};

use crate::core::backend::push_event;
use crate::core::{Backend, Error, EventBatch, Result, Sprite, WindowConfig};
use crate::fb::FrameBuffer;
use crate::pixel_view::{Layout, PixelView, Viewport};
use crate::renderer::TerminalRenderer;
use crate::types::InputEvent;
use tui_pge_input::{map_mouse_event, should_quit, InputHandler};

pub struct TerminalBackend {
    renderer: TerminalRenderer,
    input: InputHandler,
    view: PixelView,
    fb: FrameBuffer,
    viewport: Viewport,
    layout: Option<Layout>,
    entered: bool,
}

impl Default for TerminalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalBackend {
    pub fn new() -> Self {
        Self {
            renderer: TerminalRenderer::new(),
            input: InputHandler::new(),
            view: PixelView::default(),
            fb: FrameBuffer::new(0, 0),
            viewport: Viewport::new(0, 0),
            layout: None,
            entered: false,
        }
    }

    pub fn with_input_handler(mut self, input: InputHandler) -> Self {
        self.input = input;
        self
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn handle_event(&mut self, ev: Event, now: Instant, events: &mut EventBatch) {
        match ev {
            Event::Key(key) => {
                if should_quit(key) {
                    push_event(events, InputEvent::CloseRequested);
                    return;
                }
                for e in self.input.handle_key_event(key, now) {
                    push_event(events, e);
                }
            }
            Event::Mouse(mouse) => {
                if let Some(layout) = self.layout {
                    for e in map_mouse_event(mouse, |c, r| layout.cell_to_pixel(c, r)) {
                        push_event(events, e);
                    }
                }
            }
            Event::Resize(width, height) => {
                debug!("terminal resized to {}x{}", width, height);
                self.viewport = Viewport::new(width, height);
                self.renderer.invalidate();
                push_event(events, InputEvent::Resize { width, height });
            }
            Event::FocusLost => {
                for e in self.input.release_all() {
                    push_event(events, e);
                }
            }
            _ => {}
        }
    }
}

/// Renderer failures carry their io error through when there is one.
fn backend_error(e: anyhow::Error) -> Error {
    match e.downcast::<io::Error>() {
        Ok(io) => Error::Io(io),
        Err(e) => Error::Backend(format!("{:#}", e)),
    }
}

impl Backend for TerminalBackend {
    fn open(&mut self, title: &str, window: &WindowConfig) -> Result<()> {
        let (width, height) = terminal::size()?;
        self.viewport = Viewport::new(width, height);
        self.view = PixelView::new(window.pixel_width, window.pixel_height, window.full_screen);

        let needed = self.view.required_viewport(window.screen_width, window.screen_height);
        if needed.width > width || needed.height > height {
            warn!(
                "terminal is {}x{} cells, screen needs {}x{}; output will be cropped",
                width, height, needed.width, needed.height
            );
        }

        self.renderer.enter().map_err(backend_error)?;
        self.entered = true;
        self.renderer.set_title(title).map_err(backend_error)?;
        info!("terminal backend open at {}x{} cells", width, height);
        Ok(())
    }

    fn poll_events(&mut self, events: &mut EventBatch) -> Result<()> {
        let now = Instant::now();
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.handle_event(ev, now, events);
        }
        for e in self.input.update(now) {
            push_event(events, e);
        }
        Ok(())
    }

    fn present(&mut self, frame: &Sprite) -> Result<()> {
        let layout = self.view.render_into(frame, self.viewport, &mut self.fb);
        self.layout = Some(layout);
        self.renderer.draw_swap(&mut self.fb).map_err(backend_error)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.renderer.set_title(title).map_err(backend_error)
    }

    fn close(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        self.renderer.exit().map_err(backend_error)
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        if self.entered {
            if let Err(e) = self.renderer.exit() {
                warn!("failed to restore terminal: {:#}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    use crate::types::{Key, MouseButton as PgeButton};

    #[test]
    fn ctrl_c_requests_close() {
        let mut backend = TerminalBackend::new();
        let mut events = EventBatch::new();
        let ev = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        backend.handle_event(ev, Instant::now(), &mut events);
        assert_eq!(events.as_slice(), &[InputEvent::CloseRequested]);
    }

    #[test]
    fn keys_are_forwarded() {
        let mut backend = TerminalBackend::new();
        let mut events = EventBatch::new();
        backend.handle_event(Event::Key(KeyEvent::from(KeyCode::Esc)), Instant::now(), &mut events);
        assert_eq!(events.as_slice(), &[InputEvent::KeyDown(Key::Escape)]);
    }

    #[test]
    fn mouse_uses_last_layout() {
        let mut backend = TerminalBackend::new();
        let mut events = EventBatch::new();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 1,
            modifiers: KeyModifiers::NONE,
        };

        // Nothing presented yet: no mapping available.
        backend.handle_event(Event::Mouse(click), Instant::now(), &mut events);
        assert!(events.is_empty());

        let view = PixelView::new(2, 2, false);
        backend.layout = Some(view.layout(4, 4, view.required_viewport(4, 4)));
        backend.handle_event(Event::Mouse(click), Instant::now(), &mut events);
        assert_eq!(
            events.as_slice(),
            &[InputEvent::MouseMove { x: 2, y: 1 }, InputEvent::MouseDown(PgeButton::Left)]
        );
    }

    #[test]
    fn resize_updates_viewport() {
        let mut backend = TerminalBackend::new();
        let mut events = EventBatch::new();
        backend.handle_event(Event::Resize(80, 24), Instant::now(), &mut events);
        assert_eq!(backend.viewport(), Viewport::new(80, 24));
        assert_eq!(
            events.as_slice(),
            &[InputEvent::Resize {
                width: 80,
                height: 24
            }]
        );
    }

    #[test]
    fn close_without_open_is_a_no_op() {
        let mut backend = TerminalBackend::new();
        assert!(backend.close().is_ok());
    }

    #[test]
    fn renderer_io_errors_keep_their_kind() {
        let err = backend_error(io::Error::new(io::ErrorKind::NotFound, "tty").into());
        assert_eq!(err.rcode(), crate::types::RCode::NoFile);
        let err = backend_error(anyhow::anyhow!("boom"));
        assert!(matches!(err, Error::Backend(_)));
    }
}
