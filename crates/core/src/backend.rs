//! Presentation backends.
//!
//! A backend owns whatever surface the frames end up on (a terminal, a
//! window, nothing at all) and is the only source of input events. The
//! engine drives it from the loop thread:
//!
//! ```text
//! open -> (poll_events -> present [-> set_title])* -> close
//! ```

use std::collections::VecDeque;
use std::path::PathBuf;

use arrayvec::ArrayVec;

use crate::error::{Error, Result};
use crate::sprite::Sprite;
use crate::types::InputEvent;

/// Upper bound on events delivered for a single frame; extra events are dropped.
pub const MAX_EVENTS_PER_FRAME: usize = 64;

/// Events collected for one frame.
pub type EventBatch = ArrayVec<InputEvent, MAX_EVENTS_PER_FRAME>;

/// Screen geometry requested by `construct`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub pixel_width: i32,
    pub pixel_height: i32,
    pub full_screen: bool,
    pub vsync: bool,
}

pub trait Backend {
    /// Create the output surface.
    fn open(&mut self, title: &str, window: &WindowConfig) -> Result<()>;

    /// Append this frame's input to `events`.
    fn poll_events(&mut self, events: &mut EventBatch) -> Result<()>;

    /// Show a finished frame.
    fn present(&mut self, frame: &Sprite) -> Result<()>;

    fn set_title(&mut self, title: &str) -> Result<()>;

    /// Release the output surface. Called once after the loop ends.
    fn close(&mut self) -> Result<()>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn open(&mut self, title: &str, window: &WindowConfig) -> Result<()> {
        (**self).open(title, window)
    }

    fn poll_events(&mut self, events: &mut EventBatch) -> Result<()> {
        (**self).poll_events(events)
    }

    fn present(&mut self, frame: &Sprite) -> Result<()> {
        (**self).present(frame)
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        (**self).set_title(title)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Push an event, dropping it when the batch is full.
#[inline]
pub fn push_event(events: &mut EventBatch, event: InputEvent) -> bool {
    events.try_push(event).is_ok()
}

/// Failure a [`HeadlessBackend`] reports from `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFailure {
    Fail,
    NoFile,
}

/// Backend without any output, for tests, benchmarks and batch rendering.
///
/// Events can be scripted per frame and a close request can be raised
/// after a number of presented frames.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    window: Option<WindowConfig>,
    is_open: bool,
    open_count: u32,
    close_count: u32,
    titles: Vec<String>,
    frames_presented: u64,
    last_frame: Option<Sprite>,
    script: VecDeque<Vec<InputEvent>>,
    close_after: Option<u64>,
    fail_open: Option<OpenFailure>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request close once `frames` frames have been presented.
    pub fn close_after(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Make `open` fail.
    pub fn fail_open(mut self, failure: OpenFailure) -> Self {
        self.fail_open = Some(failure);
        self
    }

    /// Queue events for the next unscripted frame.
    pub fn push_frame_events(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.script.push_back(events.into_iter().collect());
    }

    pub fn with_frame_events(mut self, events: impl IntoIterator<Item = InputEvent>) -> Self {
        self.push_frame_events(events);
        self
    }

    pub fn window(&self) -> Option<&WindowConfig> {
        self.window.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn open_count(&self) -> u32 {
        self.open_count
    }

    pub fn close_count(&self) -> u32 {
        self.close_count
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn last_frame(&self) -> Option<&Sprite> {
        self.last_frame.as_ref()
    }

    /// Every title set so far; the first is the one passed to `open`.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl Backend for HeadlessBackend {
    fn open(&mut self, title: &str, window: &WindowConfig) -> Result<()> {
        match self.fail_open {
            Some(OpenFailure::Fail) => {
                return Err(Error::Backend("headless open refused".to_string()))
            }
            Some(OpenFailure::NoFile) => return Err(Error::NoFile(PathBuf::from("headless"))),
            None => {}
        }
        self.window = Some(*window);
        self.is_open = true;
        self.open_count += 1;
        self.titles.push(title.to_string());
        Ok(())
    }

    fn poll_events(&mut self, events: &mut EventBatch) -> Result<()> {
        if let Some(frame) = self.script.pop_front() {
            for e in frame {
                push_event(events, e);
            }
        }
        if let Some(n) = self.close_after {
            if self.frames_presented >= n {
                push_event(events, InputEvent::CloseRequested);
            }
        }
        Ok(())
    }

    fn present(&mut self, frame: &Sprite) -> Result<()> {
        if !self.is_open {
            return Err(Error::Backend("present on a closed backend".to_string()));
        }
        self.frames_presented += 1;
        match &mut self.last_frame {
            Some(last) if last.width() == frame.width() && last.height() == frame.height() => {
                last.data_mut().copy_from_slice(frame.data());
            }
            _ => self.last_frame = Some(frame.clone()),
        }
        Ok(())
    }

    fn set_title(&mut self, title: &str) -> Result<()> {
        self.titles.push(title.to_string());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.is_open = false;
        self.close_count += 1;
        Ok(())
    }
}
