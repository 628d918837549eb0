//! Key release synthesis for terminal environments.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::{Duration, Instant};

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key_event, MappedEvents};
use crate::types::{InputEvent, Key, KEY_RELEASE_TIMEOUT_MS};

/// Key-ups produced by one [`InputHandler::update`].
pub type ReleasedKeys = ArrayVec<InputEvent, { Key::COUNT }>;

/// Tracks which keys are down and releases them when the terminal goes quiet.
#[derive(Debug, Clone)]
pub struct InputHandler {
    held: ArrayVec<(Key, Instant), { Key::COUNT }>,
    key_release_timeout: Duration,
    release_events: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            key_release_timeout: Duration::from_millis(KEY_RELEASE_TIMEOUT_MS as u64),
            release_events: false,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout = Duration::from_millis(timeout_ms as u64);
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout.as_millis() as u32
    }

    /// True once the terminal has reported a real release; timeouts stop then.
    pub fn has_release_events(&self) -> bool {
        self.release_events
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }

    /// Map a key event and record what it holds or releases.
    pub fn handle_key_event(&mut self, key: KeyEvent, now: Instant) -> MappedEvents {
        if key.kind == KeyEventKind::Release {
            self.release_events = true;
        }

        let events = map_key_event(key);
        for e in &events {
            match *e {
                InputEvent::KeyDown(k) => match self.held.iter_mut().find(|(h, _)| *h == k) {
                    Some(slot) => slot.1 = now,
                    None => self.held.push((k, now)),
                },
                InputEvent::KeyUp(k) => self.held.retain(|(h, _)| *h != k),
                _ => {}
            }
        }
        events
    }

    /// Release every key not seen within the timeout.
    pub fn update(&mut self, now: Instant) -> ReleasedKeys {
        let mut released = ReleasedKeys::new();
        if self.release_events {
            return released;
        }

        let timeout = self.key_release_timeout;
        self.held.retain(|(key, seen)| {
            if now.saturating_duration_since(*seen) > timeout {
                released.push(InputEvent::KeyUp(*key));
                false
            } else {
                true
            }
        });
        released
    }

    /// Release everything at once, e.g. when the terminal loses focus.
    pub fn release_all(&mut self) -> ReleasedKeys {
        self.held.drain(..).map(|(key, _)| InputEvent::KeyUp(key)).collect()
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
