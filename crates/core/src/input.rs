//! Per-frame keyboard and mouse state.
//!
//! Backends feed [`InputEvent`]s for a frame, then [`InputState::update`]
//! turns the raw up/down levels into [`HwButton`] edges. A press and release
//! that land in the same frame still produce a `pressed` edge; the release is
//! deferred to the next frame.

use crate::types::{HwButton, InputEvent, Key, MouseButton};

#[derive(Debug, Clone)]
struct ButtonBank<const N: usize> {
    new_state: [bool; N],
    old_state: [bool; N],
    deferred_release: [bool; N],
    state: [HwButton; N],
}

impl<const N: usize> ButtonBank<N> {
    fn new() -> Self {
        Self {
            new_state: [false; N],
            old_state: [false; N],
            deferred_release: [false; N],
            state: [HwButton::default(); N],
        }
    }

    fn down(&mut self, i: usize) {
        self.new_state[i] = true;
        self.deferred_release[i] = false;
    }

    fn up(&mut self, i: usize) {
        if self.new_state[i] && !self.old_state[i] {
            // Tapped within one frame.
            self.deferred_release[i] = true;
        } else {
            self.new_state[i] = false;
        }
    }

    fn update(&mut self) {
        for i in 0..N {
            let s = &mut self.state[i];
            s.pressed = false;
            s.released = false;
            if self.new_state[i] != self.old_state[i] {
                if self.new_state[i] {
                    s.pressed = !s.held;
                    s.held = true;
                } else {
                    s.released = true;
                    s.held = false;
                }
            }
            self.old_state[i] = self.new_state[i];
            if self.deferred_release[i] {
                self.deferred_release[i] = false;
                self.new_state[i] = false;
            }
        }
    }
}

/// Keyboard and mouse state seen by a game during one frame.
#[derive(Debug, Clone)]
pub struct InputState {
    keys: ButtonBank<{ Key::COUNT }>,
    mouse: ButtonBank<{ MouseButton::COUNT }>,
    mouse_x: i32,
    mouse_y: i32,
    wheel_delta: i32,
    pending_wheel: i32,
    close_requested: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys: ButtonBank::new(),
            mouse: ButtonBank::new(),
            mouse_x: 0,
            mouse_y: 0,
            wheel_delta: 0,
            pending_wheel: 0,
            close_requested: false,
        }
    }

    /// Record one event for the frame being assembled.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.keys.down(key.index()),
            InputEvent::KeyUp(key) => self.keys.up(key.index()),
            InputEvent::MouseDown(btn) => self.mouse.down(btn.index()),
            InputEvent::MouseUp(btn) => self.mouse.up(btn.index()),
            InputEvent::MouseMove { x, y } => {
                self.mouse_x = x;
                self.mouse_y = y;
            }
            InputEvent::MouseWheel(delta) => self.pending_wheel += delta,
            InputEvent::CloseRequested => self.close_requested = true,
            InputEvent::Resize { .. } => {}
        }
    }

    /// Compute edges for the new frame.
    pub fn update(&mut self) {
        self.keys.update();
        self.mouse.update();
        self.wheel_delta = self.pending_wheel;
        self.pending_wheel = 0;
    }

    #[inline]
    pub fn key(&self, key: Key) -> HwButton {
        self.keys.state[key.index()]
    }

    #[inline]
    pub fn mouse(&self, btn: MouseButton) -> HwButton {
        self.mouse.state[btn.index()]
    }

    #[inline]
    pub fn mouse_x(&self) -> i32 {
        self.mouse_x
    }

    #[inline]
    pub fn mouse_y(&self) -> i32 {
        self.mouse_y
    }

    /// Wheel movement accumulated during the last frame.
    #[inline]
    pub fn mouse_wheel(&self) -> i32 {
        self.wheel_delta
    }

    /// Returns true once after a close event was seen.
    pub fn take_close_request(&mut self) -> bool {
        std::mem::take(&mut self.close_requested)
    }
}
