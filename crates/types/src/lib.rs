//! Shared value types and constants
//!
//! This crate defines the plain data types used throughout the engine.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core drawing, terminal backend, C ABI).
//!
//! # Result Codes
//!
//! The engine reports its outcome with a small closed set of codes:
//!
//! | Type | Values | Description |
//! |------|--------|-------------|
//! | [`RCode`] | `Fail`, `Ok`, `NoFile` | Native engine code of one phase |
//! | [`Phase`] | `Construct`, `Start` | Which phase produced a code |
//! | [`ResultCode`] | `Ok`, `Fail(phase)`, `NoFile(phase)` | Unified caller-facing code |
//!
//! # Default Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TARGET_FPS` | 60 | Frame pacing when vsync is requested |
//! | `FPS_WINDOW_SECS` | 1.0 | Interval between FPS title updates |
//! | `KEY_RELEASE_TIMEOUT_MS` | 150 | Key release for terminals without release events |
//!
//! # Examples
//!
//! ```
//! use tui_pge_types::{Phase, Pixel, RCode, ResultCode};
//!
//! let p = Pixel::rgb(255, 0, 0);
//! assert_eq!(p, Pixel::RED);
//! assert_eq!(p.a, 255);
//!
//! let code = ResultCode::from_phase(Phase::Start, RCode::NoFile);
//! assert_eq!(code, ResultCode::NoFile(Phase::Start));
//! assert_eq!(code.rcode(), RCode::NoFile);
//! ```

/// Frame rate used to pace the loop when vsync is requested.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Seconds accumulated before the FPS counter refreshes the title.
pub const FPS_WINDOW_SECS: f32 = 1.0;

/// Key release timeout for terminals that never report key release.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Width of one glyph in the built-in font, in pixels.
pub const GLYPH_SIZE: i32 = 8;

/// Default application name.
pub const DEFAULT_APP_NAME: &str = "Pixel Game Engine";

/// Represents an RGBA value.
///
/// Alpha 0 is transparent, 255 is opaque. The layout matches the 4-byte
/// pixel struct of the C ABI.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Pixel {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Pixel {
    pub const GREY: Pixel = Pixel::rgb(192, 192, 192);
    pub const DARK_GREY: Pixel = Pixel::rgb(128, 128, 128);
    pub const VERY_DARK_GREY: Pixel = Pixel::rgb(64, 64, 64);
    pub const RED: Pixel = Pixel::rgb(255, 0, 0);
    pub const DARK_RED: Pixel = Pixel::rgb(128, 0, 0);
    pub const VERY_DARK_RED: Pixel = Pixel::rgb(64, 0, 0);
    pub const YELLOW: Pixel = Pixel::rgb(255, 255, 0);
    pub const DARK_YELLOW: Pixel = Pixel::rgb(128, 128, 0);
    pub const VERY_DARK_YELLOW: Pixel = Pixel::rgb(64, 64, 0);
    pub const GREEN: Pixel = Pixel::rgb(0, 255, 0);
    pub const DARK_GREEN: Pixel = Pixel::rgb(0, 128, 0);
    pub const VERY_DARK_GREEN: Pixel = Pixel::rgb(0, 64, 0);
    pub const CYAN: Pixel = Pixel::rgb(0, 255, 255);
    pub const DARK_CYAN: Pixel = Pixel::rgb(0, 128, 128);
    pub const VERY_DARK_CYAN: Pixel = Pixel::rgb(0, 64, 64);
    pub const BLUE: Pixel = Pixel::rgb(0, 0, 255);
    pub const DARK_BLUE: Pixel = Pixel::rgb(0, 0, 128);
    pub const VERY_DARK_BLUE: Pixel = Pixel::rgb(0, 0, 64);
    pub const MAGENTA: Pixel = Pixel::rgb(255, 0, 255);
    pub const DARK_MAGENTA: Pixel = Pixel::rgb(128, 0, 128);
    pub const VERY_DARK_MAGENTA: Pixel = Pixel::rgb(64, 0, 64);
    pub const WHITE: Pixel = Pixel::rgb(255, 255, 255);
    pub const BLACK: Pixel = Pixel::rgb(0, 0, 0);
    pub const BLANK: Pixel = Pixel::rgba(0, 0, 0, 0);

    /// Returns an RGBA value.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns an RGB value with alpha 255.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Packs the pixel as little-endian `r g b a` bytes.
    #[inline]
    pub fn to_le_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn from_le_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }
}

/// How [`Pixel`]s are written into the draw target.
///
/// - **Normal**: overwrite
/// - **Mask**: write only fully opaque pixels
/// - **Alpha**: blend by `alpha * blend_factor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelMode {
    #[default]
    Normal,
    Mask,
    Alpha,
}

/// Sprite sampling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleMode {
    /// Reads outside the sprite return [`Pixel::BLANK`].
    #[default]
    Normal,
    /// Reads wrap around the sprite edges.
    Periodic,
}

/// Flip applied when drawing a sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flip {
    #[default]
    None,
    Horiz,
    Vert,
    Both,
}

impl Flip {
    pub fn horizontal(&self) -> bool {
        matches!(self, Flip::Horiz | Flip::Both)
    }

    pub fn vertical(&self) -> bool {
        matches!(self, Flip::Vert | Flip::Both)
    }
}

/// Keyboard keys recognised by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    K0,
    K1,
    K2,
    K3,
    K4,
    K5,
    K6,
    K7,
    K8,
    K9,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Up,
    Down,
    Left,
    Right,
    Space,
    Tab,
    Shift,
    Ctrl,
    Ins,
    Del,
    Home,
    End,
    PgUp,
    PgDn,
    Back,
    Escape,
    Enter,
    Pause,
}

impl Key {
    /// Number of distinct keys.
    pub const COUNT: usize = Key::Pause as usize + 1;

    /// Index into a per-key state table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Map an ASCII letter or digit to a key (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_pge_types::Key;
    ///
    /// assert_eq!(Key::from_char('a'), Some(Key::A));
    /// assert_eq!(Key::from_char('Z'), Some(Key::Z));
    /// assert_eq!(Key::from_char('7'), Some(Key::K7));
    /// assert_eq!(Key::from_char(' '), Some(Key::Space));
    /// assert_eq!(Key::from_char('#'), None);
    /// ```
    pub fn from_char(c: char) -> Option<Self> {
        const LETTERS: [Key; 26] = [
            Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
            Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
            Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        ];
        const DIGITS: [Key; 10] = [
            Key::K0, Key::K1, Key::K2, Key::K3, Key::K4,
            Key::K5, Key::K6, Key::K7, Key::K8, Key::K9,
        ];

        match c {
            'a'..='z' => Some(LETTERS[(c as u8 - b'a') as usize]),
            'A'..='Z' => Some(LETTERS[(c as u8 - b'A') as usize]),
            '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
            ' ' => Some(Key::Space),
            _ => None,
        }
    }

    /// Map a function key number (1-12).
    pub fn function(n: u8) -> Option<Self> {
        const FKEYS: [Key; 12] = [
            Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F9,
            Key::F10, Key::F11, Key::F12,
        ];
        match n {
            1..=12 => Some(FKEYS[(n - 1) as usize]),
            _ => None,
        }
    }
}

/// Mouse buttons that are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    X1,
    X2,
}

impl MouseButton {
    pub const COUNT: usize = 5;

    #[inline]
    pub fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::X1 => 3,
            MouseButton::X2 => 4,
        }
    }
}

/// State of a key or a mouse button for the current frame.
///
/// `pressed` and `released` are edges and last exactly one frame;
/// `held` is true for as long as the button is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HwButton {
    pub pressed: bool,
    pub released: bool,
    pub held: bool,
}

/// Input delivered by a backend for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Mouse position in screen pixels.
    MouseMove { x: i32, y: i32 },
    MouseDown(MouseButton),
    MouseUp(MouseButton),
    /// Positive is away from the user.
    MouseWheel(i32),
    /// Terminal or window resized, in backend units.
    Resize { width: u16, height: u16 },
    /// The user asked to close the window.
    CloseRequested,
}

/// Native engine result code for a single phase.
///
/// The discriminants match the values of the C ABI.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RCode {
    Fail = 0,
    Ok = 1,
    NoFile = -1,
}

impl RCode {
    pub const ALL: [RCode; 3] = [RCode::Fail, RCode::Ok, RCode::NoFile];

    #[inline]
    pub fn is_ok(&self) -> bool {
        *self == RCode::Ok
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RCode::Fail => "FAIL",
            RCode::Ok => "OK",
            RCode::NoFile => "NO_FILE",
        }
    }
}

/// Engine phase a result code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Construct,
    Start,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Construct => "construct",
            Phase::Start => "start",
        }
    }
}

/// Caller-facing result of a construct + start run.
///
/// Failures carry the phase that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    Ok,
    Fail(Phase),
    NoFile(Phase),
}

impl ResultCode {
    /// Every value, in C ABI order.
    pub const ALL: [ResultCode; 5] = [
        ResultCode::Fail(Phase::Construct),
        ResultCode::NoFile(Phase::Construct),
        ResultCode::Fail(Phase::Start),
        ResultCode::NoFile(Phase::Start),
        ResultCode::Ok,
    ];

    /// Tag a native code with the phase that produced it.
    pub fn from_phase(phase: Phase, code: RCode) -> Self {
        match code {
            RCode::Ok => ResultCode::Ok,
            RCode::Fail => ResultCode::Fail(phase),
            RCode::NoFile => ResultCode::NoFile(phase),
        }
    }

    /// Drop the phase tag.
    pub fn rcode(&self) -> RCode {
        match self {
            ResultCode::Ok => RCode::Ok,
            ResultCode::Fail(_) => RCode::Fail,
            ResultCode::NoFile(_) => RCode::NoFile,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            ResultCode::Ok => None,
            ResultCode::Fail(phase) | ResultCode::NoFile(phase) => Some(*phase),
        }
    }

    #[inline]
    pub fn is_ok(&self) -> bool {
        *self == ResultCode::Ok
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase() {
            Some(phase) => write!(f, "{}_{}", phase.as_str().to_uppercase(), self.rcode().as_str()),
            None => f.write_str("OK"),
        }
    }
}
