//! Input normalization.
//!
//! Hosts deliver [`HostEvent`]s in client pixels with DOM-style key
//! identifiers. [`InputNormalizer`] maps them into the logical canvas through
//! a caller-supplied [`CoordTransform`] and produces canonical
//! [`InputEvent`]s for the router.

use crate::geometry::{Point, Size};

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    /// Left mouse button.
    #[default]
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Any other button, by host index.
    Other(u16),
}

impl MouseButton {
    /// Maps a DOM `MouseEvent.button` index.
    #[must_use]
    pub const fn from_index(index: u16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            other => Self::Other(other),
        }
    }

    const fn mask(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Right => 2,
            Self::Middle => 4,
            Self::Other(_) => 8,
        }
    }
}

/// Keyboard key.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key.
    Escape,
    /// Enter/Return key.
    Enter,
    /// Tab key.
    Tab,
    /// Backspace key.
    Backspace,
    /// Delete key.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Home key.
    Home,
    /// End key.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Space bar.
    Space,
    /// Either shift key.
    Shift,
    /// Either control key.
    Control,
    /// Either alt key.
    Alt,
    /// Either super/command key.
    Super,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Num0, Num1, Num2, Num3, Num4, Num5, Num6, Num7, Num8, Num9,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    /// Anything else (punctuation, media keys, ...).
    Unknown,
}

impl Key {
    const LETTERS: [Self; 26] = [
        Self::A, Self::B, Self::C, Self::D, Self::E, Self::F, Self::G, Self::H, Self::I,
        Self::J, Self::K, Self::L, Self::M, Self::N, Self::O, Self::P, Self::Q, Self::R,
        Self::S, Self::T, Self::U, Self::V, Self::W, Self::X, Self::Y, Self::Z,
    ];
    const DIGITS: [Self; 10] = [
        Self::Num0, Self::Num1, Self::Num2, Self::Num3, Self::Num4,
        Self::Num5, Self::Num6, Self::Num7, Self::Num8, Self::Num9,
    ];
    const FUNCTION: [Self; 12] = [
        Self::F1, Self::F2, Self::F3, Self::F4, Self::F5, Self::F6,
        Self::F7, Self::F8, Self::F9, Self::F10, Self::F11, Self::F12,
    ];

    /// Maps a portable physical key identifier (`KeyboardEvent.code`).
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "Escape" => return Self::Escape,
            "Enter" | "NumpadEnter" => return Self::Enter,
            "Tab" => return Self::Tab,
            "Backspace" => return Self::Backspace,
            "Delete" => return Self::Delete,
            "ArrowUp" => return Self::Up,
            "ArrowDown" => return Self::Down,
            "ArrowLeft" => return Self::Left,
            "ArrowRight" => return Self::Right,
            "Home" => return Self::Home,
            "End" => return Self::End,
            "PageUp" => return Self::PageUp,
            "PageDown" => return Self::PageDown,
            "Space" => return Self::Space,
            "ShiftLeft" | "ShiftRight" => return Self::Shift,
            "ControlLeft" | "ControlRight" => return Self::Control,
            "AltLeft" | "AltRight" => return Self::Alt,
            "MetaLeft" | "MetaRight" | "OSLeft" | "OSRight" => return Self::Super,
            _ => {}
        }

        if let Some(letter) = code.strip_prefix("Key") {
            if let [b @ b'A'..=b'Z'] = letter.as_bytes() {
                return Self::LETTERS[usize::from(b - b'A')];
            }
        }
        let digit = code.strip_prefix("Digit").or_else(|| code.strip_prefix("Numpad"));
        if let Some(digit) = digit {
            if let [b @ b'0'..=b'9'] = digit.as_bytes() {
                return Self::DIGITS[usize::from(b - b'0')];
            }
        }
        if let Some(n) = code.strip_prefix('F').and_then(|n| n.parse::<usize>().ok()) {
            if (1..=12).contains(&n) {
                return Self::FUNCTION[n - 1];
            }
        }
        Self::Unknown
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Control key is held.
    pub ctrl: bool,
    /// Alt key is held.
    pub alt: bool,
    /// Super/Command key is held.
    pub super_key: bool,
}

/// A normalized key press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    /// Physical key.
    pub key: Key,
    /// Printable character produced, if any.
    pub text: Option<char>,
    /// Modifiers held when the event fired.
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// A key with no printable text and no modifiers.
    #[must_use]
    pub const fn key(key: Key) -> Self {
        Self {
            key,
            text: None,
            modifiers: Modifiers {
                shift: false,
                ctrl: false,
                alt: false,
                super_key: false,
            },
        }
    }

    /// A printable character.
    #[must_use]
    pub fn char(c: char) -> Self {
        let key = if c == ' ' {
            Key::Space
        } else if c.is_ascii_alphabetic() {
            Key::LETTERS[usize::from(c.to_ascii_uppercase() as u8 - b'A')]
        } else if c.is_ascii_digit() {
            Key::DIGITS[usize::from(c as u8 - b'0')]
        } else {
            Key::Unknown
        };
        Self {
            text: Some(c),
            ..Self::key(key)
        }
    }
}

/// Event as the host reports it, in client pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Button pressed.
    MouseDown {
        /// Client X.
        client_x: f32,
        /// Client Y.
        client_y: f32,
        /// DOM-style button index.
        button: u16,
    },
    /// Button released.
    MouseUp {
        /// Client X.
        client_x: f32,
        /// Client Y.
        client_y: f32,
        /// DOM-style button index.
        button: u16,
    },
    /// Pointer moved.
    MouseMove {
        /// Client X.
        client_x: f32,
        /// Client Y.
        client_y: f32,
    },
    /// Wheel scrolled.
    Wheel {
        /// Client X.
        client_x: f32,
        /// Client Y.
        client_y: f32,
        /// Horizontal delta in pixels.
        delta_x: f32,
        /// Vertical delta in pixels.
        delta_y: f32,
    },
    /// Key pressed.
    KeyDown {
        /// Physical key identifier, e.g. `"KeyA"`.
        code: String,
        /// Produced value, e.g. `"a"` or `"Backspace"`.
        key: String,
    },
    /// Key released.
    KeyUp {
        /// Physical key identifier.
        code: String,
        /// Produced value.
        key: String,
    },
}

/// Canonical event consumed by the router, in logical canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed.
    PointerDown {
        /// Logical X.
        x: f32,
        /// Logical Y.
        y: f32,
        /// Button.
        button: MouseButton,
    },
    /// Pointer released.
    PointerUp {
        /// Logical X.
        x: f32,
        /// Logical Y.
        y: f32,
        /// Button.
        button: MouseButton,
    },
    /// Pointer moved.
    PointerMove {
        /// Logical X.
        x: f32,
        /// Logical Y.
        y: f32,
    },
    /// Wheel scrolled.
    Wheel {
        /// Logical X.
        x: f32,
        /// Logical Y.
        y: f32,
        /// Horizontal delta.
        delta_x: f32,
        /// Vertical delta.
        delta_y: f32,
    },
    /// Key pressed.
    KeyDown(KeyInput),
    /// Key released.
    KeyUp(KeyInput),
}

/// Maps client coordinates into the logical canvas.
pub trait CoordTransform {
    /// Converts a client-space point.
    fn to_logical(&self, client_x: f32, client_y: f32) -> Point;
}

impl<F> CoordTransform for F
where
    F: Fn(f32, f32) -> Point,
{
    fn to_logical(&self, client_x: f32, client_y: f32) -> Point {
        self(client_x, client_y)
    }
}

/// Letterboxed fit of the logical canvas inside a host area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Host pixels per logical pixel.
    pub scale: f32,
    /// Left edge of the canvas in client pixels.
    pub offset_x: f32,
    /// Top edge of the canvas in client pixels.
    pub offset_y: f32,
}

impl Viewport {
    /// Identity mapping.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset_x: 0.0,
        offset_y: 0.0,
    };

    /// Fits `logical` into `host`, preserving aspect ratio and centering.
    #[must_use]
    pub fn fit(host: Size, logical: Size) -> Self {
        if host.is_empty() || logical.is_empty() {
            return Self::IDENTITY;
        }
        let scale = (host.width / logical.width).min(host.height / logical.height);
        let scaled_w = (logical.width * scale).floor();
        let scaled_h = (logical.height * scale).floor();
        Self {
            scale,
            offset_x: ((host.width - scaled_w) * 0.5).floor(),
            offset_y: ((host.height - scaled_h) * 0.5).floor(),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl CoordTransform for Viewport {
    fn to_logical(&self, client_x: f32, client_y: f32) -> Point {
        Point::new(
            (client_x - self.offset_x) / self.scale,
            (client_y - self.offset_y) / self.scale,
        )
    }
}

/// Converts host events to [`InputEvent`]s and tracks pointer/key state.
pub struct InputNormalizer<T: CoordTransform = Viewport> {
    transform: T,
    pointer: Point,
    buttons_down: u8,
    keys_down: Vec<Key>,
}

impl<T: CoordTransform> InputNormalizer<T> {
    /// Creates a normalizer using `transform`.
    pub fn new(transform: T) -> Self {
        Self {
            transform,
            pointer: Point::ZERO,
            buttons_down: 0,
            keys_down: Vec::with_capacity(8),
        }
    }

    /// Replaces the transform, e.g. after a host resize.
    pub fn set_transform(&mut self, transform: T) {
        self.transform = transform;
    }

    /// Returns the transform.
    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Last pointer position in logical coordinates.
    #[must_use]
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Returns true if `button` is held.
    #[must_use]
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down & button.mask() != 0
    }

    /// Returns true if `key` is held.
    #[must_use]
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Current modifier state derived from held keys.
    #[must_use]
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            shift: self.is_key_down(Key::Shift),
            ctrl: self.is_key_down(Key::Control),
            alt: self.is_key_down(Key::Alt),
            super_key: self.is_key_down(Key::Super),
        }
    }

    fn locate(&mut self, client_x: f32, client_y: f32) -> Point {
        self.pointer = self.transform.to_logical(client_x, client_y);
        self.pointer
    }

    fn key_input(&self, code: &str, key: &str) -> KeyInput {
        let mut chars = key.chars();
        let text = match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => Some(c),
            _ => None,
        };
        KeyInput {
            key: Key::from_code(code),
            text,
            modifiers: self.modifiers(),
        }
    }

    /// Converts one host event.
    pub fn normalize(&mut self, event: &HostEvent) -> InputEvent {
        match *event {
            HostEvent::MouseDown { client_x, client_y, button } => {
                let p = self.locate(client_x, client_y);
                let button = MouseButton::from_index(button);
                self.buttons_down |= button.mask();
                InputEvent::PointerDown { x: p.x, y: p.y, button }
            }
            HostEvent::MouseUp { client_x, client_y, button } => {
                let p = self.locate(client_x, client_y);
                let button = MouseButton::from_index(button);
                self.buttons_down &= !button.mask();
                InputEvent::PointerUp { x: p.x, y: p.y, button }
            }
            HostEvent::MouseMove { client_x, client_y } => {
                let p = self.locate(client_x, client_y);
                InputEvent::PointerMove { x: p.x, y: p.y }
            }
            HostEvent::Wheel { client_x, client_y, delta_x, delta_y } => {
                let p = self.locate(client_x, client_y);
                InputEvent::Wheel { x: p.x, y: p.y, delta_x, delta_y }
            }
            HostEvent::KeyDown { ref code, ref key } => {
                let k = Key::from_code(code);
                if !self.keys_down.contains(&k) {
                    self.keys_down.push(k);
                }
                InputEvent::KeyDown(self.key_input(code, key))
            }
            HostEvent::KeyUp { ref code, ref key } => {
                let k = Key::from_code(code);
                self.keys_down.retain(|&held| held != k);
                InputEvent::KeyUp(self.key_input(code, key))
            }
        }
    }
}
