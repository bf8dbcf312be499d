//! Styling: colors, fonts and the theme every widget paints with.
//!
//! The default theme is the classic blue-panel look: white text with a black
//! drop shadow, gold accents, translucent navy controls with a pale blue
//! border. Every value can be overridden from TOML (see [`crate::config`]).

use std::borrow::Cow;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::UiError;

/// RGBA color, components in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates a color from 8-bit channels and a 0-1 alpha, like CSS `rgba()`.
    #[must_use]
    pub const fn rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::rgba(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a)
    }

    /// Creates a color from hex value (0xRRGGBBAA).
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 24) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let b = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let a = (hex & 0xFF) as f32 / 255.0;
        Self::rgba(r, g, b, a)
    }

    /// Creates an opaque color from a 24-bit value (0xRRGGBB).
    #[must_use]
    pub const fn hex_rgb(hex: u32) -> Self {
        Self::hex((hex << 8) | 0xFF)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Returns this color with its alpha scaled by `factor`.
    #[must_use]
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for Color {
    type Err = UiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || UiError::InvalidColor(s.to_string());

        if let Some(digits) = s.strip_prefix('#') {
            if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
            return match digits.len() {
                3 => {
                    let r = (value >> 8) & 0xF;
                    let g = (value >> 4) & 0xF;
                    let b = value & 0xF;
                    Ok(Self::hex_rgb(((r * 17) << 16) | ((g * 17) << 8) | (b * 17)))
                }
                6 => Ok(Self::hex_rgb(value)),
                8 => Ok(Self::hex(value)),
                _ => Err(invalid()),
            };
        }

        let body = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts = body
            .split(',')
            .map(|part| part.trim().parse::<f32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;

        match parts.as_slice() {
            [r, g, b] => Ok(Self::rgb(r / 255.0, g / 255.0, b / 255.0)),
            [r, g, b, a] => Ok(Self::rgba(r / 255.0, g / 255.0, b / 255.0, a.clamp(0.0, 1.0))),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = UiError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A font description handed to the paint backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FontSpec {
    /// CSS-style family list.
    pub family: Cow<'static, str>,
    /// Pixel size.
    pub size: f32,
    /// Bold weight.
    #[serde(default)]
    pub bold: bool,
}

impl FontSpec {
    /// Creates a font spec.
    #[must_use]
    pub const fn new(family: &'static str, size: f32, bold: bool) -> Self {
        Self {
            family: Cow::Borrowed(family),
            size,
            bold,
        }
    }
}

/// Named font slots in the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontKey {
    /// Page titles.
    Title,
    /// Button captions.
    Button,
    /// Regular text.
    #[default]
    Body,
    /// Small print.
    Small,
}

/// Font table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fonts {
    /// Title font.
    pub title: FontSpec,
    /// Button font.
    pub button: FontSpec,
    /// Body font.
    pub body: FontSpec,
    /// Small font.
    pub small: FontSpec,
}

impl Fonts {
    const FAMILY: &'static str = "Arial, sans-serif";

    /// Classic font table.
    pub const CLASSIC: Self = Self {
        title: FontSpec::new(Self::FAMILY, 48.0, true),
        button: FontSpec::new(Self::FAMILY, 28.0, true),
        body: FontSpec::new(Self::FAMILY, 18.0, false),
        small: FontSpec::new(Self::FAMILY, 14.0, false),
    };
}

impl Default for Fonts {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Shared palette.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Regular text.
    pub text: Color,
    /// Drop shadow under text.
    pub text_shadow: Color,
    /// Title / emphasis text.
    pub highlight: Color,
    /// Greyed-out text.
    pub disabled: Color,
    /// Placeholder text in empty fields.
    pub placeholder: Color,
    /// Accent for checkmarks, carets, selected rows and thumbs.
    pub accent: Color,
    /// Accent while dragging or hovered.
    pub accent_hot: Color,
    /// Outline for every control.
    pub border: Color,
    /// List and grid backgrounds.
    pub panel: Color,
    /// Dropdown list background.
    pub popup: Color,
    /// Idle control fill (checkbox box, dropdown header).
    pub control: Color,
    /// Hovered control fill.
    pub control_hover: Color,
    /// Text field fill.
    pub field: Color,
    /// Focused text field fill.
    pub field_focused: Color,
    /// Hovered row fill.
    pub row_hover: Color,
    /// Selected row fill.
    pub row_selected: Color,
    /// Idle grid cell fill.
    pub cell: Color,
    /// Filled part of a slider track.
    pub track_fill: Color,
    /// Empty part of a slider track.
    pub track: Color,
}

impl Palette {
    /// Classic palette.
    pub const CLASSIC: Self = Self {
        text: Color::WHITE,
        text_shadow: Color::BLACK,
        highlight: Color::hex_rgb(0xFF_CC_00),
        disabled: Color::hex_rgb(0x88_88_88),
        placeholder: Color::rgba(1.0, 1.0, 1.0, 0.4),
        accent: Color::hex_rgb(0xFF_DD_44),
        accent_hot: Color::hex_rgb(0xFF_EE_88),
        border: Color::hex_rgb(0x88_AA_DD),
        panel: Color::rgba8(30, 40, 60, 0.9),
        popup: Color::rgba8(40, 50, 70, 0.98),
        control: Color::rgba8(60, 80, 120, 0.85),
        control_hover: Color::rgba8(80, 110, 160, 0.9),
        field: Color::rgba8(40, 50, 70, 0.85),
        field_focused: Color::rgba8(50, 70, 100, 0.95),
        row_hover: Color::rgba8(60, 80, 120, 0.7),
        row_selected: Color::rgba8(80, 110, 160, 0.9),
        cell: Color::rgba8(50, 60, 80, 0.6),
        track_fill: Color::hex_rgb(0x44_88_CC),
        track: Color::rgba8(40, 50, 70, 0.8),
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Button metrics and state colors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ButtonStyle {
    /// Default width.
    pub width: f32,
    /// Default height.
    pub height: f32,
    /// Corner radius.
    pub corner_radius: f32,
    /// Idle fill.
    pub background: Color,
    /// Hovered fill.
    pub background_hover: Color,
    /// Pressed fill.
    pub background_active: Color,
    /// Disabled fill.
    pub background_disabled: Color,
    /// Border color.
    pub border: Color,
    /// Border width.
    pub border_width: f32,
    /// Caption color.
    pub text: Color,
    /// Hovered caption color.
    pub text_hover: Color,
}

impl ButtonStyle {
    /// Classic button style.
    pub const CLASSIC: Self = Self {
        width: 260.0,
        height: 50.0,
        corner_radius: 8.0,
        background: Color::rgba8(60, 80, 120, 0.85),
        background_hover: Color::rgba8(80, 110, 160, 0.95),
        background_active: Color::rgba8(40, 60, 90, 0.95),
        background_disabled: Color::rgba8(40, 40, 40, 0.7),
        border: Color::hex_rgb(0x88_AA_DD),
        border_width: 2.0,
        text: Color::WHITE,
        text_hover: Color::hex_rgb(0xFF_EE_88),
    };
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Scrollbar metrics and colors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollbarStyle {
    /// Bar width.
    pub width: f32,
    /// Minimum thumb length.
    pub min_thumb: f32,
    /// Track fill.
    pub track: Color,
    /// Thumb fill.
    pub thumb: Color,
    /// Thumb fill while dragging.
    pub thumb_active: Color,
}

impl ScrollbarStyle {
    /// Classic scrollbar style.
    pub const CLASSIC: Self = Self {
        width: 14.0,
        min_thumb: 30.0,
        track: Color::rgba8(50, 60, 80, 0.8),
        thumb: Color::hex_rgb(0x88_AA_DD),
        thumb_active: Color::hex_rgb(0xFF_DD_44),
    };
}

impl Default for ScrollbarStyle {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// One stop of a vertical gradient.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, 0-1.
    pub offset: f32,
    /// Color at this stop.
    pub color: Color,
}

impl GradientStop {
    /// Creates a stop.
    #[must_use]
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

const CLASSIC_BACKDROP: [GradientStop; 4] = [
    GradientStop::new(0.0, Color::hex_rgb(0x1A_3A_5C)),
    GradientStop::new(0.4, Color::hex_rgb(0x2D_5A_7B)),
    GradientStop::new(0.7, Color::hex_rgb(0x4A_7A_9A)),
    GradientStop::new(1.0, Color::hex_rgb(0x2D_5A_7B)),
];

/// Complete theme for the UI.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Fonts.
    pub fonts: Fonts,
    /// Colors.
    pub colors: Palette,
    /// Button metrics.
    pub button: ButtonStyle,
    /// Scrollbar metrics.
    pub scrollbar: ScrollbarStyle,
    /// Page background gradient, top to bottom.
    pub backdrop: Cow<'static, [GradientStop]>,
    /// Offset of text drop shadows.
    pub shadow_offset: f32,
}

impl Theme {
    /// Classic blue-panel theme.
    pub const CLASSIC: Self = Self {
        fonts: Fonts::CLASSIC,
        colors: Palette::CLASSIC,
        button: ButtonStyle::CLASSIC,
        scrollbar: ScrollbarStyle::CLASSIC,
        backdrop: Cow::Borrowed(&CLASSIC_BACKDROP),
        shadow_offset: 2.0,
    };

    /// Returns the font for a slot.
    #[must_use]
    pub fn font(&self, key: FontKey) -> &FontSpec {
        match key {
            FontKey::Title => &self.fonts.title,
            FontKey::Button => &self.fonts.button,
            FontKey::Body => &self.fonts.body,
            FontKey::Small => &self.fonts.small,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::CLASSIC
    }
}
