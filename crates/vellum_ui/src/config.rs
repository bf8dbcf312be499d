//! Toolkit configuration, loaded once at startup from TOML.
//!
//! ```toml
//! [canvas]
//! width = 1024
//! height = 768
//!
//! [theme.colors]
//! accent = "#FFDD44"
//! panel = "rgba(30, 40, 60, 0.9)"
//! ```
//!
//! Every field is optional; missing values fall back to the classic theme
//! and a 1024×768 canvas.

use std::path::Path;

use serde::Deserialize;

use crate::error::{UiError, UiResult};
use crate::geometry::Size;
use crate::style::Theme;

/// Logical canvas dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Logical width in design pixels.
    pub width: f32,
    /// Logical height in design pixels.
    pub height: f32,
}

impl CanvasConfig {
    /// Default design canvas.
    pub const DEFAULT: Self = Self {
        width: 1024.0,
        height: 768.0,
    };

    /// Returns the canvas as a [`Size`].
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UiConfig {
    /// Canvas section.
    pub canvas: CanvasConfig,
    /// Theme section.
    pub theme: Theme,
}

impl UiConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] for malformed TOML, unknown sections,
    /// bad colors or a non-positive canvas.
    pub fn from_toml_str(source: &str) -> UiResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| UiError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        tracing::debug!(
            "Loaded UI config: canvas {}x{}",
            config.canvas.width,
            config.canvas.height
        );
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigRead`] if the file cannot be read, otherwise
    /// the same errors as [`UiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| UiError::ConfigRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks value ranges serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> UiResult<()> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(UiError::InvalidConfig(format!(
                "canvas must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        if self.theme.scrollbar.width <= 0.0 {
            return Err(UiError::InvalidConfig(
                "theme.scrollbar.width must be positive".to_string(),
            ));
        }
        if self.theme.fonts.body.size <= 0.0 {
            return Err(UiError::InvalidConfig(
                "theme.fonts.body.size must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
