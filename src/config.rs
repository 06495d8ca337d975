//! Configuration persistence for boxmark settings

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::AnnotationMode;
use crate::error::AnnotatorError;

/// Serializable color representation for config storage
///
/// Channels are in `0.0..=1.0`; out-of-range values read from disk are
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredColor")]
pub struct ShapeColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

/// On-disk form of [`ShapeColor`] before clamping
#[derive(Deserialize)]
struct StoredColor {
    r: f32,
    g: f32,
    b: f32,
}

impl From<StoredColor> for ShapeColor {
    fn from(c: StoredColor) -> Self {
        Self {
            r: c.r.clamp(0.0, 1.0),
            g: c.g.clamp(0.0, 1.0),
            b: c.b.clamp(0.0, 1.0),
        }
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self {
            r: 0.9,
            g: 0.1,
            b: 0.1,
        }
    }
}

impl ShapeColor {
    /// Create a color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
        }
    }

    /// Convert to image crate RGBA format (0-255)
    pub fn to_rgba_u8(self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            255,
        ]
    }
}

/// Accepts `#rrggbb` and `#rgb`, the leading `#` is optional
impl FromStr for ShapeColor {
    type Err = AnnotatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnnotatorError::InvalidColor(s.to_string());
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::from_rgb8(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                Ok(Self::from_rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for ShapeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba_u8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Folder annotated images are saved into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SaveLocation {
    #[default]
    Downloads,
    Pictures,
    Documents,
}

/// Application configuration persisted between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Annotation mode selected at startup
    pub default_mode: AnnotationMode,
    /// Stroke and fill color selected at startup
    pub default_color: ShapeColor,
    /// Where downloads are written
    pub save_location: SaveLocation,
    /// Pause before rendering while the loading indicator is shown
    pub render_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_mode: AnnotationMode::Box,
            default_color: ShapeColor::default(),
            save_location: SaveLocation::Downloads,
            render_delay_ms: 500,
        }
    }
}

impl AppConfig {
    /// Directory name under the platform config dir
    pub const ID: &'static str = "boxmark";

    /// Default config file location, if the platform has a config dir
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::ID).join("config.json"))
    }

    /// Load configuration from disk, or return defaults if unavailable
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            log::warn!("No config directory, using defaults");
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Error loading config, using defaults: {:?}", err);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text).with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }
}
