use anyhow::Context;
use eframe::egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";

pub const MIN_PEN_WIDTH: u32 = 1;
pub const MAX_PEN_WIDTH: u32 = 20;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file receiving a copy of every log line.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Size of the viewer's display surface. Loaded images are stretched to
    /// fill it.
    #[serde(default = "default_surface_size")]
    pub surface_size: (u32, u32),
    /// Initial pen color of zoom windows as `#rrggbb`.
    #[serde(default = "default_pen_color")]
    pub pen_color: String,
    #[serde(default = "default_pen_width")]
    pub pen_width: u32,
    /// Value pre-filled in the zoom factor prompt.
    #[serde(default = "default_zoom_factor")]
    pub default_zoom_factor: f64,
    #[serde(default = "default_zoom_in_factor")]
    pub zoom_in_factor: f64,
    #[serde(default = "default_zoom_out_factor")]
    pub zoom_out_factor: f64,
    /// Enable toast notifications in the UI.
    #[serde(default = "default_toasts")]
    pub enable_toasts: bool,
    /// Duration of toast notifications in seconds.
    #[serde(default = "default_toast_duration")]
    pub toast_duration: f32,
}

fn default_surface_size() -> (u32, u32) {
    (300, 200)
}

fn default_pen_color() -> String {
    "#ff0000".into()
}

fn default_pen_width() -> u32 {
    3
}

fn default_zoom_factor() -> f64 {
    2.0
}

fn default_zoom_in_factor() -> f64 {
    1.5
}

fn default_zoom_out_factor() -> f64 {
    0.5
}

fn default_toasts() -> bool {
    true
}

fn default_toast_duration() -> f32 {
    3.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            surface_size: default_surface_size(),
            pen_color: default_pen_color(),
            pen_width: default_pen_width(),
            default_zoom_factor: default_zoom_factor(),
            zoom_in_factor: default_zoom_in_factor(),
            zoom_out_factor: default_zoom_out_factor(),
            enable_toasts: default_toasts(),
            toast_duration: default_toast_duration(),
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing or empty file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("parse settings file {}", path.display()))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("write settings file {}", path.display()))?;
        Ok(())
    }

    /// Initial pen color, falling back to red when the configured value
    /// cannot be parsed.
    pub fn pen_color(&self) -> Color32 {
        match parse_hex_color(&self.pen_color) {
            Some(c) => c,
            None => {
                tracing::warn!(
                    "pen color '{}' is not a #rrggbb value; using red",
                    self.pen_color
                );
                Color32::RED
            }
        }
    }

    pub fn pen_width(&self) -> u32 {
        self.pen_width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH)
    }

    /// Surface size with both sides forced to at least one pixel.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_size.0.max(1), self.surface_size.1.max(1))
    }
}

/// Parse a hex color string such as `#ff0000`.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}
