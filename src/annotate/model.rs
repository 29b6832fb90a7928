use crate::settings::{MAX_PEN_WIDTH, MIN_PEN_WIDTH};
use anyhow::bail;
use eframe::egui::{Color32, Pos2};

pub const MIN_ZOOM_FACTOR: f64 = 1.0;
pub const MAX_ZOOM_FACTOR: f64 = 10.0;

/// Magnification of a zoom window: within `[1.0, 10.0]`, one decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    pub fn new(value: f64) -> anyhow::Result<Self> {
        if !value.is_finite() {
            bail!("zoom factor must be a number");
        }
        let rounded = (value * 10.0).round() / 10.0;
        if !(MIN_ZOOM_FACTOR..=MAX_ZOOM_FACTOR).contains(&rounded) {
            bail!(
                "zoom factor {value} outside {MIN_ZOOM_FACTOR:.1}..={MAX_ZOOM_FACTOR:.1}"
            );
        }
        Ok(Self(rounded))
    }

    /// Like [`ZoomFactor::new`] but pulls out-of-range values to the nearest
    /// bound. Non-numbers become the default.
    pub fn clamped(value: f64) -> Self {
        if !value.is_finite() {
            return Self::default();
        }
        let rounded = (value * 10.0).round() / 10.0;
        Self(rounded.clamp(MIN_ZOOM_FACTOR, MAX_ZOOM_FACTOR))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(2.0)
    }
}

impl std::fmt::Display for ZoomFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

/// Pen of a zoom window. `last_point` is only set while a stroke is being
/// drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenState {
    pub color: Color32,
    width: u32,
    last_point: Option<Pos2>,
}

impl PenState {
    pub fn new(color: Color32, width: u32) -> Self {
        Self {
            color,
            width: width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH),
            last_point: None,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width.clamp(MIN_PEN_WIDTH, MAX_PEN_WIDTH);
    }

    pub fn last_point(&self) -> Option<Pos2> {
        self.last_point
    }

    pub fn is_drawing(&self) -> bool {
        self.last_point.is_some()
    }

    pub(crate) fn begin(&mut self, p: Pos2) {
        self.last_point = Some(p);
    }

    /// Advance the stroke to `p`, returning the segment to paint.
    pub(crate) fn advance(&mut self, p: Pos2) -> Option<(Pos2, Pos2)> {
        let from = self.last_point?;
        self.last_point = Some(p);
        Some((from, p))
    }

    pub(crate) fn end(&mut self) {
        self.last_point = None;
    }
}

impl Default for PenState {
    fn default() -> Self {
        Self::new(Color32::RED, 3)
    }
}
