use crate::annotate::model::{PenState, ZoomFactor};
use crate::annotate::render::draw_segment;
use crate::annotate::save::save_rgba;
use crate::view::display::scale_smooth;
use crate::view::{DisplayImage, SelectionRect};
use eframe::egui::{Color32, PointerButton, Pos2};
use image::RgbaImage;
use std::path::{Path, PathBuf};

/// Everything a zoom window owns: the cropped region, its enlarged rendering
/// and the drawing buffer the pen paints into.
///
/// Only `drawing_buffer` changes after construction and it always has the
/// dimensions of `rendered_zoom`.
#[derive(Debug, Clone)]
pub struct ZoomSession {
    region: Option<SelectionRect>,
    factor: ZoomFactor,
    original_crop: RgbaImage,
    rendered_zoom: RgbaImage,
    drawing_buffer: RgbaImage,
    pen: PenState,
    revision: u64,
}

impl ZoomSession {
    /// Crop `rect` out of `source` and enlarge it by `factor`.
    pub fn new(source: &DisplayImage, rect: SelectionRect, factor: ZoomFactor, pen: PenState) -> Self {
        let mut session = Self::from_crop(source.crop(rect), factor, pen);
        session.region = Some(rect);
        session
    }

    pub fn from_crop(crop: RgbaImage, factor: ZoomFactor, pen: PenState) -> Self {
        let rendered_zoom = scale_smooth(&crop, factor.get());
        let drawing_buffer = rendered_zoom.clone();
        tracing::debug!(
            crop_w = crop.width(),
            crop_h = crop.height(),
            zoom_w = rendered_zoom.width(),
            zoom_h = rendered_zoom.height(),
            %factor,
            "zoom session created"
        );
        Self {
            region: None,
            factor,
            original_crop: crop,
            rendered_zoom,
            drawing_buffer,
            pen,
            revision: 0,
        }
    }

    /// Source rectangle in the viewer's image, when created from a selection.
    pub fn region(&self) -> Option<SelectionRect> {
        self.region
    }

    pub fn factor(&self) -> ZoomFactor {
        self.factor
    }

    pub fn original_crop(&self) -> &RgbaImage {
        &self.original_crop
    }

    pub fn rendered_zoom(&self) -> &RgbaImage {
        &self.rendered_zoom
    }

    pub fn drawing_buffer(&self) -> &RgbaImage {
        &self.drawing_buffer
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    /// Counter bumped on every change of the drawing buffer.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_drawing(&self) -> bool {
        self.pen.is_drawing()
    }

    /// Start a stroke at `p` (buffer coordinates).
    pub fn handle_press(&mut self, p: Pos2, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        self.pen.begin(p);
        true
    }

    /// Paint from the previous point to `p` while a stroke is in progress.
    /// Returns whether the buffer changed.
    pub fn handle_move(&mut self, p: Pos2) -> bool {
        match self.pen.advance(p) {
            Some((from, to)) => {
                self.paint(from, to);
                true
            }
            None => false,
        }
    }

    /// Paint the final segment and end the stroke.
    pub fn handle_release(&mut self, p: Pos2, button: PointerButton) -> bool {
        if button != PointerButton::Primary || !self.pen.is_drawing() {
            return false;
        }
        let changed = self.handle_move(p);
        self.pen.end();
        changed
    }

    fn paint(&mut self, from: Pos2, to: Pos2) {
        draw_segment(
            &mut self.drawing_buffer,
            from,
            to,
            self.pen.color,
            self.pen.width(),
        );
        self.revision += 1;
    }

    /// Throw away every stroke.
    pub fn clear(&mut self) {
        self.drawing_buffer = self.rendered_zoom.clone();
        self.pen.end();
        self.revision += 1;
    }

    pub fn set_pen_color(&mut self, color: Color32) {
        self.pen.color = color;
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.pen.set_width(width);
    }

    /// Write the drawing buffer to `path`. See [`save_rgba`].
    pub fn save(&self, path: &Path) -> anyhow::Result<PathBuf> {
        save_rgba(&self.drawing_buffer, path)
    }
}
