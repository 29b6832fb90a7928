use crate::annotate::save::default_file_name;
use crate::annotate::ZoomSession;
use crate::common::file_dialog;
use crate::gui::input::pointer_events;
use crate::gui::prompts::{ColorPrompt, PromptResult};
use crate::gui::status::{StatusLine, LONG_STATUS, SHORT_STATUS};
use crate::gui::{show_child_window, WindowSpec};
use crate::settings::{MAX_PEN_WIDTH, MIN_PEN_WIDTH};
use crate::view::display::to_color_image;
use crate::view::{PointerEvent, SurfaceMapping};
use eframe::egui::{self, pos2, Color32, Rect, Sense, TextureHandle, TextureOptions, Vec2};
use std::path::Path;

const STATUS_HEIGHT: f32 = 24.0;

/// Window showing the enlarged region with a pen for annotations.
pub struct ZoomWindow {
    seq: u64,
    id: egui::Id,
    pub open: bool,
    title: String,
    session: ZoomSession,
    texture: Option<TextureHandle>,
    uploaded_revision: Option<u64>,
    status: StatusLine,
    color_prompt: Option<ColorPrompt>,
}

impl ZoomWindow {
    pub fn new(seq: u64, session: ZoomSession) -> Self {
        let title = match session.region() {
            Some(region) => format!("Zoom {} of {region}", session.factor()),
            None => format!("Zoom {}", session.factor()),
        };
        Self {
            seq,
            id: egui::Id::new(("zoom", seq)),
            open: true,
            title,
            session,
            texture: None,
            uploaded_revision: None,
            status: StatusLine::default(),
            color_prompt: None,
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn session(&self) -> &ZoomSession {
        &self.session
    }

    pub fn status(&mut self) -> Option<&str> {
        self.status.current()
    }

    /// Save the annotated image and report the outcome on the status line.
    pub fn save_to(&mut self, path: &Path) -> bool {
        match self.session.save(path) {
            Ok(written) => {
                tracing::info!(path = %written.display(), "zoom image saved");
                self.status.show("Image saved", LONG_STATUS);
                true
            }
            Err(e) => {
                tracing::error!("failed to save zoom image: {e:#}");
                self.status.show(format!("Save failed: {e}"), LONG_STATUS);
                false
            }
        }
    }

    fn save_with_dialog(&mut self) {
        let name = default_file_name(chrono::Local::now());
        if let Some(path) = file_dialog::pick_save_path(&name) {
            self.save_to(&path);
        }
    }

    pub fn clear(&mut self) {
        self.session.clear();
        self.status.show("Drawing cleared", SHORT_STATUS);
    }

    pub fn set_pen_color(&mut self, color: Color32) {
        self.session.set_pen_color(color);
        self.status.show("Pen color changed", SHORT_STATUS);
    }

    pub fn set_pen_width(&mut self, width: u32) {
        self.session.set_pen_width(width);
        self.status.show(
            format!("Pen width: {}", self.session.pen().width()),
            SHORT_STATUS,
        );
    }

    /// The zoomed image is shown unscaled, so surface coordinates are buffer
    /// coordinates.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        mapping: &SurfaceMapping,
        hovered: bool,
    ) -> bool {
        if self.color_prompt.is_some() {
            return false;
        }
        match event {
            PointerEvent::Press { pos, button, .. } => {
                let p = mapping.window_to_surface(pos);
                hovered && mapping.contains(p) && self.session.handle_press(p, button)
            }
            PointerEvent::Move { pos } => self.session.handle_move(mapping.window_to_surface(pos)),
            PointerEvent::Release { pos, button } => self
                .session
                .handle_release(mapping.window_to_surface(pos), button),
        }
    }

    fn refresh_texture(&mut self, ctx: &egui::Context) {
        let revision = self.session.revision();
        if self.uploaded_revision == Some(revision) {
            return;
        }
        let image = to_color_image(self.session.drawing_buffer());
        match &mut self.texture {
            Some(tex) => tex.set(image, TextureOptions::LINEAR),
            None => {
                self.texture = Some(ctx.load_texture(
                    format!("zoom-{}", self.seq),
                    image,
                    TextureOptions::LINEAR,
                ))
            }
        }
        self.uploaded_revision = Some(revision);
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                self.save_with_dialog();
            }
            if ui.button("Pen Color").clicked() {
                self.color_prompt = Some(ColorPrompt::new(self.session.pen().color));
            }
            let (swatch, _) = ui.allocate_exact_size(Vec2::splat(16.0), Sense::hover());
            ui.painter()
                .rect_filled(swatch, 2.0, self.session.pen().color);
            if ui.button("Clear").clicked() {
                self.clear();
            }
            ui.separator();
            ui.label("Pen width:");
            let mut width = self.session.pen().width();
            if ui
                .add(egui::Slider::new(&mut width, MIN_PEN_WIDTH..=MAX_PEN_WIDTH))
                .changed()
            {
                self.set_pen_width(width);
            }
        });
    }

    fn contents(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        self.toolbar(ui);
        ui.separator();
        egui::ScrollArea::both()
            .max_height((ui.available_height() - STATUS_HEIGHT).max(0.0))
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let size = {
                    let buf = self.session.drawing_buffer();
                    Vec2::new(buf.width() as f32, buf.height() as f32)
                };
                let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
                if let Some(tex) = &self.texture {
                    painter.image(
                        tex.id(),
                        response.rect,
                        Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
                let buffer_size = [size.x as u32, size.y as u32];
                let mapping = SurfaceMapping::new(response.rect, Some(buffer_size));
                let hovered = response.hovered();
                let mut changed = false;
                for event in pointer_events(ctx) {
                    changed |= self.handle_pointer(event, &mapping, hovered);
                }
                if changed {
                    ctx.request_repaint();
                }
            });
        match self.status.current() {
            Some(text) => ui.label(text),
            None => ui.label(""),
        };

        if let Some(remaining) = self.status.remaining() {
            ctx.request_repaint_after(remaining);
        }

        if let Some(prompt) = self.color_prompt.as_mut() {
            match prompt.ui(ctx, self.id.with("pen_color")) {
                PromptResult::Accepted(color) => {
                    self.color_prompt = None;
                    self.set_pen_color(color);
                }
                PromptResult::Cancelled => self.color_prompt = None,
                PromptResult::Pending => {}
            }
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        if !self.open {
            return;
        }
        self.refresh_texture(ctx);
        let mut open = self.open;
        let title = self.title.clone();
        let spec = WindowSpec {
            seq: self.seq,
            id: self.id,
            title: &title,
            size: Vec2::new(800.0, 600.0),
            resizable: true,
        };
        show_child_window(ctx, spec, &mut open, |ctx, ui, _host| self.contents(ctx, ui));
        if !open {
            tracing::debug!(seq = self.seq, "zoom window closed");
        }
        self.open = open;
    }
}
