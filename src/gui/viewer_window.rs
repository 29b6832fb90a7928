use crate::annotate::{PenState, ZoomFactor, ZoomSession};
use crate::common::file_dialog;
use crate::gui::input::pointer_events;
use crate::gui::prompts::{PromptResult, ZoomPrompt};
use crate::gui::{show_child_window, AppRequest, Host, Shortcuts, WindowSpec};
use crate::settings::Settings;
use crate::view::{
    DisplayImage, PointerEvent, SelectionOutcome, SelectionTracker, SurfaceMapping,
};
use eframe::egui::{self, pos2, Color32, Pos2, Rect, Sense, Stroke, TextureHandle, TextureOptions, Vec2};
use egui_toast::ToastKind;
use std::path::Path;

pub const VIEWER_TITLE: &str = "Image Viewer";
pub const RESULT_TITLE: &str = "Result";

/// Size of a native window that fits the menu bar, a surface of `surface`
/// size and the label under it.
pub fn viewer_window_size(surface: Vec2) -> Vec2 {
    surface + Vec2::new(24.0, 72.0)
}

/// Window showing one image stretched over a fixed-size surface.
///
/// Ctrl + drag on the surface selects a region; releasing the mouse asks for a
/// zoom factor and then hands a [`ZoomSession`] to the application.
pub struct ViewerWindow {
    seq: u64,
    id: egui::Id,
    pub open: bool,
    title: String,
    image: Option<DisplayImage>,
    texture: Option<TextureHandle>,
    texture_stale: bool,
    surface_size: Vec2,
    selection: SelectionTracker,
    zoom_prompt: Option<ZoomPrompt>,
    default_zoom: ZoomFactor,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
    pen: PenState,
    primary: bool,
    activated: bool,
}

impl ViewerWindow {
    pub fn new(seq: u64, title: impl Into<String>, settings: &Settings) -> Self {
        let (w, h) = settings.surface_size();
        Self {
            seq,
            id: egui::Id::new(("viewer", seq)),
            open: true,
            title: title.into(),
            image: None,
            texture: None,
            texture_stale: false,
            surface_size: Vec2::new(w as f32, h as f32),
            selection: SelectionTracker::default(),
            zoom_prompt: None,
            default_zoom: ZoomFactor::clamped(settings.default_zoom_factor),
            zoom_in_factor: settings.zoom_in_factor,
            zoom_out_factor: settings.zoom_out_factor,
            pen: PenState::new(settings.pen_color(), settings.pen_width()),
            primary: false,
            activated: false,
        }
    }

    pub fn with_image(mut self, image: DisplayImage) -> Self {
        self.load_image(image);
        self
    }

    /// Host this viewer in the application's main native window. Closing that
    /// window ends the application.
    pub(crate) fn into_primary(mut self) -> Self {
        self.primary = true;
        self
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn image(&self) -> Option<&DisplayImage> {
        self.image.as_ref()
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn zoom_prompt(&self) -> Option<&ZoomPrompt> {
        self.zoom_prompt.as_ref()
    }

    /// Whether the user pressed inside this window during the last frame.
    /// Only tracked for viewers sharing the main window's input.
    pub fn take_activated(&mut self) -> bool {
        std::mem::take(&mut self.activated)
    }

    /// Replace the displayed image. Any selection in progress is dropped.
    pub fn load_image(&mut self, image: DisplayImage) {
        self.image = Some(image);
        self.texture_stale = true;
        self.selection.cancel();
        self.zoom_prompt = None;
    }

    /// Mapping for the surface placed with its top-left corner at `origin`.
    pub fn surface_mapping(&self, origin: Pos2) -> SurfaceMapping {
        SurfaceMapping::new(
            Rect::from_min_size(origin, self.surface_size),
            self.image.as_ref().map(|i| i.size()),
        )
    }

    /// Load `path` into this window when it is still empty, otherwise ask for
    /// a new viewer. Decode failures leave the current image untouched.
    pub fn open_path(&mut self, path: &Path) -> Option<AppRequest> {
        match DisplayImage::open(path) {
            Ok(image) if self.image.is_none() => {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    self.title = format!("{VIEWER_TITLE} - {name}");
                }
                self.load_image(image);
                None
            }
            Ok(image) => {
                let name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or(VIEWER_TITLE);
                Some(AppRequest::OpenViewer {
                    title: format!("{VIEWER_TITLE} - {name}"),
                    image,
                })
            }
            Err(e) => {
                tracing::warn!("failed to open image: {e:#}");
                Some(AppRequest::Notify {
                    kind: ToastKind::Error,
                    text: format!("Failed to open image: {e}"),
                })
            }
        }
    }

    pub fn open_with_dialog(&mut self) -> Option<AppRequest> {
        let path = file_dialog::pick_image()?;
        self.open_path(&path)
    }

    fn scaled_copy(&self, factor: f64) -> Option<AppRequest> {
        let image = self.image.as_ref()?;
        let scaled = image.scaled(factor);
        tracing::info!(
            factor,
            width = scaled.size()[0],
            height = scaled.size()[1],
            "scaled image into new viewer"
        );
        Some(AppRequest::OpenViewer {
            title: RESULT_TITLE.into(),
            image: scaled,
        })
    }

    pub fn zoom_in(&self) -> Option<AppRequest> {
        self.scaled_copy(self.zoom_in_factor)
    }

    pub fn zoom_out(&self) -> Option<AppRequest> {
        self.scaled_copy(self.zoom_out_factor)
    }

    /// Feed one pointer event to the selection state machine. `hovered`
    /// tells whether the surface is the topmost widget under the pointer.
    /// Returns whether the surface needs a repaint.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        mapping: &SurfaceMapping,
        hovered: bool,
    ) -> bool {
        if self.zoom_prompt.is_some() {
            return false;
        }
        match event {
            PointerEvent::Press {
                pos,
                button,
                modifiers,
            } => {
                hovered
                    && self.selection.handle_press(
                        mapping.window_to_surface(pos),
                        button,
                        modifiers,
                        mapping,
                    )
            }
            PointerEvent::Move { pos } => self.selection.handle_move(mapping.window_to_surface(pos)),
            PointerEvent::Release { pos, button } => {
                match self
                    .selection
                    .handle_release(mapping.window_to_surface(pos), button, mapping)
                {
                    SelectionOutcome::Accepted(rect) => {
                        self.zoom_prompt = Some(ZoomPrompt::new(rect, self.default_zoom));
                        true
                    }
                    SelectionOutcome::Discarded => true,
                    SelectionOutcome::Ignored => false,
                }
            }
        }
    }

    /// Build the zoom session for the pending selection.
    pub fn confirm_zoom(&mut self, factor: ZoomFactor) -> Option<AppRequest> {
        let prompt = self.zoom_prompt.take()?;
        let image = self.image.as_ref()?;
        let region = prompt.region();
        tracing::info!(%region, %factor, "opening zoom window");
        Some(AppRequest::OpenZoom(ZoomSession::new(
            image, region, factor, self.pen,
        )))
    }

    pub fn cancel_zoom(&mut self) {
        if self.zoom_prompt.take().is_some() {
            tracing::debug!("zoom prompt cancelled");
        }
    }

    fn paint_surface(&mut self, ctx: &egui::Context, painter: &egui::Painter, rect: Rect) {
        let Some(image) = &self.image else {
            painter.rect_filled(rect, 0.0, Color32::WHITE);
            return;
        };
        if self.texture_stale || self.texture.is_none() {
            self.texture = Some(ctx.load_texture(
                format!("viewer-{}", self.seq),
                image.to_color_image(),
                TextureOptions::LINEAR,
            ));
            self.texture_stale = false;
        }
        if let Some(tex) = &self.texture {
            painter.image(
                tex.id(),
                rect,
                Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }
    }

    fn paint_overlay(&self, painter: &egui::Painter, mapping: &SurfaceMapping) {
        let Some(r) = self.selection.overlay(mapping) else {
            return;
        };
        let outline = [
            r.left_top(),
            r.right_top(),
            r.right_bottom(),
            r.left_bottom(),
            r.left_top(),
        ];
        painter.extend(egui::Shape::dashed_line(
            &outline,
            Stroke::new(1.0, Color32::BLACK),
            4.0,
            3.0,
        ));
    }

    /// React to the keyboard shortcuts read for this viewer.
    pub(crate) fn apply_shortcuts(&mut self, keys: Shortcuts) -> Option<AppRequest> {
        if keys.quit {
            Some(AppRequest::Exit)
        } else if keys.open {
            self.open_with_dialog()
        } else if keys.zoom_in {
            self.zoom_in()
        } else if keys.zoom_out {
            self.zoom_out()
        } else {
            None
        }
    }

    fn menu_bar(&mut self, ui: &mut egui::Ui, requests: &mut Vec<AppRequest>) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open...").shortcut_text("Ctrl+O"))
                    .clicked()
                {
                    ui.close_menu();
                    requests.extend(self.open_with_dialog());
                }
                if ui
                    .add(egui::Button::new("Exit").shortcut_text("Ctrl+Q"))
                    .clicked()
                {
                    ui.close_menu();
                    requests.push(AppRequest::Exit);
                }
            });
            ui.menu_button("Tools", |ui| {
                let has_image = self.image.is_some();
                if ui
                    .add_enabled(has_image, egui::Button::new("Zoom In").shortcut_text("Ctrl++"))
                    .clicked()
                {
                    ui.close_menu();
                    requests.extend(self.zoom_in());
                }
                if ui
                    .add_enabled(has_image, egui::Button::new("Zoom Out").shortcut_text("Ctrl+-"))
                    .clicked()
                {
                    ui.close_menu();
                    requests.extend(self.zoom_out());
                }
            });
        });
    }

    fn contents(
        &mut self,
        ctx: &egui::Context,
        ui: &mut egui::Ui,
        host: Host,
        requests: &mut Vec<AppRequest>,
    ) {
        self.menu_bar(ui, requests);

        let (response, painter) = ui.allocate_painter(self.surface_size, Sense::click_and_drag());
        let mapping = self.surface_mapping(response.rect.min);
        self.paint_surface(ctx, &painter, response.rect);

        let hovered = response.hovered();
        let mut repaint = false;
        for event in pointer_events(ctx) {
            repaint |= self.handle_pointer(event, &mapping, hovered);
        }
        self.paint_overlay(&painter, &mapping);
        if repaint {
            ctx.request_repaint();
        }

        match &self.image {
            Some(image) => {
                let [w, h] = image.size();
                ui.label(format!(
                    "{w} x {h} px, scale {:.2}. Ctrl + drag to zoom a region.",
                    image.scale_factor()
                ));
            }
            None => {
                ui.label("No image loaded.");
            }
        }

        // A native window of its own receives its own keyboard input.
        if host == Host::Native {
            let keys = Shortcuts::read(ctx);
            requests.extend(self.apply_shortcuts(keys));
        }

        if let Some(prompt) = self.zoom_prompt.as_mut() {
            match prompt.ui(ctx, self.id.with("zoom_prompt")) {
                PromptResult::Accepted(factor) => requests.extend(self.confirm_zoom(factor)),
                PromptResult::Cancelled => self.cancel_zoom(),
                PromptResult::Pending => {}
            }
        }
    }

    pub fn window_size(&self) -> Vec2 {
        viewer_window_size(self.surface_size)
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> Vec<AppRequest> {
        let mut requests = Vec::new();
        if !self.open {
            return requests;
        }
        if self.primary {
            egui::CentralPanel::default()
                .show(ctx, |ui| self.contents(ctx, ui, Host::Root, &mut requests));
            if ctx.input(|i| i.pointer.any_pressed()) {
                self.activated = true;
            }
            return requests;
        }

        let mut open = self.open;
        let title = self.title.clone();
        let spec = WindowSpec {
            seq: self.seq,
            id: self.id,
            title: &title,
            size: self.window_size(),
            resizable: false,
        };
        let pressed = show_child_window(ctx, spec, &mut open, |ctx, ui, host| {
            self.contents(ctx, ui, host, &mut requests)
        });
        self.activated |= pressed;
        if !open {
            tracing::debug!(seq = self.seq, "viewer window closed");
        }
        self.open = open;
        requests
    }
}
