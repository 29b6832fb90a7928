//! egui front end. The first viewer lives in the main native window; every
//! other viewer and zoom window gets a native window of its own.

mod input;
mod prompts;
mod status;
mod viewer_window;
mod zoom_window;

pub use prompts::{ColorPrompt, PromptResult, ZoomPrompt};
pub use status::{StatusLine, LONG_STATUS, SHORT_STATUS};
pub use viewer_window::{viewer_window_size, ViewerWindow, RESULT_TITLE, VIEWER_TITLE};
pub use zoom_window::ZoomWindow;

use crate::annotate::ZoomSession;
use crate::settings::Settings;
use crate::view::DisplayImage;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};

/// Work a window cannot do on its own and hands to the application.
pub enum AppRequest {
    OpenViewer { title: String, image: DisplayImage },
    OpenZoom(ZoomSession),
    Notify { kind: ToastKind, text: String },
    Exit,
}

/// Cascade embedded windows so they do not stack exactly on top of each other.
fn window_default_pos(seq: u64) -> egui::Pos2 {
    let step = (seq % 10) as f32 * 28.0;
    egui::pos2(24.0 + step, 24.0 + step)
}

/// Where a window's contents are drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Host {
    /// The application's main native window.
    Root,
    /// A native window of its own.
    Native,
    /// An egui window inside the main one, used when the backend has a
    /// single viewport.
    Embedded,
}

pub(crate) struct WindowSpec<'a> {
    pub seq: u64,
    pub id: egui::Id,
    pub title: &'a str,
    pub size: egui::Vec2,
    pub resizable: bool,
}

/// Show `add_contents` in a native window of its own, or as an egui window
/// when the backend cannot open more viewports. Clears `open` once the user
/// closes the window. Returns whether an embedded window was pressed this
/// frame.
pub(crate) fn show_child_window(
    ctx: &egui::Context,
    spec: WindowSpec<'_>,
    open: &mut bool,
    add_contents: impl FnOnce(&egui::Context, &mut egui::Ui, Host),
) -> bool {
    let builder = egui::ViewportBuilder::default()
        .with_title(spec.title)
        .with_inner_size(spec.size)
        .with_resizable(spec.resizable);
    let viewport = egui::ViewportId::from_hash_of(spec.id);
    ctx.show_viewport_immediate(viewport, builder, |ctx, class| {
        if class == egui::ViewportClass::Embedded {
            let mut window = egui::Window::new(spec.title)
                .id(spec.id)
                .open(open)
                .resizable(spec.resizable)
                .default_pos(window_default_pos(spec.seq));
            if spec.resizable {
                window = window.default_size(spec.size);
            }
            let shown = window.show(ctx, |ui| add_contents(ctx, ui, Host::Embedded));
            shown.map_or(false, |inner| {
                ctx.input(|i| {
                    i.pointer.any_pressed()
                        && i
                            .pointer
                            .press_origin()
                            .map_or(false, |p| inner.response.rect.contains(p))
                })
            })
        } else {
            egui::CentralPanel::default().show(ctx, |ui| add_contents(ctx, ui, Host::Native));
            if ctx.input(|i| i.viewport().close_requested()) {
                *open = false;
            }
            false
        }
    })
}

/// Viewer shortcuts pressed this frame. Reading consumes them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Shortcuts {
    pub open: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub quit: bool,
}

impl Shortcuts {
    pub(crate) fn read(ctx: &egui::Context) -> Self {
        use egui::{Key, Modifiers};
        ctx.input_mut(|i| Self {
            open: i.consume_key(Modifiers::COMMAND, Key::O),
            zoom_in: i.consume_key(Modifiers::COMMAND, Key::Plus)
                || i.consume_key(Modifiers::COMMAND, Key::Equals),
            zoom_out: i.consume_key(Modifiers::COMMAND, Key::Minus),
            quit: i.consume_key(Modifiers::COMMAND, Key::Q),
        })
    }
}

pub struct ImgZoomApp {
    settings: Settings,
    viewers: Vec<ViewerWindow>,
    zooms: Vec<ZoomWindow>,
    toasts: Toasts,
    pub enable_toasts: bool,
    pub toast_duration: f32,
    next_seq: u64,
    active_viewer: Option<u64>,
    exit_requested: bool,
}

impl ImgZoomApp {
    /// Application with one empty viewer.
    pub fn new(settings: Settings) -> Self {
        let toasts = Toasts::new().anchor(egui::Align2::RIGHT_TOP, [10.0, 10.0]);
        let mut app = Self {
            enable_toasts: settings.enable_toasts,
            toast_duration: settings.toast_duration,
            settings,
            viewers: Vec::new(),
            zooms: Vec::new(),
            toasts,
            next_seq: 0,
            active_viewer: None,
            exit_requested: false,
        };
        let seq = app.alloc_seq();
        app.viewers.push(
            ViewerWindow::new(seq, viewer_window::VIEWER_TITLE, &app.settings).into_primary(),
        );
        app.active_viewer = Some(seq);
        app
    }

    fn alloc_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    pub fn viewers(&self) -> &[ViewerWindow] {
        &self.viewers
    }

    pub fn viewers_mut(&mut self) -> &mut [ViewerWindow] {
        &mut self.viewers
    }

    pub fn zooms(&self) -> &[ZoomWindow] {
        &self.zooms
    }

    pub fn zooms_mut(&mut self) -> &mut [ZoomWindow] {
        &mut self.zooms
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn add_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        if !self.enable_toasts {
            return;
        }
        self.toasts.add(Toast {
            text: text.into().into(),
            kind,
            options: ToastOptions::default().duration_in_seconds(self.toast_duration as f64),
        });
    }

    pub fn apply(&mut self, request: AppRequest) {
        match request {
            AppRequest::OpenViewer { title, image } => {
                let seq = self.alloc_seq();
                tracing::debug!(seq, %title, "opening viewer window");
                self.viewers
                    .push(ViewerWindow::new(seq, title, &self.settings).with_image(image));
                self.active_viewer = Some(seq);
            }
            AppRequest::OpenZoom(session) => {
                let seq = self.alloc_seq();
                self.zooms.push(ZoomWindow::new(seq, session));
            }
            AppRequest::Notify { kind, text } => self.add_toast(kind, text),
            AppRequest::Exit => {
                tracing::info!("exit requested");
                self.exit_requested = true;
            }
        }
    }

    fn active_viewer_mut(&mut self) -> Option<&mut ViewerWindow> {
        let idx = self
            .active_viewer
            .and_then(|seq| self.viewers.iter().position(|v| v.seq() == seq))
            .or_else(|| if self.viewers.is_empty() { None } else { Some(0) })?;
        self.viewers.get_mut(idx)
    }

    /// Shortcuts typed into the main window go to the viewer last clicked
    /// there. Viewers in native windows of their own read their own keys.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let keys = Shortcuts::read(ctx);
        if keys.quit {
            self.apply(AppRequest::Exit);
            return;
        }
        let request = self
            .active_viewer_mut()
            .and_then(|viewer| viewer.apply_shortcuts(keys));
        if let Some(request) = request {
            self.apply(request);
        }
    }

    /// Run one frame of the whole window set.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.handle_shortcuts(ctx);

        let mut requests = Vec::new();
        for viewer in &mut self.viewers {
            requests.extend(viewer.ui(ctx));
            if viewer.take_activated() {
                self.active_viewer = Some(viewer.seq());
            }
        }
        for zoom in &mut self.zooms {
            zoom.ui(ctx);
        }
        for request in requests {
            self.apply(request);
        }

        self.viewers.retain(|v| v.open);
        self.zooms.retain(|z| z.open);
        if self.viewers.is_empty() && self.zooms.is_empty() {
            tracing::info!("last window closed");
            self.exit_requested = true;
        }

        if self.enable_toasts {
            self.toasts.show(ctx);
        }
    }
}

impl eframe::App for ImgZoomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
        if self.exit_requested {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn starts_with_one_empty_viewer() {
        let app = ImgZoomApp::new(Settings::default());
        assert_eq!(app.viewers().len(), 1);
        assert!(app.viewers()[0].image().is_none());
        assert!(app.zooms().is_empty());
    }

    #[test]
    fn open_viewer_request_adds_window() {
        let mut app = ImgZoomApp::new(Settings::default());
        let image = DisplayImage::from_rgba(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        app.apply(AppRequest::OpenViewer {
            title: RESULT_TITLE.into(),
            image,
        });
        assert_eq!(app.viewers().len(), 2);
        assert_eq!(app.viewers()[1].title(), RESULT_TITLE);
        assert!(app.viewers()[1].image().is_some());
        assert_ne!(app.viewers()[0].seq(), app.viewers()[1].seq());
    }

    #[test]
    fn first_viewer_hosts_the_main_window() {
        let mut app = ImgZoomApp::new(Settings::default());
        let image = DisplayImage::from_rgba(RgbaImage::from_pixel(4, 4, Rgba([0, 0, 0, 255])));
        app.apply(AppRequest::OpenViewer {
            title: RESULT_TITLE.into(),
            image,
        });
        assert!(app.viewers()[0].is_primary());
        assert!(!app.viewers()[1].is_primary());
    }

    #[test]
    fn child_window_falls_back_to_embedded() {
        let ctx = egui::Context::default();
        let mut open = true;
        let mut hosts = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let spec = WindowSpec {
                seq: 1,
                id: egui::Id::new("child"),
                title: "child",
                size: egui::vec2(200.0, 100.0),
                resizable: true,
            };
            show_child_window(ctx, spec, &mut open, |_, ui, host| {
                hosts.push(host);
                ui.label("contents");
            });
        });
        assert_eq!(hosts, vec![Host::Embedded]);
        assert!(open);
    }

    #[test]
    fn ctrl_q_requests_exit() {
        let ctx = egui::Context::default();
        let mut app = ImgZoomApp::new(Settings::default());
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::Q,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::COMMAND,
            }],
            modifiers: egui::Modifiers::COMMAND,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.show(ctx));
        assert!(app.exit_requested());
    }

    #[test]
    fn closing_every_window_requests_exit() {
        let mut app = ImgZoomApp::new(Settings::default());
        app.viewers_mut()[0].open = false;
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| app.show(ctx));
        assert!(app.viewers().is_empty());
        assert!(app.exit_requested());
    }
}
