use imgzoom::gui::{viewer_window_size, ImgZoomApp, VIEWER_TITLE};
use imgzoom::logging;
use imgzoom::settings::{Settings, SETTINGS_FILE};

use eframe::egui;

fn main() -> anyhow::Result<()> {
    let (settings, load_error) = match Settings::load(SETTINGS_FILE) {
        Ok(s) => (s, None),
        Err(e) => (Settings::default(), Some(e)),
    };
    let _log_guard = logging::init(settings.debug_logging, settings.log_file.clone());
    if let Some(e) = load_error {
        tracing::warn!("using default settings: {e:#}");
    }
    tracing::info!("starting imgzoom");

    let (w, h) = settings.surface_size();
    let size = viewer_window_size(egui::vec2(w as f32, h as f32));
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(VIEWER_TITLE)
            .with_inner_size(size)
            .with_min_inner_size([160.0, 120.0]),
        ..Default::default()
    };

    eframe::run_native(
        "imgzoom",
        native_options,
        Box::new(move |_cc| Box::new(ImgZoomApp::new(settings))),
    )
    .map_err(|e| anyhow::anyhow!("failed to run the UI: {e}"))?;
    tracing::info!("exiting");
    Ok(())
}
