//! Native open/save dialogs.

use crate::annotate::SaveFormat;
use crate::view::display::OPEN_EXTENSIONS;
use rfd::FileDialog;
use std::path::PathBuf;

/// Ask for an image to open. `None` when the user cancels.
pub fn pick_image() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("Open image")
        .set_directory(".")
        .add_filter("Images", OPEN_EXTENSIONS)
        .add_filter("bmp", &["bmp"])
        .add_filter("png", &["png"])
        .add_filter("jpeg", &["jpg", "jpeg"])
        .pick_file()
}

/// Ask where to save an annotated zoom, pre-filling `default_name`.
pub fn pick_save_path(default_name: &str) -> Option<PathBuf> {
    let mut dialog = FileDialog::new()
        .set_title("Save image")
        .set_directory(".")
        .set_file_name(default_name);
    for format in SaveFormat::ALL {
        dialog = dialog.add_filter(format.label(), format.extensions());
    }
    dialog.save_file()
}
