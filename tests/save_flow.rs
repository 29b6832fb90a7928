use image::{Rgba, RgbaImage};
use imgzoom::annotate::{save_rgba, PenState, ZoomFactor, ZoomSession};
use eframe::egui::{PointerButton, Pos2};
use tempfile::tempdir;

fn session() -> ZoomSession {
    let crop = RgbaImage::from_pixel(16, 12, Rgba([200, 180, 40, 255]));
    let mut session = ZoomSession::from_crop(crop, ZoomFactor::new(2.0).unwrap(), PenState::default());
    session.handle_press(Pos2::new(2.0, 2.0), PointerButton::Primary);
    session.handle_release(Pos2::new(28.0, 20.0), PointerButton::Primary);
    session
}

#[test]
fn writes_every_supported_format() {
    let dir = tempdir().unwrap();
    let session = session();
    for name in ["out.png", "out.jpg", "out.jpeg", "out.bmp"] {
        let path = dir.path().join(name);
        let written = session.save(&path).unwrap();
        assert_eq!(written, path);
        let back = image::open(&path).unwrap();
        assert_eq!((back.width(), back.height()), (32, 24), "{name}");
    }
}

#[test]
fn png_round_trip_keeps_pixels() {
    let dir = tempdir().unwrap();
    let session = session();
    let path = dir.path().join("exact.png");
    session.save(&path).unwrap();
    let back = image::open(&path).unwrap().to_rgba8();
    assert_eq!(&back, session.drawing_buffer());
}

#[test]
fn missing_extension_defaults_to_png() {
    let dir = tempdir().unwrap();
    let img = RgbaImage::from_pixel(3, 3, Rgba([1, 2, 3, 255]));
    let written = save_rgba(&img, &dir.path().join("noext")).unwrap();
    assert_eq!(written, dir.path().join("noext.png"));
    assert!(written.exists());
}

#[test]
fn failed_save_reports_error_and_keeps_buffer() {
    let dir = tempdir().unwrap();
    let session = session();
    let before = session.drawing_buffer().clone();

    let missing_dir = dir.path().join("no_such_dir").join("out.png");
    assert!(session.save(&missing_dir).is_err());

    let unsupported = dir.path().join("out.tiff");
    let err = session.save(&unsupported).unwrap_err();
    assert!(err.to_string().contains("unsupported"));
    assert!(!unsupported.exists());

    assert_eq!(session.drawing_buffer(), &before);
}
