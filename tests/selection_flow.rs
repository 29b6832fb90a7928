use eframe::egui::{PointerButton, Pos2};
use image::{Rgba, RgbaImage};
use imgzoom::annotate::ZoomFactor;
use imgzoom::gui::{AppRequest, ViewerWindow};
use imgzoom::settings::Settings;
use imgzoom::view::{
    DisplayImage, PointerEvent, PointerModifiers, SelectionOutcome, SelectionRect,
    SelectionTracker, SurfaceMapping,
};

const CTRL: PointerModifiers = PointerModifiers {
    ctrl: true,
    shift: false,
};

fn press(x: f32, y: f32, modifiers: PointerModifiers) -> PointerEvent {
    PointerEvent::Press {
        pos: Pos2::new(x, y),
        button: PointerButton::Primary,
        modifiers,
    }
}

fn release(x: f32, y: f32) -> PointerEvent {
    PointerEvent::Release {
        pos: Pos2::new(x, y),
        button: PointerButton::Primary,
    }
}

fn viewer(w: u32, h: u32) -> ViewerWindow {
    let image = DisplayImage::from_rgba(RgbaImage::from_pixel(w, h, Rgba([90, 120, 150, 255])));
    ViewerWindow::new(0, "test", &Settings::default()).with_image(image)
}

#[test]
fn stretched_surface_selection_maps_to_image_space() {
    let mapping = SurfaceMapping::at_origin([300.0, 200.0].into(), Some([400, 300]));
    let mut tracker = SelectionTracker::default();
    assert!(tracker.handle_press(Pos2::new(40.0, 40.0), PointerButton::Primary, CTRL, &mapping));
    assert!(tracker.handle_move(Pos2::new(80.0, 90.0)));
    let outcome = tracker.handle_release(Pos2::new(120.0, 120.0), PointerButton::Primary, &mapping);
    assert_eq!(
        outcome,
        SelectionOutcome::Accepted(SelectionRect {
            x: 53,
            y: 60,
            width: 108,
            height: 121,
        })
    );
    assert!(!tracker.is_selecting());
}

#[test]
fn full_surface_drag_crops_entire_image() {
    let mut win = viewer(400, 300);
    let mapping = win.surface_mapping(Pos2::ZERO);
    assert!(win.handle_pointer(press(0.0, 0.0, CTRL), &mapping, true));
    win.handle_pointer(release(300.0, 200.0), &mapping, true);
    match win.confirm_zoom(ZoomFactor::new(1.0).unwrap()) {
        Some(AppRequest::OpenZoom(session)) => {
            assert_eq!(session.original_crop().dimensions(), (400, 300));
        }
        _ => panic!("expected a zoom session"),
    }
}

#[test]
fn plain_drag_does_not_select() {
    let mut win = viewer(300, 200);
    let mapping = win.surface_mapping(Pos2::ZERO);
    assert!(!win.handle_pointer(press(10.0, 10.0, PointerModifiers::default()), &mapping, true));
    assert!(!win.selection().is_selecting());
}

#[test]
fn tiny_drag_opens_no_prompt() {
    let mut win = viewer(300, 200);
    let mapping = win.surface_mapping(Pos2::ZERO);
    assert!(win.handle_pointer(press(10.0, 10.0, CTRL), &mapping, true));
    win.handle_pointer(release(15.0, 15.0), &mapping, true);
    assert!(win.zoom_prompt().is_none());
    assert!(!win.selection().is_selecting());
}

#[test]
fn accepted_selection_produces_zoom_session() {
    let mut win = viewer(300, 200);
    let mapping = win.surface_mapping(Pos2::new(8.0, 30.0));
    assert!(win.handle_pointer(press(18.0, 40.0, CTRL), &mapping, true));
    win.handle_pointer(
        PointerEvent::Move {
            pos: Pos2::new(60.0, 70.0),
        },
        &mapping,
        true,
    );
    win.handle_pointer(release(117.0, 119.0), &mapping, true);

    let prompt = win.zoom_prompt().expect("prompt shown");
    assert_eq!(
        prompt.region(),
        SelectionRect {
            x: 10,
            y: 10,
            width: 100,
            height: 80,
        }
    );

    let factor = ZoomFactor::new(2.0).unwrap();
    match win.confirm_zoom(factor) {
        Some(AppRequest::OpenZoom(session)) => {
            assert_eq!(session.original_crop().dimensions(), (100, 80));
            assert_eq!(session.rendered_zoom().dimensions(), (200, 160));
            assert_eq!(session.drawing_buffer().dimensions(), (200, 160));
        }
        _ => panic!("expected a zoom session"),
    }
    assert!(win.zoom_prompt().is_none());
}

#[test]
fn cancelled_prompt_leaves_viewer_idle() {
    let mut win = viewer(300, 200);
    let mapping = win.surface_mapping(Pos2::ZERO);
    win.handle_pointer(press(0.0, 0.0, CTRL), &mapping, true);
    win.handle_pointer(release(50.0, 50.0), &mapping, true);
    assert!(win.zoom_prompt().is_some());
    // Input is ignored while the prompt is up.
    assert!(!win.handle_pointer(press(5.0, 5.0, CTRL), &mapping, true));
    win.cancel_zoom();
    assert!(win.zoom_prompt().is_none());
    assert!(win.confirm_zoom(ZoomFactor::default()).is_none());
}

#[test]
fn empty_viewer_ignores_selection() {
    let mut win = ViewerWindow::new(0, "empty", &Settings::default());
    let mapping = win.surface_mapping(Pos2::ZERO);
    assert!(!win.handle_pointer(press(10.0, 10.0, CTRL), &mapping, true));
    assert!(win.zoom_in().is_none());
}

#[test]
fn zoom_commands_open_result_viewer() {
    let win = viewer(40, 20);
    match win.zoom_in() {
        Some(AppRequest::OpenViewer { title, image }) => {
            assert_eq!(title, "Result");
            assert_eq!(image.size(), [60, 30]);
        }
        _ => panic!("expected a result viewer"),
    }
    match win.zoom_out() {
        Some(AppRequest::OpenViewer { image, .. }) => assert_eq!(image.size(), [20, 10]),
        _ => panic!("expected a result viewer"),
    }
}
