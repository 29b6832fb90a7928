use crate::view::{PointerEvent, PointerModifiers};
use eframe::egui;

/// Pointer events received this frame, in the order they happened.
pub fn pointer_events(ctx: &egui::Context) -> Vec<PointerEvent> {
    ctx.input(|i| i.events.iter().filter_map(to_pointer_event).collect())
}

fn to_pointer_event(event: &egui::Event) -> Option<PointerEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button,
            pressed: true,
            modifiers,
        } => Some(PointerEvent::Press {
            pos: *pos,
            button: *button,
            modifiers: PointerModifiers {
                ctrl: modifiers.command,
                shift: modifiers.shift,
            },
        }),
        egui::Event::PointerButton {
            pos,
            button,
            pressed: false,
            ..
        } => Some(PointerEvent::Release {
            pos: *pos,
            button: *button,
        }),
        egui::Event::PointerMoved(pos) => Some(PointerEvent::Move { pos: *pos }),
        _ => None,
    }
}
