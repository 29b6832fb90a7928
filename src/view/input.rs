use eframe::egui::{PointerButton, Pos2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerModifiers {
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub ctrl: bool,
    pub shift: bool,
}

/// Toolkit-neutral pointer event, positions in window space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        pos: Pos2,
        button: PointerButton,
        modifiers: PointerModifiers,
    },
    Move {
        pos: Pos2,
    },
    Release {
        pos: Pos2,
        button: PointerButton,
    },
}
