use crate::view::input::PointerModifiers;
use crate::view::mapping::SurfaceMapping;
use eframe::egui::{PointerButton, Pos2, Rect};

/// Selections must be strictly larger than this many image pixels on both
/// axes to open a zoom window.
pub const MIN_SELECTION_SIDE: u32 = 10;

/// Normalized image-space rectangle. `x + width <= image width` and
/// `y + height <= image height` always hold for values built by
/// [`SelectionRect::from_corners`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl SelectionRect {
    /// Build a rectangle covering the pixels between two image-space corners
    /// given in any order. Both corner pixels are included. The result is
    /// clamped to `image`; `None` when nothing of it is left.
    pub fn from_corners(a: Pos2, b: Pos2, image: [u32; 2]) -> Option<Self> {
        let [w, h] = image;
        let lo = |v: f32, max: u32| v.round().clamp(0.0, max as f32) as u32;
        let hi = |v: f32, max: u32| (v.round() + 1.0).clamp(0.0, max as f32) as u32;
        let (x0, x1) = (lo(a.x.min(b.x), w), hi(a.x.max(b.x), w));
        let (y0, y1) = (lo(a.y.min(b.y), h), hi(a.y.max(b.y), h));
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }

    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn is_large_enough(&self) -> bool {
        self.width > MIN_SELECTION_SIDE && self.height > MIN_SELECTION_SIDE
    }
}

impl std::fmt::Display for SelectionRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{})",
            self.x,
            self.y,
            self.right(),
            self.bottom()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// Drag in progress; both points are in display-surface space.
    Selecting { start: Pos2, end: Pos2 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The event did not concern an active selection.
    Ignored,
    /// The drag ended but the rectangle was too small.
    Discarded,
    Accepted(SelectionRect),
}

/// Region-selection state machine of a viewer window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    state: SelectionState,
}

impl SelectionTracker {
    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_selecting(&self) -> bool {
        matches!(self.state, SelectionState::Selecting { .. })
    }

    /// Start a selection on a Ctrl + primary press over the surface of a
    /// viewer that holds an image. Returns whether a selection started.
    pub fn handle_press(
        &mut self,
        point: Pos2,
        button: PointerButton,
        modifiers: PointerModifiers,
        mapping: &SurfaceMapping,
    ) -> bool {
        if button != PointerButton::Primary || !modifiers.ctrl {
            return false;
        }
        if !mapping.has_image() || !mapping.contains(point) {
            return false;
        }
        tracing::debug!(x = point.x, y = point.y, "selection started");
        self.state = SelectionState::Selecting {
            start: point,
            end: point,
        };
        true
    }

    /// Track the pointer while selecting. Returns whether the overlay needs
    /// to be repainted.
    pub fn handle_move(&mut self, point: Pos2) -> bool {
        match &mut self.state {
            SelectionState::Selecting { end, .. } => {
                *end = point;
                true
            }
            SelectionState::Idle => false,
        }
    }

    /// Finish the drag and convert it into an image-space rectangle.
    pub fn handle_release(
        &mut self,
        point: Pos2,
        button: PointerButton,
        mapping: &SurfaceMapping,
    ) -> SelectionOutcome {
        if button != PointerButton::Primary {
            return SelectionOutcome::Ignored;
        }
        let SelectionState::Selecting { start, .. } = std::mem::take(&mut self.state) else {
            return SelectionOutcome::Ignored;
        };
        let Some(image) = mapping.image_size() else {
            return SelectionOutcome::Discarded;
        };
        let a = mapping.to_image(start);
        let b = mapping.to_image(point);
        match SelectionRect::from_corners(a, b, image) {
            Some(rect) if rect.is_large_enough() => {
                tracing::debug!(%rect, "selection accepted");
                SelectionOutcome::Accepted(rect)
            }
            other => {
                tracing::debug!(?other, "selection below minimum size, discarded");
                SelectionOutcome::Discarded
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = SelectionState::Idle;
    }

    /// Rectangle of the dashed overlay in window space, if a drag is active.
    pub fn overlay(&self, mapping: &SurfaceMapping) -> Option<Rect> {
        match self.state {
            SelectionState::Selecting { start, end } => Some(Rect::from_two_pos(
                mapping.surface_to_window(start),
                mapping.surface_to_window(end),
            )),
            SelectionState::Idle => None,
        }
    }
}
