//! Viewer-side logic: the displayed bitmap, coordinate mapping and the
//! region-selection state machine.

pub mod display;
pub mod input;
pub mod mapping;
pub mod selection;

pub use display::DisplayImage;
pub use input::{PointerEvent, PointerModifiers};
pub use mapping::SurfaceMapping;
pub use selection::{SelectionOutcome, SelectionRect, SelectionTracker, MIN_SELECTION_SIDE};
