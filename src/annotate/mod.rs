//! Zoom-window logic: the zoom session, the pen and its raster strokes, and
//! saving the annotated result.

pub mod model;
pub mod render;
pub mod save;
pub mod session;

pub use model::{PenState, ZoomFactor, MAX_ZOOM_FACTOR, MIN_ZOOM_FACTOR};
pub use save::{save_rgba, SaveFormat};
pub use session::ZoomSession;
