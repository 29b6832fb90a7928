//! Conversion between window space, display-surface space and image space.
//!
//! The viewer stretches its bitmap over a fixed-size surface. Pointer events
//! arrive in window space, are shifted into surface space by
//! [`SurfaceMapping::window_to_surface`] and then scaled into image space.
//! Overlays travel the opposite way through [`SurfaceMapping::surface_to_window`].
//! Every conversion in the program goes through this one type.

use eframe::egui::{Pos2, Rect, Vec2};

/// Map a point on the display surface to a pixel of the underlying image.
///
/// The result is rounded and clamped to `[0, w-1] x [0, h-1]`. When there is
/// no image (or it is empty) or the surface has no area, `point` is returned
/// unchanged so callers can treat the mapping as a no-op.
pub fn display_to_image(point: Pos2, surface: Vec2, image: Option<[u32; 2]>) -> Pos2 {
    let Some([w, h]) = image else {
        return point;
    };
    if w == 0 || h == 0 || surface.x <= 0.0 || surface.y <= 0.0 {
        return point;
    }
    let scale_x = w as f64 / surface.x as f64;
    let scale_y = h as f64 / surface.y as f64;
    let x = (point.x as f64 * scale_x).round().clamp(0.0, (w - 1) as f64);
    let y = (point.y as f64 * scale_y).round().clamp(0.0, (h - 1) as f64);
    Pos2::new(x as f32, y as f32)
}

/// Inverse of [`display_to_image`] without rounding. Same identity fallback.
pub fn image_to_display(point: Pos2, surface: Vec2, image: Option<[u32; 2]>) -> Pos2 {
    let Some([w, h]) = image else {
        return point;
    };
    if w == 0 || h == 0 || surface.x <= 0.0 || surface.y <= 0.0 {
        return point;
    }
    let x = point.x as f64 * surface.x as f64 / w as f64;
    let y = point.y as f64 * surface.y as f64 / h as f64;
    Pos2::new(x as f32, y as f32)
}

/// Placement of a display surface inside its window plus the size of the
/// image stretched over it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMapping {
    surface: Rect,
    image_size: Option<[u32; 2]>,
}

impl SurfaceMapping {
    pub fn new(surface: Rect, image_size: Option<[u32; 2]>) -> Self {
        Self {
            surface,
            image_size,
        }
    }

    /// Mapping for a surface placed at the window origin. Handy when pointer
    /// positions are already surface-relative.
    pub fn at_origin(surface_size: Vec2, image_size: Option<[u32; 2]>) -> Self {
        Self::new(Rect::from_min_size(Pos2::ZERO, surface_size), image_size)
    }

    pub fn surface_size(&self) -> Vec2 {
        self.surface.size()
    }

    pub fn image_size(&self) -> Option<[u32; 2]> {
        self.image_size
    }

    pub fn has_image(&self) -> bool {
        matches!(self.image_size, Some([w, h]) if w > 0 && h > 0)
    }

    pub fn window_to_surface(&self, p: Pos2) -> Pos2 {
        (p - self.surface.min).to_pos2()
    }

    pub fn surface_to_window(&self, p: Pos2) -> Pos2 {
        self.surface.min + p.to_vec2()
    }

    /// Whether a surface-space point lies on the surface.
    pub fn contains(&self, p: Pos2) -> bool {
        Rect::from_min_size(Pos2::ZERO, self.surface_size()).contains(p)
    }

    pub fn to_image(&self, p: Pos2) -> Pos2 {
        display_to_image(p, self.surface_size(), self.image_size)
    }
}
