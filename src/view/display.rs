use crate::view::selection::SelectionRect;
use anyhow::{bail, Context, Result};
use eframe::egui;
use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;

/// File extensions the viewer opens.
pub const OPEN_EXTENSIONS: &[&str] = &["bmp", "png", "jpg", "jpeg"];

pub fn is_openable(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| OPEN_EXTENSIONS.iter().any(|ok| ok.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Size that fits inside `target` while keeping the aspect ratio of `src`.
/// Integer division truncates, matching how the zoom sizes are computed.
pub fn fit_keep_aspect(src: [u32; 2], target: [u32; 2]) -> [u32; 2] {
    let [sw, sh] = src.map(u64::from);
    let [tw, th] = target.map(u64::from);
    if sw == 0 || sh == 0 {
        return target;
    }
    let rw = th * sw / sh;
    let (w, h) = if rw <= tw { (rw, th) } else { (tw, tw * sh / sw) };
    [w.max(1) as u32, h.max(1) as u32]
}

/// Scale `img` by `factor` with a bilinear filter, keeping the aspect ratio.
/// The result is never smaller than 1x1.
pub fn scale_smooth(img: &RgbaImage, factor: f64) -> RgbaImage {
    let (w, h) = img.dimensions();
    let target = [
        ((w as f64 * factor) as u32).max(1),
        ((h as f64 * factor) as u32).max(1),
    ];
    let [nw, nh] = fit_keep_aspect([w, h], target);
    imageops::resize(img, nw, nh, FilterType::Triangle)
}

/// Bitmap shown by a viewer window. Replaced wholesale, never edited.
#[derive(Clone, Debug)]
pub struct DisplayImage {
    pixels: RgbaImage,
    scale_factor: f64,
}

impl DisplayImage {
    /// Decode an image file. Only [`OPEN_EXTENSIONS`] are accepted.
    pub fn open(path: &Path) -> Result<Self> {
        if !is_openable(path) {
            bail!("unsupported image type: {}", path.display());
        }
        let img = image::open(path).with_context(|| format!("decode image {}", path.display()))?;
        let pixels = img.to_rgba8();
        if pixels.width() == 0 || pixels.height() == 0 {
            bail!("image {} is empty", path.display());
        }
        tracing::info!(
            path = %path.display(),
            width = pixels.width(),
            height = pixels.height(),
            "opened image"
        );
        Ok(Self {
            pixels,
            scale_factor: 1.0,
        })
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels,
            scale_factor: 1.0,
        }
    }

    /// New image scaled by `factor` relative to this one.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            pixels: scale_smooth(&self.pixels, factor),
            scale_factor: self.scale_factor * factor,
        }
    }

    /// Copy of the pixels inside `rect`.
    pub fn crop(&self, rect: SelectionRect) -> RgbaImage {
        imageops::crop_imm(&self.pixels, rect.x, rect.y, rect.width, rect.height).to_image()
    }

    pub fn size(&self) -> [u32; 2] {
        [self.pixels.width(), self.pixels.height()]
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        to_color_image(&self.pixels)
    }
}

pub fn to_color_image(img: &RgbaImage) -> egui::ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw())
}
