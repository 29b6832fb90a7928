use anyhow::{bail, Context, Result};
use chrono::Local;
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::path::{Path, PathBuf};

pub const DEFAULT_SAVE_PREFIX: &str = "zoom";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveFormat {
    Png,
    Jpeg,
    Bmp,
}

impl SaveFormat {
    /// Formats in the order the save dialog offers them.
    pub const ALL: [SaveFormat; 3] = [SaveFormat::Png, SaveFormat::Jpeg, SaveFormat::Bmp];

    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(SaveFormat::Png),
            "jpg" | "jpeg" => Some(SaveFormat::Jpeg),
            "bmp" => Some(SaveFormat::Bmp),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SaveFormat::Png => "PNG",
            SaveFormat::Jpeg => "JPEG",
            SaveFormat::Bmp => "BMP",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            SaveFormat::Png => &["png"],
            SaveFormat::Jpeg => &["jpg", "jpeg"],
            SaveFormat::Bmp => &["bmp"],
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            SaveFormat::Png => ImageFormat::Png,
            SaveFormat::Jpeg => ImageFormat::Jpeg,
            SaveFormat::Bmp => ImageFormat::Bmp,
        }
    }
}

/// Work out the final path and format for a user supplied path. A path
/// without an extension is saved as PNG.
pub fn resolve_save_target(path: &Path) -> Result<(PathBuf, SaveFormat)> {
    if path.extension().is_none() {
        return Ok((path.with_extension("png"), SaveFormat::Png));
    }
    match SaveFormat::from_path(path) {
        Some(format) => Ok((path.to_path_buf(), format)),
        None => bail!("unsupported image format: {}", path.display()),
    }
}

/// Encode `img` to `path`. JPEG output drops the alpha channel. Returns the
/// path actually written.
pub fn save_rgba(img: &RgbaImage, path: &Path) -> Result<PathBuf> {
    let (target, format) = resolve_save_target(path)?;
    let written = match format {
        SaveFormat::Jpeg => DynamicImage::ImageRgba8(img.clone())
            .to_rgb8()
            .save_with_format(&target, format.image_format()),
        SaveFormat::Png | SaveFormat::Bmp => img.save_with_format(&target, format.image_format()),
    };
    written.with_context(|| format!("save {} image to {}", format.label(), target.display()))?;
    tracing::info!(path = %target.display(), format = format.label(), "saved image");
    Ok(target)
}

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    format!("{}_{}", DEFAULT_SAVE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// File name proposed by the save dialog.
pub fn default_file_name(now: chrono::DateTime<Local>) -> String {
    format!("{}.png", timestamped_stem(now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_follows_extension() {
        assert_eq!(SaveFormat::from_path(Path::new("a.PNG")), Some(SaveFormat::Png));
        assert_eq!(SaveFormat::from_path(Path::new("a.jpeg")), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_path(Path::new("a.jpg")), Some(SaveFormat::Jpeg));
        assert_eq!(SaveFormat::from_path(Path::new("a.bmp")), Some(SaveFormat::Bmp));
        assert_eq!(SaveFormat::from_path(Path::new("a.gif")), None);
    }

    #[test]
    fn missing_extension_defaults_to_png() {
        let (path, format) = resolve_save_target(Path::new("/tmp/out")).expect("target");
        assert_eq!(path, Path::new("/tmp/out.png"));
        assert_eq!(format, SaveFormat::Png);
        assert!(resolve_save_target(Path::new("/tmp/out.tiff")).is_err());
    }

    #[test]
    fn default_name_is_timestamped() {
        let dt = Local
            .with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
            .single()
            .expect("date time");
        assert_eq!(default_file_name(dt), "zoom_20260102_030405.png");
    }
}
