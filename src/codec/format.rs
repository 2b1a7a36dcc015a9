use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::foundation::error::{RastelError, RastelResult};

/// Registered container formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
    Ico,
    Tga,
    Qoi,
    /// Netpbm family: pbm, pgm, ppm, pam.
    Pnm,
}

impl ImageFormat {
    pub const ALL: [Self; 10] = [
        Self::Png,
        Self::Jpeg,
        Self::Gif,
        Self::Bmp,
        Self::Tiff,
        Self::WebP,
        Self::Ico,
        Self::Tga,
        Self::Qoi,
        Self::Pnm,
    ];

    /// Look up a format by name or extension, case-insensitively.
    pub fn from_name(name: &str) -> RastelResult<Self> {
        Self::lookup(name).ok_or_else(|| RastelError::UnsupportedFormat(name.to_string()))
    }

    pub fn from_extension(ext: &str) -> RastelResult<Self> {
        Self::lookup(ext).ok_or_else(|| RastelError::InvalidExtension(ext.to_string()))
    }

    /// Infer the format from a file name's extension.
    pub fn from_path(path: impl AsRef<Path>) -> RastelResult<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| RastelError::InvalidExtension(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    fn lookup(name: &str) -> Option<Self> {
        let name = name.trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.extensions().contains(&name.as_str()))
    }

    pub fn name(self) -> &'static str {
        self.extensions()[0]
    }

    /// Recognized extensions; the first one is the canonical name.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png", "apng"],
            Self::Jpeg => &["jpeg", "jpg", "jfif"],
            Self::Gif => &["gif"],
            Self::Bmp => &["bmp"],
            Self::Tiff => &["tiff", "tif"],
            Self::WebP => &["webp"],
            Self::Ico => &["ico"],
            Self::Tga => &["tga"],
            Self::Qoi => &["qoi"],
            Self::Pnm => &["pnm", "pbm", "pgm", "ppm", "pam"],
        }
    }

    /// Whether the format can hold more than one frame when decoding.
    pub fn supports_animation(self) -> bool {
        matches!(self, Self::Png | Self::Gif | Self::WebP)
    }

    pub(crate) fn to_image(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Gif => image::ImageFormat::Gif,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::WebP => image::ImageFormat::WebP,
            Self::Ico => image::ImageFormat::Ico,
            Self::Tga => image::ImageFormat::Tga,
            Self::Qoi => image::ImageFormat::Qoi,
            Self::Pnm => image::ImageFormat::Pnm,
        }
    }

    pub(crate) fn from_image(format: image::ImageFormat) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.to_image() == format)
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ImageFormat {
    type Err = RastelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/codec/format.rs"]
mod tests;
