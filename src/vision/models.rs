// Vision models and types
// Author: kelexine (https://github.com/kelexine)

use super::encoder::{encode_image, resolve_mime};
use crate::error::Result;
use std::fmt;
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Jpeg,
    Png,
    WebP,
    Gif,
}

impl ImageFormat {
    /// Get MIME type for this format
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Gif => "image/gif",
        }
    }

    /// Try to detect format from a (case-insensitive) file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::WebP),
            "gif" => Some(ImageFormat::Gif),
            _ => None,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime_type())
    }
}

/// A base64-encoded image together with the format label sent upstream.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub data: String,
    pub format: ImageFormat,
}

impl ImagePayload {
    /// Read and encode the file at `path`, labelling it by extension.
    pub fn load(path: &Path) -> Result<Self> {
        let data = encode_image(path)?;
        Ok(Self {
            data,
            format: resolve_mime(path),
        })
    }

    /// `data:<mime>;base64,<data>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data)
    }
}

// Payloads can be megabytes of base64; keep Debug output readable
impl fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImagePayload")
            .field("format", &self.format)
            .field("data_len", &self.data.len())
            .finish()
    }
}
