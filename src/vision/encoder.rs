// Image file encoding
// Author: kelexine (https://github.com/kelexine)

use super::models::ImageFormat;
use crate::error::{ExtractError, Result};
use base64::Engine;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Read the whole file at `path` and return it as standard base64.
///
/// A missing file is reported as [`ExtractError::FileNotFound`]; every other
/// I/O failure is passed through as [`ExtractError::Io`].
pub fn encode_image(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ExtractError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => ExtractError::Io(e),
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());

    if let Some(sniffed) = sniff_format(&bytes) {
        let labelled = resolve_mime(path);
        if sniffed != labelled {
            warn!(
                "{} looks like {} but will be sent as {}",
                path.display(),
                sniffed,
                labelled
            );
        }
    }

    Ok(base64::engine::general_purpose::STANDARD.encode(bytes))
}

/// Guess the MIME label from the text after the last `.` in `path`.
///
/// Never fails: unknown or missing extensions fall back to `image/jpeg`.
pub fn resolve_mime(path: &Path) -> ImageFormat {
    let path = path.to_string_lossy();
    path.rsplit_once('.')
        .and_then(|(_, ext)| ImageFormat::from_extension(ext))
        .unwrap_or_default()
}

/// Detect the image format from magic bytes at the start of the data.
pub fn sniff_format(data: &[u8]) -> Option<ImageFormat> {
    if data.starts_with(b"\xFF\xD8\xFF") {
        Some(ImageFormat::Jpeg)
    } else if data.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(ImageFormat::Png)
    } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
        Some(ImageFormat::Gif)
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && data[8..12] == *b"WEBP" {
        Some(ImageFormat::WebP)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    // Tiny 1x1 PNG (base64 encoded)
    const PNG_1X1: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

    #[test]
    fn test_encode_png_file() {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(PNG_1X1)
            .unwrap();
        let mut temp = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        temp.write_all(&bytes).unwrap();

        let encoded = encode_image(temp.path()).unwrap();
        assert_eq!(encoded, PNG_1X1);
    }

    #[test]
    fn test_encode_empty_file() {
        let temp = NamedTempFile::new().unwrap();
        assert_eq!(encode_image(temp.path()).unwrap(), "");
    }

    #[test]
    fn test_missing_file() {
        let result = encode_image(Path::new("/nonexistent/path/scan.png"));
        match result {
            Err(ExtractError::FileNotFound { path }) => {
                assert_eq!(path, Path::new("/nonexistent/path/scan.png"));
            }
            other => panic!("expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = encode_image(dir.path());
        assert!(matches!(result, Err(ExtractError::Io(_))));
    }

    #[test]
    fn test_resolve_known_extensions() {
        assert_eq!(resolve_mime(Path::new("a.png")), ImageFormat::Png);
        assert_eq!(resolve_mime(Path::new("a.PNG")), ImageFormat::Png);
        assert_eq!(resolve_mime(Path::new("a.jpeg")), ImageFormat::Jpeg);
        assert_eq!(resolve_mime(Path::new("a.Jpg")), ImageFormat::Jpeg);
        assert_eq!(resolve_mime(Path::new("a.webp")), ImageFormat::WebP);
        assert_eq!(resolve_mime(Path::new("a.GIF")), ImageFormat::Gif);
    }

    #[test]
    fn test_resolve_fallback() {
        assert_eq!(resolve_mime(Path::new("scan.bmp")), ImageFormat::Jpeg);
        assert_eq!(resolve_mime(Path::new("scan")), ImageFormat::Jpeg);
        assert_eq!(resolve_mime(Path::new("scan.")), ImageFormat::Jpeg);
        assert_eq!(resolve_mime(Path::new("archive.png.bak")), ImageFormat::Jpeg);
    }

    #[test]
    fn test_resolve_uses_last_dot() {
        assert_eq!(resolve_mime(Path::new("photo.v2.gif")), ImageFormat::Gif);
        assert_eq!(resolve_mime(Path::new(".webp")), ImageFormat::WebP);
    }

    #[test]
    fn test_sniff_format() {
        let png = base64::engine::general_purpose::STANDARD
            .decode(PNG_1X1)
            .unwrap();
        assert_eq!(sniff_format(&png), Some(ImageFormat::Png));
        assert_eq!(sniff_format(b"\xFF\xD8\xFF\xE0"), Some(ImageFormat::Jpeg));
        assert_eq!(sniff_format(b"GIF89a"), Some(ImageFormat::Gif));
        assert_eq!(sniff_format(b"RIFF\0\0\0\0WEBPVP8 "), Some(ImageFormat::WebP));
        assert_eq!(sniff_format(b"BM"), None);
        assert_eq!(sniff_format(b""), None);
    }
}
