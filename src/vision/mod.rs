//! Image loading for the extraction request.
//!
//! This module turns a file on disk into the inline image block sent to the
//! model: the raw bytes are base64 encoded and labelled with a MIME type
//! guessed from the file extension.
//!
//! # Submodules
//!
//! - `models`: Supported image formats and the encoded payload type.
//! - `encoder`: File reading, base64 encoding, and MIME resolution.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod encoder;
pub mod models;

pub use encoder::{encode_image, resolve_mime, sniff_format};
pub use models::{ImageFormat, ImagePayload};
