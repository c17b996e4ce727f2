//! Utility functions and helpers for img2text.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and log redaction helpers.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
