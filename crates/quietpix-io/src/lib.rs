#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for I/O operations.
///
/// Defines [`IoError`] variants for decoding and encoding failures.
pub mod error;

/// Decoding of arbitrary image containers from raw bytes.
///
/// See [`functional::decode_image_rgb8`] for automatic format detection.
pub mod functional;

/// PNG image encoding.
pub mod png;

pub use crate::error::IoError;
