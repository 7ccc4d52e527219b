//! Filter operations
//!
//! This module provides the neighborhood filters used by the denoising transforms.

/// Filter kernels
pub mod kernels;

/// Filter operations
mod ops;
pub use ops::*;
