#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// image cropping module.
pub mod crop;

/// strength mapping and method dispatch for the denoising transforms.
pub mod denoise;

/// image filtering module.
pub mod filter;

/// border handling for neighborhood operations.
pub mod padding;

/// multiresolution haar transform and coefficient shrinkage.
pub mod wavelet;
