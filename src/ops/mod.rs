//! Pixel-space operators over [`crate::PixelBuffer`].
//!
//! The image types expose these as methods; the free functions work on any
//! buffer, including ones not tied to a BMP header.

mod convolve;
mod equalize;
mod point;

pub use convolve::{FilterKind, Kernel, convolve};
pub use equalize::{Equalization, Histogram, equalize_gray8, equalize_rgb24};
pub use point::{brightness, grayscale, negative, threshold};
