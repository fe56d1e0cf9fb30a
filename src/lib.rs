//! # bmplab
//!
//! Decode, edit and re-encode uncompressed BMP images.
//!
//! ## Supported Formats
//!
//! - **8-bit** paletted grayscale. Samples are the raw palette indices; the
//!   1024-byte palette is carried through untouched.
//! - **24-bit** BGR color, exposed as [`rgb::RGB8`] in memory.
//!
//! Headers are kept as the exact bytes that were loaded and written back
//! verbatim, so a decode/encode cycle reproduces the header, the palette and
//! the pixel data byte for byte (row padding is always written as zeros).
//!
//! ## Operators
//!
//! - Point transforms: negative, brightness, threshold (8-bit), grayscale
//!   (24-bit).
//! - 3×3 convolution presets ([`FilterKind`]) on top of a size-generic
//!   [`Kernel`] engine. Border pixels are left unchanged.
//! - Histogram equalization: direct for 8-bit, on luminance for 24-bit.
//!
//! ## Non-Goals
//!
//! - RLE and bitfield compression, bit depths other than 8 and 24
//! - Top-down (negative height) bitmaps
//! - Color management
//!
//! ## Usage
//!
//! ```no_run
//! use bmplab::{FilterKind, load_image24, save_image24};
//!
//! let mut img = load_image24("photo.bmp")?;
//! println!("{}", img.describe());
//! img.brightness(20).grayscale();
//! img.apply_filter(FilterKind::Sharpen)?;
//! img.equalize();
//! save_image24("photo-edited.bmp", &img)?;
//! # Ok::<(), bmplab::BmpError>(())
//! ```

#![forbid(unsafe_code)]

mod bmp;
mod buffer;
mod decode;
mod error;
mod fs;
mod image;
mod limits;
pub mod ops;
mod pixel;

// Re-exports
pub use bmp::header::{BmpHeader, HEADER_LEN, PALETTE_LEN, Palette};
pub use buffer::PixelBuffer;
pub use decode::{DecodeRequest, decode, decode8, decode24};
pub use enough::{Stop, Unstoppable};
pub use error::BmpError;
pub use fs::{load_image, load_image8, load_image24, save_image, save_image8, save_image24};
pub use image::{Image, Image8, Image24, ImageInfo};
pub use limits::Limits;
pub use ops::{Equalization, FilterKind, Kernel};
pub use pixel::{Pixel, PixelLayout};
pub use rgb::RGB8;
