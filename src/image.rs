//! Image handles: header, optional palette and the owned pixel buffer.

use enough::Stop;
use rgb::RGB8;

use crate::bmp;
use crate::bmp::header::{BmpHeader, Palette, build_header};
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::ops::{self, Equalization, FilterKind, Kernel};
use crate::pixel::PixelLayout;

/// Summary returned by `describe()`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u16,
    /// Declared image data size, or the padded size when the header leaves
    /// it at 0.
    pub data_size: u64,
}

impl ImageInfo {
    fn from_header(header: &BmpHeader) -> Self {
        Self {
            width: header.width() as u32,
            height: header.height() as u32,
            bit_depth: header.bit_depth(),
            data_size: header.image_data_size(),
        }
    }
}

impl core::fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}x{}, {}-bit, {} bytes of pixel data",
            self.width, self.height, self.bit_depth, self.data_size
        )
    }
}

/// An 8-bit grayscale BMP.
#[derive(Clone, Debug)]
pub struct Image8 {
    header: BmpHeader,
    palette: Palette,
    pixels: PixelBuffer<u8>,
}

impl Image8 {
    /// A new image with a standard header and an identity grayscale palette.
    pub fn new(width: u32, height: u32, fill: u8) -> Result<Self, BmpError> {
        let header = build_header(width, height, PixelLayout::Gray8)?;
        let pixels = PixelBuffer::filled(width as usize, height as usize, fill)?;
        Ok(Self::from_parts(header, Palette::grayscale(), pixels))
    }

    pub(crate) fn from_parts(header: BmpHeader, palette: Palette, pixels: PixelBuffer<u8>) -> Self {
        Self {
            header,
            palette,
            pixels,
        }
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn pixels(&self) -> &PixelBuffer<u8> {
        &self.pixels
    }

    /// All pixels in row-major order, mutable. The grid itself stays the
    /// size the header declares.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.pixels.pixels_mut()
    }

    /// Mutable pixels of row `row`, top row first.
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        self.pixels.row_mut(row)
    }

    /// Overwrite the pixel at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize, value: u8) {
        self.pixels.set(row, col, value);
    }

    pub fn describe(&self) -> ImageInfo {
        ImageInfo::from_header(&self.header)
    }

    pub fn negative(&mut self) -> &mut Self {
        ops::negative(&mut self.pixels);
        self
    }

    pub fn brightness(&mut self, delta: i32) -> &mut Self {
        ops::brightness(&mut self.pixels, delta);
        self
    }

    pub fn threshold(&mut self, t: i32) -> &mut Self {
        ops::threshold(&mut self.pixels, t);
        self
    }

    pub fn convolve(&mut self, kernel: &Kernel) -> Result<&mut Self, BmpError> {
        ops::convolve(&mut self.pixels, kernel)?;
        Ok(self)
    }

    pub fn apply_filter(&mut self, kind: FilterKind) -> Result<&mut Self, BmpError> {
        self.convolve(&kind.kernel())
    }

    pub fn equalize(&mut self) -> Equalization {
        ops::equalize_gray8(&mut self.pixels)
    }

    /// Serialize back to BMP bytes.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        bmp::encode_gray8(self, &stop)
    }
}

/// A 24-bit color BMP, RGB in memory.
#[derive(Clone, Debug)]
pub struct Image24 {
    header: BmpHeader,
    pixels: PixelBuffer<RGB8>,
}

impl Image24 {
    /// A new image with a standard header.
    pub fn new(width: u32, height: u32, fill: RGB8) -> Result<Self, BmpError> {
        let header = build_header(width, height, PixelLayout::Rgb8)?;
        let pixels = PixelBuffer::filled(width as usize, height as usize, fill)?;
        Ok(Self::from_parts(header, pixels))
    }

    pub(crate) fn from_parts(header: BmpHeader, pixels: PixelBuffer<RGB8>) -> Self {
        Self { header, pixels }
    }

    pub fn header(&self) -> &BmpHeader {
        &self.header
    }

    pub fn pixels(&self) -> &PixelBuffer<RGB8> {
        &self.pixels
    }

    /// All pixels in row-major order, mutable. The grid itself stays the
    /// size the header declares.
    pub fn pixels_mut(&mut self) -> &mut [RGB8] {
        self.pixels.pixels_mut()
    }

    /// Mutable pixels of row `row`, top row first.
    pub fn row_mut(&mut self, row: usize) -> &mut [RGB8] {
        self.pixels.row_mut(row)
    }

    /// Overwrite the pixel at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize, value: RGB8) {
        self.pixels.set(row, col, value);
    }

    pub fn describe(&self) -> ImageInfo {
        ImageInfo::from_header(&self.header)
    }

    pub fn negative(&mut self) -> &mut Self {
        ops::negative(&mut self.pixels);
        self
    }

    pub fn brightness(&mut self, delta: i32) -> &mut Self {
        ops::brightness(&mut self.pixels, delta);
        self
    }

    pub fn grayscale(&mut self) -> &mut Self {
        ops::grayscale(&mut self.pixels);
        self
    }

    pub fn convolve(&mut self, kernel: &Kernel) -> Result<&mut Self, BmpError> {
        ops::convolve(&mut self.pixels, kernel)?;
        Ok(self)
    }

    pub fn apply_filter(&mut self, kind: FilterKind) -> Result<&mut Self, BmpError> {
        self.convolve(&kind.kernel())
    }

    pub fn equalize(&mut self) -> Equalization {
        ops::equalize_rgb24(&mut self.pixels)
    }

    /// Serialize back to BMP bytes.
    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        bmp::encode_rgb24(self, &stop)
    }
}

/// Either supported image kind.
#[derive(Clone, Debug)]
pub enum Image {
    Gray8(Image8),
    Rgb24(Image24),
}

impl Image {
    pub fn layout(&self) -> PixelLayout {
        match self {
            Self::Gray8(_) => PixelLayout::Gray8,
            Self::Rgb24(_) => PixelLayout::Rgb8,
        }
    }

    pub fn describe(&self) -> ImageInfo {
        match self {
            Self::Gray8(img) => img.describe(),
            Self::Rgb24(img) => img.describe(),
        }
    }

    pub fn negative(&mut self) -> &mut Self {
        match self {
            Self::Gray8(img) => {
                img.negative();
            }
            Self::Rgb24(img) => {
                img.negative();
            }
        }
        self
    }

    pub fn brightness(&mut self, delta: i32) -> &mut Self {
        match self {
            Self::Gray8(img) => {
                img.brightness(delta);
            }
            Self::Rgb24(img) => {
                img.brightness(delta);
            }
        }
        self
    }

    pub fn apply_filter(&mut self, kind: FilterKind) -> Result<&mut Self, BmpError> {
        match self {
            Self::Gray8(img) => {
                img.apply_filter(kind)?;
            }
            Self::Rgb24(img) => {
                img.apply_filter(kind)?;
            }
        }
        Ok(self)
    }

    pub fn equalize(&mut self) -> Equalization {
        match self {
            Self::Gray8(img) => img.equalize(),
            Self::Rgb24(img) => img.equalize(),
        }
    }

    pub fn encode(&self, stop: impl Stop) -> Result<Vec<u8>, BmpError> {
        match self {
            Self::Gray8(img) => img.encode(stop),
            Self::Rgb24(img) => img.encode(stop),
        }
    }

    pub fn as_gray8(&self) -> Option<&Image8> {
        match self {
            Self::Gray8(img) => Some(img),
            Self::Rgb24(_) => None,
        }
    }

    pub fn as_rgb24(&self) -> Option<&Image24> {
        match self {
            Self::Rgb24(img) => Some(img),
            Self::Gray8(_) => None,
        }
    }
}

impl From<Image8> for Image {
    fn from(img: Image8) -> Self {
        Self::Gray8(img)
    }
}

impl From<Image24> for Image {
    fn from(img: Image24) -> Self {
        Self::Rgb24(img)
    }
}
