//! The 54-byte BMP file + info header and the 8-bit palette.
//!
//! The header is kept as the raw bytes captured at load time. Fields are
//! decoded little-endian at fixed offsets on demand, and the bytes are
//! written back verbatim on save, reserved content included.

use crate::error::BmpError;
use crate::pixel::PixelLayout;

/// Size of BITMAPFILEHEADER + BITMAPINFOHEADER.
pub const HEADER_LEN: usize = 54;
/// Size of the 256-entry BGRX color table of an 8-bit BMP.
pub const PALETTE_LEN: usize = 1024;

// Field offsets, BITMAPFILEHEADER
const OFF_SIGNATURE: usize = 0;
const OFF_FILE_SIZE: usize = 2;
const OFF_RESERVED1: usize = 6;
const OFF_RESERVED2: usize = 8;
const OFF_DATA_OFFSET: usize = 10;
// Field offsets, BITMAPINFOHEADER
const OFF_DIB_SIZE: usize = 14;
const OFF_WIDTH: usize = 18;
const OFF_HEIGHT: usize = 22;
const OFF_PLANES: usize = 26;
const OFF_BIT_DEPTH: usize = 28;
const OFF_COMPRESSION: usize = 30;
const OFF_IMAGE_SIZE: usize = 34;
const OFF_X_RESOLUTION: usize = 38;
const OFF_Y_RESOLUTION: usize = 42;
const OFF_COLORS_USED: usize = 46;
const OFF_IMPORTANT_COLORS: usize = 50;

/// Parsed BMP header, retained as its original bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct BmpHeader {
    raw: [u8; HEADER_LEN],
}

impl BmpHeader {
    /// Capture the first 54 bytes of `data` as a header.
    ///
    /// Fails with [`BmpError::Format`] if fewer than 54 bytes are available
    /// or the signature is not `BM`. No field validation happens here; see
    /// [`BmpHeader::validate`].
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        let raw: [u8; HEADER_LEN] = data
            .get(..HEADER_LEN)
            .and_then(|h| h.try_into().ok())
            .ok_or_else(|| {
                BmpError::Format(format!(
                    "truncated header: {} of {HEADER_LEN} bytes",
                    data.len().min(HEADER_LEN)
                ))
            })?;
        if raw[OFF_SIGNATURE..OFF_SIGNATURE + 2] != *b"BM" {
            return Err(BmpError::Format("missing 'BM' signature".into()));
        }
        Ok(Self { raw })
    }

    /// Check that this header describes an uncompressed, bottom-up image of
    /// the given layout.
    pub fn validate(&self, expected: PixelLayout) -> Result<(), BmpError> {
        let depth = self.bit_depth();
        if depth != expected.bit_depth() {
            return Err(BmpError::UnsupportedFormat(format!(
                "bit depth is {depth}, expected {}",
                expected.bit_depth()
            )));
        }
        let compression = self.compression();
        if compression != 0 {
            return Err(BmpError::UnsupportedFormat(format!(
                "compression is {compression}, only uncompressed (0) is supported"
            )));
        }
        let width = self.width();
        if width <= 0 {
            return Err(BmpError::UnsupportedFormat(format!(
                "width is {width}, must be positive"
            )));
        }
        let height = self.height();
        if height <= 0 {
            return Err(BmpError::UnsupportedFormat(format!(
                "height is {height}, top-down and empty bitmaps are not supported"
            )));
        }
        Ok(())
    }

    /// The 54 header bytes exactly as loaded.
    pub fn as_bytes(&self) -> &[u8; HEADER_LEN] {
        &self.raw
    }

    fn u16_at(&self, off: usize) -> u16 {
        u16::from_le_bytes([self.raw[off], self.raw[off + 1]])
    }

    fn u32_at(&self, off: usize) -> u32 {
        u32::from_le_bytes([
            self.raw[off],
            self.raw[off + 1],
            self.raw[off + 2],
            self.raw[off + 3],
        ])
    }

    fn i32_at(&self, off: usize) -> i32 {
        self.u32_at(off) as i32
    }

    pub fn file_size(&self) -> u32 {
        self.u32_at(OFF_FILE_SIZE)
    }

    pub fn reserved(&self) -> (u16, u16) {
        (self.u16_at(OFF_RESERVED1), self.u16_at(OFF_RESERVED2))
    }

    /// Byte offset of the first pixel row.
    pub fn data_offset(&self) -> u32 {
        self.u32_at(OFF_DATA_OFFSET)
    }

    pub fn dib_header_size(&self) -> u32 {
        self.u32_at(OFF_DIB_SIZE)
    }

    pub fn width(&self) -> i32 {
        self.i32_at(OFF_WIDTH)
    }

    /// Positive for bottom-up bitmaps.
    pub fn height(&self) -> i32 {
        self.i32_at(OFF_HEIGHT)
    }

    pub fn planes(&self) -> u16 {
        self.u16_at(OFF_PLANES)
    }

    pub fn bit_depth(&self) -> u16 {
        self.u16_at(OFF_BIT_DEPTH)
    }

    pub fn compression(&self) -> u32 {
        self.u32_at(OFF_COMPRESSION)
    }

    /// The image size field as stored; 0 is legal for uncompressed data.
    pub fn declared_image_size(&self) -> u32 {
        self.u32_at(OFF_IMAGE_SIZE)
    }

    /// Horizontal and vertical resolution in pixels per meter.
    pub fn resolution(&self) -> (i32, i32) {
        (self.i32_at(OFF_X_RESOLUTION), self.i32_at(OFF_Y_RESOLUTION))
    }

    pub fn colors_used(&self) -> u32 {
        self.u32_at(OFF_COLORS_USED)
    }

    pub fn important_colors(&self) -> u32 {
        self.u32_at(OFF_IMPORTANT_COLORS)
    }

    /// Unpadded bytes per row.
    pub(crate) fn row_bytes(&self) -> usize {
        self.width().max(0) as usize * usize::from(self.bit_depth() / 8)
    }

    /// Bytes per row on disk, padded to a multiple of 4.
    pub fn padded_row_stride(&self) -> usize {
        padded_row_stride(self.row_bytes())
    }

    /// Zero bytes following each row on disk.
    pub fn row_padding(&self) -> usize {
        self.padded_row_stride() - self.row_bytes()
    }

    /// Declared image size, or `padded_row_stride * height` when the header
    /// leaves it at 0.
    pub fn image_data_size(&self) -> u64 {
        match self.declared_image_size() {
            0 => self.padded_row_stride() as u64 * u64::from(self.height().unsigned_abs()),
            n => u64::from(n),
        }
    }
}

impl core::fmt::Debug for BmpHeader {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BmpHeader")
            .field("file_size", &self.file_size())
            .field("data_offset", &self.data_offset())
            .field("dib_header_size", &self.dib_header_size())
            .field("width", &self.width())
            .field("height", &self.height())
            .field("planes", &self.planes())
            .field("bit_depth", &self.bit_depth())
            .field("compression", &self.compression())
            .field("image_size", &self.declared_image_size())
            .finish_non_exhaustive()
    }
}

/// `ceil(row_bytes / 4) * 4`.
pub(crate) fn padded_row_stride(row_bytes: usize) -> usize {
    row_bytes.div_ceil(4) * 4
}

/// The 256-entry color table of an 8-bit BMP, kept opaque.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    raw: [u8; PALETTE_LEN],
}

impl Palette {
    /// Capture the first 1024 bytes of `data`.
    pub fn parse(data: &[u8]) -> Result<Self, BmpError> {
        let raw: [u8; PALETTE_LEN] = data
            .get(..PALETTE_LEN)
            .and_then(|p| p.try_into().ok())
            .ok_or_else(|| {
                BmpError::Format(format!(
                    "truncated palette: {} of {PALETTE_LEN} bytes",
                    data.len().min(PALETTE_LEN)
                ))
            })?;
        Ok(Self { raw })
    }

    /// Identity grayscale ramp: entry `i` is `(i, i, i, 0)`.
    pub fn grayscale() -> Self {
        let mut raw = [0u8; PALETTE_LEN];
        for (i, entry) in raw.chunks_exact_mut(4).enumerate() {
            entry[..3].fill(i as u8);
        }
        Self { raw }
    }

    pub fn as_bytes(&self) -> &[u8; PALETTE_LEN] {
        &self.raw
    }

    /// `(blue, green, red, reserved)` of entry `index`.
    pub fn entry(&self, index: u8) -> [u8; 4] {
        let off = usize::from(index) * 4;
        [
            self.raw[off],
            self.raw[off + 1],
            self.raw[off + 2],
            self.raw[off + 3],
        ]
    }
}

impl core::fmt::Debug for Palette {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Palette").finish_non_exhaustive()
    }
}

/// Assemble a fresh BITMAPINFOHEADER-style header for a `width × height`
/// image of the given layout.
///
/// Used when an image is created in memory rather than loaded.
pub(crate) fn build_header(width: u32, height: u32, layout: PixelLayout) -> Result<BmpHeader, BmpError> {
    let too_large = || BmpError::DimensionsTooLarge { width, height };
    if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(too_large());
    }
    let palette_len = match layout {
        PixelLayout::Gray8 => PALETTE_LEN,
        PixelLayout::Rgb8 => 0,
    };
    let stride = (width as usize)
        .checked_mul(layout.bytes_per_pixel())
        .map(padded_row_stride)
        .ok_or_else(too_large)?;
    let image_size = stride
        .checked_mul(height as usize)
        .and_then(|s| u32::try_from(s).ok())
        .ok_or_else(too_large)?;
    let data_offset = (HEADER_LEN + palette_len) as u32;
    let file_size = image_size.checked_add(data_offset).ok_or_else(too_large)?;
    let colors_used: u32 = if palette_len > 0 { 256 } else { 0 };

    let mut out = Vec::with_capacity(HEADER_LEN);
    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&data_offset.to_le_bytes());

    // DIB header (BITMAPINFOHEADER, 40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&layout.bit_depth().to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // compression
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&colors_used.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    BmpHeader::parse(&out)
}
