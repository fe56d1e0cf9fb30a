//! Uncompressed 8-bit and 24-bit BMP decoder.
//!
//! File rows are stored bottom-up with each row padded to a multiple of four
//! bytes. The decoder walks the file rows in order and fills the buffer from
//! its last row upward, so buffer row 0 is the top of the image.

use enough::Stop;
use rgb::RGB8;

use super::header::{BmpHeader, HEADER_LEN, Palette};
use super::utils::bgr_row_to_rgb;
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::pixel::{Pixel, PixelLayout};

// ── Cursor for reading from &[u8] ───────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn set_position(&mut self, pos: usize) -> Result<(), BmpError> {
        if pos > self.data.len() {
            return Err(BmpError::Format(format!(
                "pixel data offset {pos} is past end of file ({} bytes)",
                self.data.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }

    /// Skip up to `n` bytes, stopping at end of input.
    fn skip_lenient(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Next `n` bytes, or `None` if fewer remain.
    fn read_slice(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }
}

// ── Header ──────────────────────────────────────────────────────────

/// Parse and validate the header for the expected pixel layout.
pub(crate) fn parse_header(data: &[u8], layout: PixelLayout) -> Result<BmpHeader, BmpError> {
    let header = BmpHeader::parse(data)?;
    header.validate(layout)?;
    Ok(header)
}

/// Reject pixel data offsets that point back into the header or palette.
pub(crate) fn check_data_offset(header: &BmpHeader, min: usize) -> Result<(), BmpError> {
    let offset = header.data_offset();
    if (offset as usize) < min {
        return Err(BmpError::Format(format!(
            "pixel data offset {offset} overlaps the first {min} bytes of header data"
        )));
    }
    Ok(())
}

/// The 1024 palette bytes directly after the header.
pub(crate) fn read_palette(data: &[u8]) -> Result<Palette, BmpError> {
    Palette::parse(data.get(HEADER_LEN..).unwrap_or(&[]))
}

// ── Pixel rows ──────────────────────────────────────────────────────

/// Decode 8-bit rows. Samples are raw intensities, not palette lookups.
pub(crate) fn decode_gray8(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer<u8>, BmpError> {
    read_rows(data, header, stop, |src, dst: &mut [u8]| {
        dst.copy_from_slice(src);
        Ok(())
    })
}

/// Decode 24-bit BGR rows into RGB pixels.
pub(crate) fn decode_rgb24(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
) -> Result<PixelBuffer<RGB8>, BmpError> {
    read_rows(data, header, stop, bgr_row_to_rgb)
}

fn read_rows<P: Pixel>(
    data: &[u8],
    header: &BmpHeader,
    stop: &dyn Stop,
    mut convert: impl FnMut(&[u8], &mut [P]) -> Result<(), BmpError>,
) -> Result<PixelBuffer<P>, BmpError> {
    // validate() guarantees both are positive
    let width = header.width() as usize;
    let height = header.height() as usize;
    let row_bytes = width
        .checked_mul(P::layout().bytes_per_pixel())
        .ok_or(BmpError::DimensionsTooLarge {
            width: width as u32,
            height: height as u32,
        })?;
    let padding = header.row_padding();
    let offset = header.data_offset() as usize;

    let mut bytes = Cursor::new(data);
    bytes.set_position(offset)?;

    // Every row but the last must carry its padding
    let needed = (row_bytes + padding)
        .checked_mul(height - 1)
        .and_then(|n| n.checked_add(row_bytes));
    if needed.is_none_or(|n| n > data.len() - offset) {
        return Err(BmpError::Format(format!(
            "pixel data truncated: {width}x{height} needs more than the {} bytes after offset {offset}",
            data.len() - offset
        )));
    }

    let mut pixels = PixelBuffer::<P>::new(width, height)?;
    for (n, row) in (0..height).rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        let src = bytes.read_slice(row_bytes).ok_or_else(|| {
            BmpError::Format(format!(
                "pixel data truncated at file row {n} of {height}"
            ))
        })?;
        convert(src, pixels.row_mut(row))?;
        bytes.skip_lenient(padding);
    }

    Ok(pixels)
}
