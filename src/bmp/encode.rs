//! BMP encoder: writes the retained header and palette back verbatim,
//! zero-fills up to the pixel data offset, then writes the pixel rows
//! bottom-up with zeroed row padding.

use enough::Stop;
use rgb::RGB8;

use super::header::{BmpHeader, Palette, padded_row_stride};
use super::utils::rgb_row_to_bgr;
use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::pixel::Pixel;

/// Encode an 8-bit image.
pub(crate) fn encode_gray8(
    header: &BmpHeader,
    palette: &Palette,
    pixels: &PixelBuffer<u8>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let mut out = start_file(header, Some(palette), pixels)?;
    write_rows(&mut out, pixels, stop, |row, out| {
        out.extend_from_slice(row);
        Ok(())
    })?;
    Ok(out)
}

/// Encode a 24-bit image, RGB→BGR.
pub(crate) fn encode_rgb24(
    header: &BmpHeader,
    pixels: &PixelBuffer<RGB8>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpError> {
    let mut out = start_file(header, None, pixels)?;
    write_rows(&mut out, pixels, stop, rgb_row_to_bgr)?;
    Ok(out)
}

/// Header, optional palette, then zero-fill up to the data offset.
fn start_file<P: Pixel>(
    header: &BmpHeader,
    palette: Option<&Palette>,
    pixels: &PixelBuffer<P>,
) -> Result<Vec<u8>, BmpError> {
    let w = pixels.width();
    let h = pixels.height();
    if i64::from(header.width()) != w as i64 || i64::from(header.height()) != h as i64 {
        return Err(BmpError::InvalidParameter(format!(
            "header describes {}x{} but buffer is {w}x{h}",
            header.width(),
            header.height()
        )));
    }
    let too_large = || BmpError::DimensionsTooLarge {
        width: w as u32,
        height: h as u32,
    };
    let pixel_data_size = w
        .checked_mul(P::layout().bytes_per_pixel())
        .map(padded_row_stride)
        .and_then(|stride| stride.checked_mul(h))
        .ok_or_else(too_large)?;
    let offset = header.data_offset() as usize;
    let file_size = offset.checked_add(pixel_data_size).ok_or_else(too_large)?;

    let mut out = Vec::new();
    out.try_reserve_exact(file_size)
        .map_err(|e| BmpError::Allocation(format!("{file_size} byte output: {e}")))?;
    out.extend_from_slice(header.as_bytes());
    if let Some(palette) = palette {
        out.extend_from_slice(palette.as_bytes());
    }
    if offset < out.len() {
        return Err(BmpError::InvalidParameter(format!(
            "pixel data offset {offset} overlaps {} bytes of header data",
            out.len()
        )));
    }
    out.resize(offset, 0);
    Ok(out)
}

fn write_rows<P: Pixel>(
    out: &mut Vec<u8>,
    pixels: &PixelBuffer<P>,
    stop: &dyn Stop,
    mut write_row: impl FnMut(&[P], &mut Vec<u8>) -> Result<(), BmpError>,
) -> Result<(), BmpError> {
    let row_bytes = pixels.width() * P::layout().bytes_per_pixel();
    let pad_bytes = padded_row_stride(row_bytes) - row_bytes;
    for (n, row) in pixels.rows().rev().enumerate() {
        if n % 16 == 0 {
            stop.check()?;
        }
        write_row(row, out)?;
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }
    Ok(())
}
