//! BMP codec for uncompressed 8-bit grayscale and 24-bit color images
//! (internal).
//!
//! Use [`crate::DecodeRequest`] and the `encode` methods on the image types.

pub(crate) mod decode;
mod encode;
pub(crate) mod header;
mod utils;

use enough::Stop;
use log::debug;

use header::{HEADER_LEN, PALETTE_LEN};

use crate::error::BmpError;
use crate::image::{Image, Image8, Image24};
use crate::limits::Limits;
use crate::pixel::PixelLayout;

/// Decode an 8-bit BMP: header, palette, raw intensity rows.
pub(crate) fn decode_gray8(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image8, BmpError> {
    let header = decode::parse_header(data, PixelLayout::Gray8)?;
    check_limits(limits, header.width() as u32, header.height() as u32, PixelLayout::Gray8)?;
    decode::check_data_offset(&header, HEADER_LEN + PALETTE_LEN)?;
    let palette = decode::read_palette(data)?;
    stop.check()?;
    let pixels = decode::decode_gray8(data, &header, stop)?;
    debug!(
        "decoded 8-bit BMP {}x{}, data offset {}",
        pixels.width(),
        pixels.height(),
        header.data_offset()
    );
    Ok(Image8::from_parts(header, palette, pixels))
}

/// Decode a 24-bit BMP into RGB pixels.
pub(crate) fn decode_rgb24(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image24, BmpError> {
    let header = decode::parse_header(data, PixelLayout::Rgb8)?;
    check_limits(limits, header.width() as u32, header.height() as u32, PixelLayout::Rgb8)?;
    decode::check_data_offset(&header, HEADER_LEN)?;
    stop.check()?;
    let pixels = decode::decode_rgb24(data, &header, stop)?;
    debug!(
        "decoded 24-bit BMP {}x{}, data offset {}",
        pixels.width(),
        pixels.height(),
        header.data_offset()
    );
    Ok(Image24::from_parts(header, pixels))
}

/// Decode either supported depth, chosen by the header's bit depth field.
pub(crate) fn decode_any(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Image, BmpError> {
    let header = header::BmpHeader::parse(data)?;
    match header.bit_depth() {
        8 => decode_gray8(data, limits, stop).map(Image::Gray8),
        24 => decode_rgb24(data, limits, stop).map(Image::Rgb24),
        other => Err(BmpError::UnsupportedFormat(format!(
            "bit depth is {other}, only 8 and 24 are supported"
        ))),
    }
}

fn check_limits(
    limits: Option<&Limits>,
    width: u32,
    height: u32,
    layout: PixelLayout,
) -> Result<(), BmpError> {
    if let Some(limits) = limits {
        limits.check(width, height)?;
    }
    let out_bytes = (width as usize)
        .checked_mul(height as usize)
        .and_then(|px| px.checked_mul(layout.bytes_per_pixel()))
        .ok_or(BmpError::DimensionsTooLarge { width, height })?;
    if let Some(limits) = limits {
        limits.check_memory(out_bytes)?;
    }
    Ok(())
}

/// Encode an 8-bit image.
pub(crate) fn encode_gray8(image: &Image8, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let out = encode::encode_gray8(image.header(), image.palette(), image.pixels(), stop)?;
    debug!("encoded 8-bit BMP, {} bytes", out.len());
    Ok(out)
}

/// Encode a 24-bit image.
pub(crate) fn encode_rgb24(image: &Image24, stop: &dyn Stop) -> Result<Vec<u8>, BmpError> {
    let out = encode::encode_rgb24(image.header(), image.pixels(), stop)?;
    debug!("encoded 24-bit BMP, {} bytes", out.len());
    Ok(out)
}
