//! Channel swizzle between on-disk BGR rows and in-memory RGB rows.

use rgb::{ComponentBytes, RGB8};

use crate::error::BmpError;

/// Copy one BGR file row into RGB pixels.
pub(crate) fn bgr_row_to_rgb(src: &[u8], dst: &mut [RGB8]) -> Result<(), BmpError> {
    let out = dst.as_bytes_mut();
    out.copy_from_slice(src);
    swap_red_blue(out)
}

/// Append RGB pixels to `out` as a BGR file row.
pub(crate) fn rgb_row_to_bgr(src: &[RGB8], out: &mut Vec<u8>) -> Result<(), BmpError> {
    let start = out.len();
    out.extend_from_slice(src.as_bytes());
    swap_red_blue(&mut out[start..])
}

#[cfg(feature = "simd")]
fn swap_red_blue(buf: &mut [u8]) -> Result<(), BmpError> {
    if buf.is_empty() {
        return Ok(());
    }
    garb::bytes::rgb_to_bgr_inplace(buf)
        .map_err(|e| BmpError::InvalidParameter(format!("swizzle: {e}")))
}

#[cfg(not(feature = "simd"))]
fn swap_red_blue(buf: &mut [u8]) -> Result<(), BmpError> {
    if buf.len() % 3 != 0 {
        return Err(BmpError::InvalidParameter(format!(
            "swizzle: {} bytes is not a whole number of pixels",
            buf.len()
        )));
    }
    for px in buf.chunks_exact_mut(3) {
        px.swap(0, 2);
    }
    Ok(())
}
