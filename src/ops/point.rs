//! Per-sample point transforms. All run in place with no allocation.

use rgb::RGB8;

use crate::buffer::PixelBuffer;
use crate::pixel::Pixel;

/// Rec. 601 luma weights.
pub(crate) const LUMA_R: f64 = 0.299;
pub(crate) const LUMA_G: f64 = 0.587;
pub(crate) const LUMA_B: f64 = 0.114;

/// Unrounded luminance of an RGB pixel.
#[inline]
pub(crate) fn luminance(px: RGB8) -> f64 {
    LUMA_R * f64::from(px.r) + LUMA_G * f64::from(px.g) + LUMA_B * f64::from(px.b)
}

/// Round and clamp to a byte.
#[inline]
pub(crate) fn to_u8(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// `v ← 255 - v` on every channel.
pub fn negative<P: Pixel>(pixels: &mut PixelBuffer<P>) {
    for px in pixels.pixels_mut() {
        *px = px.map_channels(|v| 255 - v);
    }
}

/// `v ← clamp(v + delta, 0, 255)` on every channel.
///
/// Any `delta` is accepted; values beyond ±255 saturate.
pub fn brightness<P: Pixel>(pixels: &mut PixelBuffer<P>, delta: i32) {
    for px in pixels.pixels_mut() {
        *px = px.map_channels(|v| (i32::from(v).saturating_add(delta)).clamp(0, 255) as u8);
    }
}

/// Binarize: `v ← 255 if v ≥ t else 0`, with `t` first clamped to [0, 255].
pub fn threshold(pixels: &mut PixelBuffer<u8>, t: i32) {
    let t = t.clamp(0, 255) as u8;
    for v in pixels.pixels_mut() {
        *v = if *v >= t { 255 } else { 0 };
    }
}

/// Replace each pixel with its rounded luminance on all three channels.
pub fn grayscale(pixels: &mut PixelBuffer<RGB8>) {
    for px in pixels.pixels_mut() {
        let gray = to_u8(luminance(*px));
        *px = RGB8::new(gray, gray, gray);
    }
}
