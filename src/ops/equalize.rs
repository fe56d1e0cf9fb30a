//! Histogram equalization.
//!
//! Grayscale images are remapped directly. Color images are equalized on
//! their luminance channel only: each pixel is split into Y, U and V, Y is
//! remapped through the histogram table, and the pixel is rebuilt from the
//! new Y and the untouched chrominance.

use log::warn;
use rgb::RGB8;

use crate::buffer::PixelBuffer;

use super::point::{luminance, to_u8};

/// Result of an equalization pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Equalization {
    /// The remapping table was applied.
    Applied,
    /// Every pixel sits on one level; the image was left unchanged.
    Uniform,
}

/// Intensity histogram with 256 bins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    bins: [u64; 256],
}

impl Histogram {
    pub fn from_levels(levels: impl IntoIterator<Item = u8>) -> Self {
        let mut bins = [0u64; 256];
        for v in levels {
            bins[usize::from(v)] += 1;
        }
        Self { bins }
    }

    pub fn bins(&self) -> &[u64; 256] {
        &self.bins
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().sum()
    }

    /// Running sum of the bins.
    pub fn cdf(&self) -> [u64; 256] {
        let mut cdf = [0u64; 256];
        let mut acc = 0u64;
        for (c, &n) in cdf.iter_mut().zip(&self.bins) {
            acc += n;
            *c = acc;
        }
        cdf
    }

    /// Level remapping table, or `None` when the histogram has fewer than
    /// two occupied levels.
    ///
    /// `map[i] = round((cdf[i] - cdf_min) * 255 / (n - cdf_min))`, where
    /// `cdf_min` is the smallest nonzero cumulative count.
    pub fn equalization_map(&self) -> Option<[u8; 256]> {
        let cdf = self.cdf();
        let n = self.total();
        let cdf_min = cdf.iter().copied().find(|&c| c != 0)?;
        let range = n - cdf_min;
        if range == 0 {
            return None;
        }
        let mut map = [0u8; 256];
        for (m, &c) in map.iter_mut().zip(&cdf) {
            if c >= cdf_min {
                *m = to_u8((c - cdf_min) as f64 * 255.0 / range as f64);
            }
        }
        Some(map)
    }
}

/// Equalize an 8-bit image in place.
pub fn equalize_gray8(pixels: &mut PixelBuffer<u8>) -> Equalization {
    let hist = Histogram::from_levels(pixels.pixels().iter().copied());
    let Some(map) = hist.equalization_map() else {
        warn!("histogram equalization skipped: image has a single intensity level");
        return Equalization::Uniform;
    };
    for v in pixels.pixels_mut() {
        *v = map[usize::from(*v)];
    }
    Equalization::Applied
}

/// Luminance/chrominance triple.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Yuv {
    y: f64,
    u: f64,
    v: f64,
}

impl Yuv {
    fn from_rgb(px: RGB8) -> Self {
        let (r, g, b) = (f64::from(px.r), f64::from(px.g), f64::from(px.b));
        Self {
            y: luminance(px),
            u: -0.14713 * r - 0.28886 * g + 0.436 * b,
            v: 0.615 * r - 0.51499 * g - 0.10001 * b,
        }
    }

    fn to_rgb(self) -> RGB8 {
        RGB8::new(
            to_u8(self.y + 1.13983 * self.v),
            to_u8(self.y - 0.39465 * self.u - 0.58060 * self.v),
            to_u8(self.y + 2.03211 * self.u),
        )
    }

    /// Histogram bin of this pixel's luminance.
    fn level(self) -> u8 {
        to_u8(self.y)
    }
}

/// Equalize a color image on its luminance, keeping chrominance.
pub fn equalize_rgb24(pixels: &mut PixelBuffer<RGB8>) -> Equalization {
    let yuv: Vec<Yuv> = pixels.pixels().iter().map(|&px| Yuv::from_rgb(px)).collect();
    let hist = Histogram::from_levels(yuv.iter().map(|p| p.level()));
    let Some(map) = hist.equalization_map() else {
        warn!("histogram equalization skipped: image has a single luminance level");
        return Equalization::Uniform;
    };
    for (px, src) in pixels.pixels_mut().iter_mut().zip(yuv) {
        let y = f64::from(map[usize::from(src.level())]);
        *px = Yuv { y, ..src }.to_rgb();
    }
    Equalization::Applied
}
