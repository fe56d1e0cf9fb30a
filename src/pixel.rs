use rgb::RGB8;

/// Pixel memory layout of a decoded buffer.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit intensity (raw palette index of an 8-bit BMP).
    Gray8,
    /// 3 channels, 8-bit RGB.
    Rgb8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout, both in memory and on disk.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 => 3,
        }
    }

    /// BMP `bits per pixel` header value for this layout.
    pub fn bit_depth(&self) -> u16 {
        match self {
            Self::Gray8 => 8,
            Self::Rgb8 => 24,
        }
    }
}

/// A pixel type stored in a [`crate::PixelBuffer`].
///
/// Implemented for `u8` (grayscale) and [`RGB8`] (color). Channel index 0 is
/// red for color pixels.
pub trait Pixel: Copy + Default + PartialEq + core::fmt::Debug {
    /// Memory layout this pixel type corresponds to.
    fn layout() -> PixelLayout;

    /// Read channel `c`.
    fn channel(self, c: usize) -> u8;

    /// Build a pixel from per-channel values.
    fn from_channels(f: impl FnMut(usize) -> u8) -> Self;

    /// Apply `f` to every channel.
    fn map_channels(self, mut f: impl FnMut(u8) -> u8) -> Self {
        Self::from_channels(|c| f(self.channel(c)))
    }
}

impl Pixel for u8 {
    #[inline]
    fn layout() -> PixelLayout {
        PixelLayout::Gray8
    }

    #[inline]
    fn channel(self, _c: usize) -> u8 {
        self
    }

    #[inline]
    fn from_channels(mut f: impl FnMut(usize) -> u8) -> Self {
        f(0)
    }
}

impl Pixel for RGB8 {
    #[inline]
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }

    #[inline]
    fn channel(self, c: usize) -> u8 {
        match c {
            0 => self.r,
            1 => self.g,
            _ => self.b,
        }
    }

    #[inline]
    fn from_channels(mut f: impl FnMut(usize) -> u8) -> Self {
        RGB8::new(f(0), f(1), f(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_sizes() {
        assert_eq!(PixelLayout::Gray8.bytes_per_pixel(), 1);
        assert_eq!(PixelLayout::Rgb8.bytes_per_pixel(), 3);
        assert_eq!(PixelLayout::Gray8.bit_depth(), 8);
        assert_eq!(PixelLayout::Rgb8.bit_depth(), 24);
        assert_eq!(<RGB8 as Pixel>::layout().channels(), 3);
    }

    #[test]
    fn map_channels_touches_every_channel() {
        let px = RGB8::new(10, 20, 30).map_channels(|v| v + 1);
        assert_eq!(px, RGB8::new(11, 21, 31));
        assert_eq!(7u8.map_channels(|v| 255 - v), 248);
    }
}
