//! Owned top-down pixel grid.
//!
//! Row 0 is the top of the image as displayed. Rows are stored contiguously
//! with `stride == width`; BMP row padding never reaches memory.

use imgref::{ImgRef, ImgVec};

use crate::error::BmpError;
use crate::pixel::Pixel;

/// A rectangular grid of pixels backed by an [`imgref::ImgVec`].
#[derive(Clone, Debug)]
pub struct PixelBuffer<P> {
    img: ImgVec<P>,
}

impl<P: PartialEq> PartialEq for PixelBuffer<P> {
    fn eq(&self, other: &Self) -> bool {
        self.img.width() == other.img.width()
            && self.img.height() == other.img.height()
            && self.img.buf() == other.img.buf()
    }
}

impl<P: Pixel> PixelBuffer<P> {
    /// Allocate a `width × height` buffer filled with `P::default()`.
    ///
    /// Returns [`BmpError::Allocation`] if either dimension is zero, the
    /// size overflows, or the allocator refuses the request.
    pub fn new(width: usize, height: usize) -> Result<Self, BmpError> {
        Self::filled(width, height, P::default())
    }

    /// Allocate a buffer with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: P) -> Result<Self, BmpError> {
        if width == 0 || height == 0 {
            return Err(BmpError::Allocation(format!(
                "zero-sized buffer {width}x{height}"
            )));
        }
        let len = width.checked_mul(height).ok_or_else(|| {
            BmpError::Allocation(format!("{width}x{height} pixel count overflows"))
        })?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|e| BmpError::Allocation(format!("{width}x{height}: {e}")))?;
        buf.resize(len, value);
        Ok(Self {
            img: ImgVec::new(buf, width, height),
        })
    }

    /// Wrap existing row-major pixels. `pixels.len()` must equal `width * height`.
    pub fn from_vec(pixels: Vec<P>, width: usize, height: usize) -> Result<Self, BmpError> {
        if width == 0 || height == 0 {
            return Err(BmpError::Allocation(format!(
                "zero-sized buffer {width}x{height}"
            )));
        }
        if width.checked_mul(height) != Some(pixels.len()) {
            return Err(BmpError::InvalidParameter(format!(
                "{} pixels cannot fill a {width}x{height} buffer",
                pixels.len()
            )));
        }
        Ok(Self {
            img: ImgVec::new(pixels, width, height),
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.img.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.img.height()
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(
            row < self.height() && col < self.width(),
            "pixel ({row}, {col}) outside {}x{}",
            self.width(),
            self.height()
        );
        row * self.width() + col
    }

    /// Pixel at (`row`, `col`).
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> P {
        self.img.buf()[self.idx(row, col)]
    }

    /// Overwrite the pixel at (`row`, `col`).
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: P) {
        let i = self.idx(row, col);
        self.img.buf_mut()[i] = value;
    }

    /// Independent deep copy, for algorithms that read stale values while
    /// writing new ones.
    pub fn snapshot(&self) -> Self {
        self.clone()
    }

    /// Pixels of row `row`.
    pub fn row(&self, row: usize) -> &[P] {
        let w = self.width();
        &self.img.buf()[row * w..(row + 1) * w]
    }

    /// Mutable pixels of row `row`.
    pub fn row_mut(&mut self, row: usize) -> &mut [P] {
        let w = self.width();
        &mut self.img.buf_mut()[row * w..(row + 1) * w]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[P]> + ExactSizeIterator {
        self.img.buf().chunks_exact(self.width())
    }

    /// All pixels in row-major order.
    pub fn pixels(&self) -> &[P] {
        self.img.buf()
    }

    /// All pixels in row-major order, mutable.
    pub fn pixels_mut(&mut self) -> &mut [P] {
        self.img.buf_mut()
    }

    /// Borrow as an [`ImgRef`] for interop with the `imgref` ecosystem.
    pub fn as_imgref(&self) -> ImgRef<'_, P> {
        self.img.as_ref()
    }

    /// Take the backing [`ImgVec`].
    pub fn into_imgvec(self) -> ImgVec<P> {
        self.img
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::<u8>::new(0, 4),
            Err(BmpError::Allocation(_))
        ));
        assert!(matches!(
            PixelBuffer::<RGB8>::new(4, 0),
            Err(BmpError::Allocation(_))
        ));
    }

    #[test]
    fn rejects_overflowing_size() {
        assert!(matches!(
            PixelBuffer::<u8>::new(usize::MAX, 2),
            Err(BmpError::Allocation(_))
        ));
    }

    #[test]
    fn get_set_addresses_row_then_column() {
        let mut buf = PixelBuffer::<u8>::new(3, 2).unwrap();
        buf.set(1, 2, 9);
        assert_eq!(buf.get(1, 2), 9);
        assert_eq!(buf.pixels(), &[0, 0, 0, 0, 0, 9]);
        assert_eq!(buf.row(1), &[0, 0, 9]);
    }

    #[test]
    fn snapshot_is_independent() {
        let mut buf = PixelBuffer::filled(2, 2, RGB8::new(1, 2, 3)).unwrap();
        let snap = buf.snapshot();
        buf.set(0, 0, RGB8::new(9, 9, 9));
        assert_eq!(snap.get(0, 0), RGB8::new(1, 2, 3));
        assert_ne!(snap, buf);
    }

    #[test]
    fn from_vec_checks_length() {
        assert!(PixelBuffer::from_vec(vec![0u8; 6], 3, 2).is_ok());
        assert!(matches!(
            PixelBuffer::from_vec(vec![0u8; 5], 3, 2),
            Err(BmpError::InvalidParameter(_))
        ));
    }

    #[test]
    fn imgref_view_matches() {
        let buf = PixelBuffer::from_vec(vec![1u8, 2, 3, 4], 2, 2).unwrap();
        let view = buf.as_imgref();
        assert_eq!(view.width(), 2);
        assert_eq!(view.height(), 2);
        assert_eq!(buf.rows().count(), 2);
    }
}
