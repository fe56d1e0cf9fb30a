//! Square-kernel convolution over interior pixels.
//!
//! Pixels closer than `size / 2` to any edge keep their original value. Every
//! interior output pixel is computed from a snapshot of the buffer taken
//! before the first write, so already-filtered neighbors are never read.

use crate::buffer::PixelBuffer;
use crate::error::BmpError;
use crate::pixel::Pixel;

use super::point::to_u8;

/// An odd-sized square grid of weights, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    /// Build a `size × size` kernel from row-major weights.
    ///
    /// `size` must be odd and at least 3, and `weights` must hold exactly
    /// `size * size` values.
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, BmpError> {
        if size < 3 || size % 2 == 0 {
            return Err(BmpError::InvalidParameter(format!(
                "kernel size must be odd and at least 3, got {size}"
            )));
        }
        if size.checked_mul(size) != Some(weights.len()) {
            return Err(BmpError::InvalidParameter(format!(
                "{size}x{size} kernel needs {} weights, got {}",
                size * size,
                weights.len()
            )));
        }
        Ok(Self { size, weights })
    }

    /// Build a 3×3 kernel.
    pub fn square3(weights: [f32; 9]) -> Self {
        Self {
            size: 3,
            weights: weights.to_vec(),
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Distance from the center to an edge of the kernel. At least 1, since
    /// every constructor yields an odd size of 3 or more.
    pub fn offset(&self) -> usize {
        self.size / 2
    }

    /// Weight at kernel row `ky`, column `kx`.
    #[inline]
    pub fn weight(&self, ky: usize, kx: usize) -> f32 {
        self.weights[ky * self.size + kx]
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Named 3×3 filter presets.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Uniform average, all weights 1/9.
    Box,
    /// Binomial blur (1 2 1 / 2 4 2 / 1 2 1) / 16.
    Gaussian,
    /// Edge detector: −1 everywhere, 8 in the center.
    Outline,
    /// Diagonal relief.
    Emboss,
    /// Center 5, cross −1.
    Sharpen,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        Self::Box,
        Self::Gaussian,
        Self::Outline,
        Self::Emboss,
        Self::Sharpen,
    ];

    pub fn kernel(self) -> Kernel {
        match self {
            Self::Box => Kernel::square3([1.0 / 9.0; 9]),
            Self::Gaussian => Kernel::square3([
                1.0 / 16.0,
                2.0 / 16.0,
                1.0 / 16.0,
                2.0 / 16.0,
                4.0 / 16.0,
                2.0 / 16.0,
                1.0 / 16.0,
                2.0 / 16.0,
                1.0 / 16.0,
            ]),
            Self::Outline => Kernel::square3([
                -1.0, -1.0, -1.0, //
                -1.0, 8.0, -1.0, //
                -1.0, -1.0, -1.0,
            ]),
            Self::Emboss => Kernel::square3([
                -2.0, -1.0, 0.0, //
                -1.0, 1.0, 1.0, //
                0.0, 1.0, 2.0,
            ]),
            Self::Sharpen => Kernel::square3([
                0.0, -1.0, 0.0, //
                -1.0, 5.0, -1.0, //
                0.0, -1.0, 0.0,
            ]),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Box => "box blur",
            Self::Gaussian => "gaussian blur",
            Self::Outline => "outline",
            Self::Emboss => "emboss",
            Self::Sharpen => "sharpen",
        }
    }
}

/// Convolve `pixels` with `kernel` in place, channel by channel.
///
/// Fails with [`BmpError::InvalidParameter`] if the image is smaller than the
/// kernel in either dimension.
pub fn convolve<P: Pixel>(pixels: &mut PixelBuffer<P>, kernel: &Kernel) -> Result<(), BmpError> {
    let offset = kernel.offset();
    let (w, h) = (pixels.width(), pixels.height());
    if w < kernel.size() || h < kernel.size() {
        return Err(BmpError::InvalidParameter(format!(
            "{w}x{h} image is smaller than the {0}x{0} kernel",
            kernel.size()
        )));
    }

    let channels = P::layout().channels();
    let source = pixels.snapshot();
    for y in offset..h - offset {
        for x in offset..w - offset {
            let mut sums = [0f32; 3];
            for ky in 0..kernel.size() {
                let row = source.row(y + ky - offset);
                for kx in 0..kernel.size() {
                    let k = kernel.weight(ky, kx);
                    let px = row[x + kx - offset];
                    for (c, sum) in sums.iter_mut().enumerate().take(channels) {
                        *sum += f32::from(px.channel(c)) * k;
                    }
                }
            }
            pixels.set(y, x, P::from_channels(|c| to_u8(f64::from(sums[c]))));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb::RGB8;

    fn noise(w: usize, h: usize) -> PixelBuffer<u8> {
        let mut state: u32 = 0xDEAD_BEEF;
        let px = (0..w * h)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state as u8
            })
            .collect();
        PixelBuffer::from_vec(px, w, h).unwrap()
    }

    #[test]
    fn kernel_validation() {
        assert!(Kernel::new(3, vec![0.0; 9]).is_ok());
        assert!(Kernel::new(5, vec![0.0; 25]).is_ok());
        assert!(matches!(
            Kernel::new(4, vec![0.0; 16]),
            Err(BmpError::InvalidParameter(_))
        ));
        assert!(Kernel::new(1, vec![1.0]).is_err());
        assert!(Kernel::new(3, vec![0.0; 8]).is_err());
        assert_eq!(Kernel::new(5, vec![0.0; 25]).unwrap().offset(), 2);
        for kind in FilterKind::ALL {
            assert_eq!(kind.kernel().offset(), 1);
        }
    }

    #[test]
    fn border_ring_untouched_on_5x5() {
        let original = noise(5, 5);
        for kind in FilterKind::ALL {
            let mut img = original.clone();
            convolve(&mut img, &kind.kernel()).unwrap();
            for y in 0..5 {
                for x in 0..5 {
                    if y == 0 || y == 4 || x == 0 || x == 4 {
                        assert_eq!(img.get(y, x), original.get(y, x), "{kind:?} at ({y},{x})");
                    }
                }
            }
        }
    }

    #[test]
    fn reads_from_snapshot_not_partial_output() {
        // Horizontal gradient: with in-place aliasing the second interior
        // pixel would see the already-blurred first one.
        let px: Vec<u8> = (0..4).flat_map(|_| [0u8, 0, 180, 255]).collect();
        let mut img = PixelBuffer::from_vec(px, 4, 4).unwrap();
        convolve(&mut img, &FilterKind::Box.kernel()).unwrap();
        assert_eq!(img.get(1, 1), 60);
        assert_eq!(img.get(1, 2), 145);
        assert_eq!(img.get(2, 1), 60);
        assert_eq!(img.get(2, 2), 145);
    }

    #[test]
    fn identity_kernel_is_noop() {
        let original = noise(6, 4);
        let mut img = original.clone();
        let mut weights = vec![0.0; 9];
        weights[4] = 1.0;
        convolve(&mut img, &Kernel::new(3, weights).unwrap()).unwrap();
        assert_eq!(img, original);
    }

    #[test]
    fn outline_clamps_negative_to_zero() {
        let mut img = PixelBuffer::<u8>::filled(3, 3, 200).unwrap();
        img.set(1, 1, 0);
        convolve(&mut img, &FilterKind::Outline.kernel()).unwrap();
        assert_eq!(img.get(1, 1), 0);

        let mut img = PixelBuffer::<u8>::filled(3, 3, 0).unwrap();
        img.set(1, 1, 100);
        convolve(&mut img, &FilterKind::Outline.kernel()).unwrap();
        assert_eq!(img.get(1, 1), 255);
    }

    #[test]
    fn color_channels_convolved_independently() {
        let mut img = PixelBuffer::filled(3, 3, RGB8::new(0, 100, 200)).unwrap();
        img.set(1, 1, RGB8::new(90, 100, 200));
        convolve(&mut img, &FilterKind::Box.kernel()).unwrap();
        assert_eq!(img.get(1, 1), RGB8::new(10, 100, 200));
    }

    #[test]
    fn image_smaller_than_kernel_rejected() {
        let mut img = PixelBuffer::<u8>::new(2, 5).unwrap();
        assert!(matches!(
            convolve(&mut img, &FilterKind::Sharpen.kernel()),
            Err(BmpError::InvalidParameter(_))
        ));
        let mut img = PixelBuffer::<u8>::new(5, 5).unwrap();
        let big = Kernel::new(7, vec![0.0; 49]).unwrap();
        assert!(convolve(&mut img, &big).is_err());
    }

    #[test]
    fn larger_kernels_leave_wider_border() {
        let original = noise(7, 7);
        let mut img = original.clone();
        convolve(&mut img, &Kernel::new(5, vec![1.0 / 25.0; 25]).unwrap()).unwrap();
        for x in 0..7 {
            assert_eq!(img.get(1, x), original.get(1, x));
            assert_eq!(img.get(5, x), original.get(5, x));
        }
    }
}
