use enough::Stop;

use crate::bmp;
use crate::error::BmpError;
use crate::image::{Image, Image8, Image24};
use crate::limits::Limits;

/// Decode configuration for a BMP byte slice.
///
/// ```no_run
/// use bmplab::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(64 * 1024 * 1024), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}", image.describe());
/// # Ok::<(), bmplab::BmpError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Reject images exceeding `limits` before allocating pixels.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decode an 8-bit grayscale BMP; any other depth is rejected.
    pub fn decode8(self, stop: impl Stop) -> Result<Image8, BmpError> {
        bmp::decode_gray8(self.data, self.limits, &stop)
    }

    /// Decode a 24-bit color BMP; any other depth is rejected.
    pub fn decode24(self, stop: impl Stop) -> Result<Image24, BmpError> {
        bmp::decode_rgb24(self.data, self.limits, &stop)
    }

    /// Decode whichever supported depth the header declares.
    pub fn decode(self, stop: impl Stop) -> Result<Image, BmpError> {
        bmp::decode_any(self.data, self.limits, &stop)
    }
}

/// Decode an 8-bit BMP with no limits.
pub fn decode8(data: &[u8], stop: impl Stop) -> Result<Image8, BmpError> {
    DecodeRequest::new(data).decode8(stop)
}

/// Decode a 24-bit BMP with no limits.
pub fn decode24(data: &[u8], stop: impl Stop) -> Result<Image24, BmpError> {
    DecodeRequest::new(data).decode24(stop)
}

/// Decode an 8-bit or 24-bit BMP with no limits.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<Image, BmpError> {
    DecodeRequest::new(data).decode(stop)
}
