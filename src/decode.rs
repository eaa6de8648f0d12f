use enough::Stop;

use crate::bmp::{self, BitmapImage};
use crate::error::BlendError;
use crate::limits::Limits;

/// Decode request builder.
///
/// ```
/// use zenblend::{BitmapImage, DecodeRequest, Limits, Unstoppable};
///
/// let bytes = BitmapImage::filled(4, 4, [0, 0, 255, 255])?.encode();
/// let limits = Limits { max_pixels: Some(1 << 20), ..Default::default() };
/// let image = DecodeRequest::new(&bytes)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// assert_eq!((image.width(), image.height()), (4, 4));
/// # Ok::<(), zenblend::BlendError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Split the input into header bytes and pixel data.
    pub fn decode(self, stop: impl Stop) -> Result<BitmapImage, BlendError> {
        bmp::decode_bitmap(self.data, self.limits, &stop)
    }
}

/// Decode a BMP container without limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<BitmapImage, BlendError> {
    DecodeRequest::new(data).decode(stop)
}
