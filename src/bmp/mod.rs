//! The BMP container model: verbatim header bytes plus a BGRA pixel grid.

mod decode;
mod encode;
pub(crate) mod header;

pub use header::MIN_HEADER_LEN;

pub(crate) use decode::decode_bitmap;

use crate::error::BlendError;
use crate::pixel::BYTES_PER_PIXEL;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

/// A decoded 32-bit bitmap.
///
/// The header bytes are opaque and replayed byte-for-byte by
/// [`encode`](Self::encode); only the file size, pixel data offset, width
/// and height are read out of them. `Clone` deep-copies both buffers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitmapImage {
    header: Vec<u8>,
    pixels: Vec<u8>,
    file_size: u32,
    pixel_data_offset: u32,
    width: u32,
    height: i32,
}

impl BitmapImage {
    /// Build a bottom-up 32-bit BGRA bitmap around `pixels`.
    ///
    /// `pixels` must hold exactly `width * height * 4` bytes in B, G, R, A
    /// order. The header is a BITMAPV5HEADER with alpha channel mask set.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BlendError> {
        let too_large = || BlendError::DimensionsTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let expected = pixel_len(width, height).ok_or_else(too_large)?;
        if pixels.len() != expected {
            return Err(BlendError::PixelDataMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        let file_size = expected
            .checked_add(encode::V5_HEADER_LEN)
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(too_large)?;

        let mut header = Vec::with_capacity(encode::V5_HEADER_LEN);
        encode::write_bgra_header(&mut header, file_size, expected as u32, w, h);

        Ok(Self {
            header,
            pixels,
            file_size,
            pixel_data_offset: encode::V5_HEADER_LEN as u32,
            width,
            height: h,
        })
    }

    /// A bitmap with every pixel set to `bgra`.
    pub fn filled(width: u32, height: u32, bgra: [u8; 4]) -> Result<Self, BlendError> {
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(BlendError::DimensionsTooLarge { width, height })?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(count.saturating_mul(BYTES_PER_PIXEL))
            .map_err(|_| BlendError::DimensionsTooLarge { width, height })?;
        for _ in 0..count {
            pixels.extend_from_slice(&bgra);
        }
        Self::new(width, height, pixels)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels (magnitude of the signed header field).
    pub fn height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    /// Whether the header marks rows as stored top-down.
    ///
    /// Row order is never acted on: compositing places rows in buffer order.
    pub fn is_top_down(&self) -> bool {
        self.height < 0
    }

    /// Total file size as recorded in the header.
    pub fn size(&self) -> u32 {
        self.file_size
    }

    /// Byte offset of the pixel data, as recorded in the header.
    pub fn pixel_data_offset(&self) -> u32 {
        self.pixel_data_offset
    }

    /// The verbatim header bytes.
    pub fn header(&self) -> &[u8] {
        &self.header
    }

    /// The pixel data, B, G, R, A per pixel, row-major, unpadded.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Length the pixel data must have for this geometry, if it fits `usize`.
    pub fn expected_pixel_len(&self) -> Option<usize> {
        pixel_len(self.width, self.height())
    }

    /// Check that the pixel data matches `width * height * 4`.
    ///
    /// Decode does not enforce this; compositing does, on both operands.
    pub fn validate_geometry(&self) -> Result<(), BlendError> {
        let (width, height) = (self.width, self.height());
        let expected = self
            .expected_pixel_len()
            .ok_or(BlendError::DimensionsTooLarge { width, height })?;
        if self.pixels.len() != expected {
            return Err(BlendError::PixelDataMismatch {
                width,
                height,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Header bytes followed by pixel data.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.len() + self.pixels.len());
        self.encode_into(&mut out);
        out
    }

    /// Append the encoded bytes to `out`.
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header);
        out.extend_from_slice(&self.pixels);
    }

    /// Encode, reusing the header allocation.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = self.header;
        out.extend_from_slice(&self.pixels);
        out
    }

    /// Typed view of the pixel data. Trailing bytes short of a pixel are
    /// not included.
    #[cfg(feature = "rgb")]
    pub fn as_pixels(&self) -> &[crate::pixel::Bgra8] {
        self.pixels.as_pixels()
    }

    #[cfg(feature = "rgb")]
    pub fn as_pixels_mut(&mut self) -> &mut [crate::pixel::Bgra8] {
        self.pixels.as_pixels_mut()
    }

    /// 2D view of the pixel grid. Fails if the data does not match the
    /// geometry.
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> Result<imgref::ImgRef<'_, crate::pixel::Bgra8>, BlendError> {
        self.validate_geometry()?;
        Ok(imgref::ImgRef::new(
            self.as_pixels(),
            self.width as usize,
            self.height() as usize,
        ))
    }

    #[cfg(feature = "imgref")]
    pub fn as_imgref_mut(
        &mut self,
    ) -> Result<imgref::ImgRefMut<'_, crate::pixel::Bgra8>, BlendError> {
        self.validate_geometry()?;
        let (w, h) = (self.width as usize, self.height() as usize);
        Ok(imgref::ImgRefMut::new(self.as_pixels_mut(), w, h))
    }
}

fn pixel_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn new_rejects_wrong_pixel_len() {
        let err = BitmapImage::new(2, 2, vec![0u8; 15]).unwrap_err();
        assert!(matches!(
            err,
            BlendError::PixelDataMismatch {
                expected: 16,
                actual: 15,
                ..
            }
        ));
    }

    #[test]
    fn new_rejects_height_beyond_i32() {
        assert!(matches!(
            BitmapImage::new(1, u32::MAX, Vec::new()),
            Err(BlendError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn new_sets_geometry() {
        let image = BitmapImage::filled(3, 2, [1, 2, 3, 4]).unwrap();
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert!(!image.is_top_down());
        assert_eq!(image.pixel_data_offset(), 138);
        assert_eq!(image.size(), 138 + 24);
        assert_eq!(image.header().len(), 138);
        assert_eq!(&image.pixels()[..8], &[1, 2, 3, 4, 1, 2, 3, 4]);
        assert!(image.validate_geometry().is_ok());
    }

    #[test]
    fn clone_is_independent() {
        let original = BitmapImage::filled(2, 2, [0, 0, 0, 0]).unwrap();
        let mut copy = original.clone();
        copy.pixels_mut()[0] = 99;
        assert_eq!(original.pixels()[0], 0);
        assert_eq!(copy.pixels()[0], 99);
    }

    #[test]
    fn encode_variants_agree() {
        let image = BitmapImage::filled(2, 3, [9, 8, 7, 6]).unwrap();
        let encoded = image.encode();
        let mut appended = vec![0xEE];
        image.encode_into(&mut appended);
        assert_eq!(&appended[1..], &encoded[..]);
        assert_eq!(image.size() as usize, encoded.len());
        assert_eq!(image.into_bytes(), encoded);
    }

    #[test]
    fn bitmap_image_is_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<BitmapImage>();
    }

    #[cfg(feature = "rgb")]
    #[test]
    fn typed_pixels_are_bgra() {
        let image = BitmapImage::filled(1, 1, [10, 20, 30, 40]).unwrap();
        let px = image.as_pixels()[0];
        assert_eq!((px.b, px.g, px.r, px.a), (10, 20, 30, 40));
    }

    #[cfg(feature = "imgref")]
    #[test]
    fn imgref_view_has_geometry() {
        let image = BitmapImage::filled(4, 3, [0, 0, 0, 255]).unwrap();
        let view = image.as_imgref().unwrap();
        assert_eq!(view.width(), 4);
        assert_eq!(view.height(), 3);
    }
}
