use crate::bmp::header::BmpHeader;
use crate::error::BlendError;

/// Geometry read from a BMP header without copying any bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub top_down: bool,
    /// File size as recorded in the header.
    pub file_size: u32,
    pub pixel_data_offset: u32,
    /// Bits per pixel, when the input reaches that field.
    pub bits_per_pixel: Option<u16>,
}

impl ImageInfo {
    /// Probe the header. Fails only when the input is too short to hold
    /// the fixed-offset fields.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BlendError> {
        let header = BmpHeader::parse(data)?;
        Ok(Self {
            width: header.width,
            height: header.abs_height(),
            top_down: header.is_top_down(),
            file_size: header.file_size,
            pixel_data_offset: header.pixel_data_offset,
            bits_per_pixel: header.bits_per_pixel,
        })
    }

    /// Whether the recorded bit depth is the 32-bit BGRA the compositor
    /// works on. An absent field counts as compatible.
    pub fn is_bgra32(&self) -> bool {
        matches!(self.bits_per_pixel, Some(32) | None)
    }
}
