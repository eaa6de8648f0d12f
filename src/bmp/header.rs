//! Fixed-offset header fields of the BMP container.
//!
//! Only four fields are ever read; every other header byte is carried
//! through untouched.

use crate::error::BlendError;

// ── Field offsets ───────────────────────────────────────────────────

pub(crate) const FILE_SIZE_OFFSET: usize = 0x02;
pub(crate) const PIXEL_DATA_OFFSET_OFFSET: usize = 0x0A;
pub(crate) const WIDTH_OFFSET: usize = 0x12;
pub(crate) const HEIGHT_OFFSET: usize = 0x16;
pub(crate) const BITS_PER_PIXEL_OFFSET: usize = 0x1C;

/// Shortest buffer that still holds all four required fields.
pub const MIN_HEADER_LEN: usize = HEIGHT_OFFSET + 4;

// ── Field reader ────────────────────────────────────────────────────

fn get_u32_le(data: &[u8], at: usize) -> Result<u32, BlendError> {
    let bytes = data.get(at..at + 4).ok_or(BlendError::UnexpectedEof)?;
    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn get_u16_le(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

// ── Parsed fields ───────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct BmpHeader {
    pub file_size: u32,
    pub pixel_data_offset: u32,
    pub width: u32,
    /// Signed in the container: negative means rows are stored top-down.
    pub height: i32,
    /// Present only when the buffer reaches offset 0x1C.
    pub bits_per_pixel: Option<u16>,
}

impl BmpHeader {
    pub(crate) fn parse(data: &[u8]) -> Result<Self, BlendError> {
        if data.len() < MIN_HEADER_LEN {
            return Err(BlendError::UnexpectedEof);
        }
        Ok(Self {
            file_size: get_u32_le(data, FILE_SIZE_OFFSET)?,
            pixel_data_offset: get_u32_le(data, PIXEL_DATA_OFFSET_OFFSET)?,
            width: get_u32_le(data, WIDTH_OFFSET)?,
            height: get_u32_le(data, HEIGHT_OFFSET)? as i32,
            bits_per_pixel: get_u16_le(data, BITS_PER_PIXEL_OFFSET),
        })
    }

    pub(crate) fn abs_height(&self) -> u32 {
        self.height.unsigned_abs()
    }

    pub(crate) fn is_top_down(&self) -> bool {
        self.height < 0
    }
}
