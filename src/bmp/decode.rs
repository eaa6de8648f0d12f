//! Container decode: split the input into verbatim header bytes and pixel
//! data.
//!
//! The decoder is deliberately loose. It reads four fields, checks that the
//! pixel data offset lies inside the input and copies. It never checks the
//! magic, the bit depth, or that the pixel data matches the geometry; those
//! mismatches are preserved so that encode can replay them.

use enough::Stop;

use super::BitmapImage;
use super::header::BmpHeader;
use crate::error::BlendError;
use crate::limits::Limits;

pub(crate) fn decode_bitmap(
    data: &[u8],
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<BitmapImage, BlendError> {
    let header = BmpHeader::parse(data)?;
    let offset = header.pixel_data_offset as usize;
    if offset > data.len() {
        return Err(BlendError::InvalidHeader(alloc::format!(
            "pixel data offset {offset} past end of {}-byte input",
            data.len()
        )));
    }

    let end = pixel_data_end(&header, data.len());
    if let Some(limits) = limits {
        limits.check(header.width, header.abs_height())?;
        limits.check_memory(end)?;
    }
    stop.check()?;

    match header.bits_per_pixel {
        Some(32) | None => {}
        Some(bpp) => tracing::warn!(bpp, "pixel data is not 32-bit BGRA"),
    }
    if end != data.len() {
        tracing::debug!(
            file_size = header.file_size,
            input_len = data.len(),
            "file size field disagrees with input length"
        );
    }
    tracing::debug!(
        width = header.width,
        height = header.height,
        offset,
        pixel_bytes = end - offset,
        "decoded bitmap"
    );

    Ok(BitmapImage {
        header: data[..offset].to_vec(),
        pixels: data[offset..end].to_vec(),
        file_size: header.file_size,
        pixel_data_offset: header.pixel_data_offset,
        width: header.width,
        height: header.height,
    })
}

/// Pixel data runs to the stored file size. A file size that points before
/// the pixel data or past the input is ignored and the input end is used.
fn pixel_data_end(header: &BmpHeader, input_len: usize) -> usize {
    let offset = header.pixel_data_offset as usize;
    let file_size = header.file_size as usize;
    if (offset..=input_len).contains(&file_size) {
        file_size
    } else {
        input_len
    }
}
