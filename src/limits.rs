use crate::error::BlendError;

/// Caps on what decode is willing to copy out of an untrusted buffer.
///
/// Width and height are the header's claims and are checked before any
/// bytes are copied; the pixel data itself is never sized from them.
/// Every field defaults to `None`.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum claimed pixel count (width * |height|).
    pub max_pixels: Option<u64>,
    /// Maximum bytes decode copies out of the input: the replayed header
    /// plus the pixel data, bounded by the stored file size.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check the header's claimed geometry.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), BlendError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(BlendError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(BlendError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(BlendError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check the number of bytes about to be copied out of the input.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), BlendError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(BlendError::LimitExceeded(alloc::format!(
                    "copying {bytes} bytes exceeds memory limit {max_mem}"
                )));
            }
        }
        Ok(())
    }
}
