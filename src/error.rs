use alloc::string::String;
use enough::StopReason;

/// Errors from BMP decoding, encoding and compositing.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BlendError {
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Pixel buffer length disagrees with the geometry stored in the header.
    #[error("pixel data holds {actual} bytes but {width}x{height} needs {expected}")]
    PixelDataMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// The source does not fit inside the destination at the requested offset.
    #[error(
        "argument picture must be smaller than destination and fit at the given offset: \
         {src_width}x{src_height} at ({x}, {y}) into {dest_width}x{dest_height}"
    )]
    OutOfBounds {
        x: i64,
        y: i64,
        src_width: u32,
        src_height: u32,
        dest_width: u32,
        dest_height: u32,
    },

    #[cfg(feature = "std")]
    #[error("{}", .path.display())]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BlendError {
    fn from(r: StopReason) -> Self {
        BlendError::Cancelled(r)
    }
}

impl BlendError {
    /// Whether this error reports malformed container bytes.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidHeader(_) | Self::UnexpectedEof | Self::PixelDataMismatch { .. }
        )
    }
}
