//! File system collaborators. Thin wrappers that attach the path to I/O
//! errors.

use std::path::Path;

use enough::Unstoppable;

use crate::bmp::BitmapImage;
use crate::error::BlendError;

fn io_error(path: &Path, source: std::io::Error) -> BlendError {
    BlendError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read a whole file into memory.
pub fn read_bytes(path: impl AsRef<Path>) -> Result<Vec<u8>, BlendError> {
    let path = path.as_ref();
    std::fs::read(path).map_err(|e| io_error(path, e))
}

/// Write `bytes` to `path`, replacing any existing file.
pub fn write_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), BlendError> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|e| io_error(path, e))
}

/// Read and decode a bitmap file.
pub fn read_file(path: impl AsRef<Path>) -> Result<BitmapImage, BlendError> {
    let path = path.as_ref();
    let data = read_bytes(path)?;
    tracing::debug!(path = %path.display(), bytes = data.len(), "read bitmap");
    crate::decode_bmp(&data, Unstoppable)
}

/// Encode a bitmap and write it to `path`.
pub fn write_file(path: impl AsRef<Path>, image: &BitmapImage) -> Result<(), BlendError> {
    let path = path.as_ref();
    let bytes = image.encode();
    write_bytes(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote bitmap");
    Ok(())
}
