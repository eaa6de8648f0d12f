//! # zenblend
//!
//! Header-preserving 32-bit BMP container and source-over alpha compositor.
//!
//! A [`BitmapImage`] keeps the input's header bytes verbatim and exposes the
//! BGRA pixel grid that follows them. [`compose_alpha`] blends a source image
//! over a destination at a pixel offset, in place; [`BitmapImage::encode`]
//! replays the original header followed by the (possibly modified) pixels.
//!
//! ## Container model
//!
//! Four little-endian fields are read from fixed offsets: file size (0x02),
//! pixel data offset (0x0A), width (0x12) and height (0x16). Everything
//! before the pixel data offset is opaque and copied through unchanged, so
//! `encode(decode(b)) == b` for any well-formed `b`. Pixel data is assumed to
//! be 4 bytes per pixel (B, G, R, A), row-major, without row padding.
//!
//! ## Blend
//!
//! For every source pixel with alpha `a`, each colour channel of the
//! destination becomes `(src * a + dest * (255 - a)) >> 8` and the alpha
//! becomes 255. The `>> 8` is intentional and reproduced bit-exactly by all
//! code paths, including the optional AVX2 kernel (`simd` feature).
//!
//! ## Non-Goals
//!
//! - Compressed (RLE, JPEG/PNG-in-BMP) and palette bitmaps
//! - Colour management
//! - Streaming or partial decode
//!
//! ## Usage
//!
//! ```no_run
//! use zenblend::{compose_alpha, decode_bmp, Unstoppable};
//!
//! let cat = std::fs::read("pictures/cat.bmp")?;
//! let book = std::fs::read("pictures/book.bmp")?;
//!
//! let mut dest = decode_bmp(&cat, Unstoppable)?;
//! let src = decode_bmp(&book, Unstoppable)?;
//! compose_alpha(&mut dest, &src, 20, 400)?;
//!
//! std::fs::write("pictures/composed.bmp", dest.encode())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(not(feature = "simd"), forbid(unsafe_code))]

extern crate alloc;

mod bmp;
mod compose;
mod decode;
mod error;
mod info;
mod limits;
mod pixel;

#[cfg(feature = "std")]
pub mod io;

// Re-exports
pub use bmp::{BitmapImage, MIN_HEADER_LEN};
pub use compose::{ComposeRequest, compose_alpha, compose_full};
pub use decode::{DecodeRequest, decode_bmp};
pub use enough::{Stop, Unstoppable};
pub use error::BlendError;
pub use info::ImageInfo;
pub use limits::Limits;
#[cfg(feature = "rgb")]
pub use pixel::Bgra8;
pub use pixel::{ALPHA_OPAQUE, BYTES_PER_PIXEL, blend_channel, blend_over};
