//! Source-over alpha compositing of one bitmap into another.
//!
//! Every touched destination pixel gets
//! `c = (src_c * a + dest_c * (255 - a)) >> 8` on its three colour channels
//! and alpha 255. Placement and both operands are validated before the
//! first byte of the destination is written.

#[cfg(feature = "simd")]
mod simd;

use enough::{Stop, Unstoppable};

use crate::bmp::BitmapImage;
use crate::error::BlendError;
use crate::pixel::BYTES_PER_PIXEL;

/// Compose request builder: where to place the source.
///
/// ```
/// use zenblend::{BitmapImage, ComposeRequest, Unstoppable};
///
/// let mut dest = BitmapImage::filled(8, 8, [255, 255, 255, 255])?;
/// let src = BitmapImage::filled(2, 2, [0, 0, 0, 255])?;
/// ComposeRequest::new(3, 5).compose(&mut dest, &src, Unstoppable)?;
/// # Ok::<(), zenblend::BlendError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ComposeRequest {
    x: i64,
    y: i64,
}

impl ComposeRequest {
    /// Place the source's top-left pixel at column `x`, buffer row `y` of
    /// the destination.
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i64 {
        self.x
    }

    pub fn y(&self) -> i64 {
        self.y
    }

    /// Blend `src` over `dest` in place.
    ///
    /// Fails with [`BlendError::OutOfBounds`] if the source does not fit,
    /// [`BlendError::PixelDataMismatch`] if either operand's pixel data
    /// disagrees with its geometry, and [`BlendError::Cancelled`] if `stop`
    /// fires. `stop` is polled once, before the first write, so `dest` is
    /// untouched on every error.
    pub fn compose(
        &self,
        dest: &mut BitmapImage,
        src: &BitmapImage,
        stop: impl Stop,
    ) -> Result<(), BlendError> {
        let placement = Placement::resolve(dest, src, self.x, self.y)?;
        src.validate_geometry()?;
        dest.validate_geometry()?;

        tracing::debug!(
            x = placement.x,
            y = placement.y,
            src_width = src.width(),
            src_height = src.height(),
            dest_width = dest.width(),
            dest_height = dest.height(),
            "compositing"
        );

        stop.check()?;
        if placement.width == 0 || placement.height == 0 {
            return Ok(());
        }

        let src_stride = placement.width * BYTES_PER_PIXEL;
        let dest_stride = dest.width() as usize * BYTES_PER_PIXEL;
        let first = placement.y * dest_stride + placement.x * BYTES_PER_PIXEL;

        blend_rows(
            src.pixels(),
            src_stride,
            &mut dest.pixels_mut()[first..],
            dest_stride,
            placement.width,
            placement.height,
        );
        Ok(())
    }
}

/// Blend `src` over `dest` with its top-left pixel at `(x, y)`.
///
/// This is the uncancellable form of [`ComposeRequest::compose`].
pub fn compose_alpha(
    dest: &mut BitmapImage,
    src: &BitmapImage,
    x: i64,
    y: i64,
) -> Result<(), BlendError> {
    ComposeRequest::new(x, y).compose(dest, src, Unstoppable)
}

/// Blend two images of identical geometry, pixel for pixel.
///
/// Fails with [`BlendError::OutOfBounds`] when the sizes differ.
pub fn compose_full(dest: &mut BitmapImage, src: &BitmapImage) -> Result<(), BlendError> {
    if dest.width() != src.width() || dest.height() != src.height() {
        return Err(out_of_bounds(dest, src, 0, 0));
    }
    compose_alpha(dest, src, 0, 0)
}

/// A validated placement, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Placement {
    x: usize,
    y: usize,
    width: usize,
    height: usize,
}

impl Placement {
    fn resolve(
        dest: &BitmapImage,
        src: &BitmapImage,
        x: i64,
        y: i64,
    ) -> Result<Self, BlendError> {
        // u32 + u32 always fits i64, so only the sign and the far edge matter
        let fits = x >= 0
            && y >= 0
            && x + i64::from(src.width()) <= i64::from(dest.width())
            && y + i64::from(src.height()) <= i64::from(dest.height());
        if !fits {
            return Err(out_of_bounds(dest, src, x, y));
        }
        Ok(Self {
            x: x as usize,
            y: y as usize,
            width: src.width() as usize,
            height: src.height() as usize,
        })
    }
}

fn out_of_bounds(dest: &BitmapImage, src: &BitmapImage, x: i64, y: i64) -> BlendError {
    BlendError::OutOfBounds {
        x,
        y,
        src_width: src.width(),
        src_height: src.height(),
        dest_width: dest.width(),
        dest_height: dest.height(),
    }
}

/// Blend `height` rows of `width` pixels. Row `i` of the source starts at
/// `i * src_stride`, row `i` of the destination at `i * dest_stride`; each
/// destination row is a disjoint slice.
fn blend_rows(
    src: &[u8],
    src_stride: usize,
    dest: &mut [u8],
    dest_stride: usize,
    width: usize,
    height: usize,
) {
    #[cfg(feature = "simd")]
    simd::blend_strided(src, src_stride, dest, dest_stride, width, height);

    #[cfg(not(feature = "simd"))]
    {
        let row_bytes = width * BYTES_PER_PIXEL;
        for (s, d) in src
            .chunks(src_stride)
            .zip(dest.chunks_mut(dest_stride))
            .take(height)
        {
            crate::pixel::blend_row(&s[..row_bytes], &mut d[..row_bytes]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::blend_over;
    use alloc::vec::Vec;

    fn gradient(width: u32, height: u32, alpha: u8) -> BitmapImage {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 7) as u8, (y * 13) as u8, (x + y) as u8, alpha]);
            }
        }
        BitmapImage::new(width, height, pixels).unwrap()
    }

    #[test]
    fn negative_offsets_rejected() {
        let mut dest = gradient(4, 4, 255);
        let src = gradient(1, 1, 255);
        let before = dest.clone();
        assert!(matches!(
            compose_alpha(&mut dest, &src, -1, 0),
            Err(BlendError::OutOfBounds { x: -1, .. })
        ));
        assert!(compose_alpha(&mut dest, &src, 0, -1).is_err());
        assert_eq!(dest, before);
    }

    #[test]
    fn exact_fit_at_far_corner() {
        let mut dest = gradient(5, 4, 0);
        let src = gradient(2, 3, 255);
        compose_alpha(&mut dest, &src, 3, 1).unwrap();
        // bottom-right source pixel lands on column 4, row 3
        let last = (3 * 5 + 4) * 4;
        let src_last = &src.pixels()[src.pixels().len() - 4..];
        for c in 0..3 {
            assert_eq!(dest.pixels()[last + c], src_last[c].saturating_sub(1));
        }
        assert_eq!(dest.pixels()[last + 3], 255);
    }

    #[test]
    fn matches_per_pixel_reference() {
        let mut dest = gradient(37, 21, 90);
        let mut src = gradient(19, 17, 0);
        for (i, px) in src.pixels_mut().chunks_exact_mut(4).enumerate() {
            px[3] = (i * 31 % 256) as u8;
        }
        let (x, y) = (11usize, 3usize);

        let mut expected = dest.pixels().to_vec();
        for i in 0..17 {
            for j in 0..19 {
                let so = (i * 19 + j) * 4;
                let d_off = ((y + i) * 37 + (x + j)) * 4;
                let d: [u8; 4] = expected[d_off..d_off + 4].try_into().unwrap();
                let s: [u8; 4] = src.pixels()[so..so + 4].try_into().unwrap();
                expected[d_off..d_off + 4].copy_from_slice(&blend_over(d, s));
            }
        }

        compose_alpha(&mut dest, &src, x as i64, y as i64).unwrap();
        assert_eq!(dest.pixels(), &expected[..]);
    }

    #[test]
    fn inconsistent_geometry_rejected_before_mutation() {
        let mut dest = gradient(4, 4, 255);
        let bytes = gradient(2, 2, 255).encode();
        // Drop one pixel off the source's pixel data.
        let src = crate::decode_bmp(&bytes[..bytes.len() - 4], Unstoppable).unwrap();
        let before = dest.clone();
        assert!(matches!(
            compose_alpha(&mut dest, &src, 0, 0),
            Err(BlendError::PixelDataMismatch { .. })
        ));
        assert_eq!(dest, before);
    }

    #[test]
    fn empty_source_is_a_no_op() {
        let mut dest = gradient(3, 3, 10);
        let src = BitmapImage::new(0, 0, Vec::new()).unwrap();
        let before = dest.clone();
        compose_alpha(&mut dest, &src, 3, 3).unwrap();
        assert_eq!(dest, before);
    }

    #[test]
    fn full_requires_same_size() {
        let mut dest = gradient(3, 3, 10);
        let src = gradient(3, 2, 255);
        assert!(matches!(
            compose_full(&mut dest, &src),
            Err(BlendError::OutOfBounds { .. })
        ));
        let src = gradient(3, 3, 255);
        compose_full(&mut dest, &src).unwrap();
        assert!(dest.pixels().chunks_exact(4).all(|px| px[3] == 255));
    }

    #[test]
    fn tall_source_matches_reference() {
        let mut dest = gradient(3, 40, 200);
        let src = gradient(3, 40, 120);
        let expected: Vec<u8> = dest
            .pixels()
            .chunks_exact(4)
            .zip(src.pixels().chunks_exact(4))
            .flat_map(|(d, s)| {
                blend_over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]])
            })
            .collect();
        compose_alpha(&mut dest, &src, 0, 0).unwrap();
        assert_eq!(dest.pixels(), &expected[..]);
    }

    struct StopAfter {
        checks_left: core::sync::atomic::AtomicUsize,
    }

    impl StopAfter {
        fn new(checks: usize) -> Self {
            Self {
                checks_left: core::sync::atomic::AtomicUsize::new(checks),
            }
        }
    }

    impl Stop for StopAfter {
        fn check(&self) -> Result<(), enough::StopReason> {
            use core::sync::atomic::Ordering;
            let left = self.checks_left.load(Ordering::Relaxed);
            if left == 0 {
                return Err(enough::StopReason::Cancelled);
            }
            self.checks_left.store(left - 1, Ordering::Relaxed);
            Ok(())
        }
    }

    #[test]
    fn cancelled_compose_leaves_dest_untouched() {
        let src = BitmapImage::filled(4, 40, [0, 0, 0, 255]).unwrap();
        let mut dest = gradient(4, 40, 200);
        let before = dest.clone();
        let result = ComposeRequest::new(0, 0).compose(&mut dest, &src, StopAfter::new(0));
        assert!(matches!(
            result,
            Err(BlendError::Cancelled(enough::StopReason::Cancelled))
        ));
        assert_eq!(dest, before);
    }

    #[test]
    fn compose_polls_stop_once_before_writing() {
        let src = BitmapImage::filled(4, 40, [0, 0, 0, 255]).unwrap();
        let mut dest = gradient(4, 40, 200);
        ComposeRequest::new(0, 0)
            .compose(&mut dest, &src, StopAfter::new(1))
            .unwrap();
        assert!(dest.pixels().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn cancelled_decode_reports_reason() {
        let bytes = gradient(3, 3, 255).encode();
        assert!(matches!(
            crate::DecodeRequest::new(&bytes).decode(StopAfter::new(0)),
            Err(BlendError::Cancelled(enough::StopReason::Cancelled))
        ));
        assert!(crate::DecodeRequest::new(&bytes)
            .decode(StopAfter::new(1))
            .is_ok());
    }
}
