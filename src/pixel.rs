//! The 4-byte BGRA pixel and the source-over blend applied to it.

/// Bytes per pixel in the container's pixel grid (B, G, R, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Alpha written to every pixel a blend touches.
pub const ALPHA_OPAQUE: u8 = 255;

/// Index of the alpha byte inside a pixel.
pub(crate) const ALPHA_INDEX: usize = 3;

/// Number of colour channels blended per pixel (alpha excluded).
pub(crate) const COLOR_CHANNELS: usize = 3;

/// Typed BGRA pixel for the `rgb` views.
#[cfg(feature = "rgb")]
pub type Bgra8 = rgb::alt::BGRA8;

/// Blend one colour channel: `(src * a + dest * (255 - a)) >> 8`.
///
/// The `>> 8` divides by 256 rather than 255, so an opaque source over a
/// white destination yields 254. Composed files depend on this exact
/// truncation.
#[inline(always)]
pub fn blend_channel(src: u8, dest: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    ((u32::from(src) * a + u32::from(dest) * (255 - a)) >> 8) as u8
}

/// Source-over for a single BGRA pixel. The result is always opaque.
#[inline(always)]
pub fn blend_over(dest: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    let a = src[ALPHA_INDEX];
    [
        blend_channel(src[0], dest[0], a),
        blend_channel(src[1], dest[1], a),
        blend_channel(src[2], dest[2], a),
        ALPHA_OPAQUE,
    ]
}

/// Blend a row of source pixels over a row of destination pixels in place.
///
/// Both slices hold whole pixels; extra bytes past the shorter row are left
/// alone.
pub(crate) fn blend_row(src: &[u8], dest: &mut [u8]) {
    for (s, d) in src
        .chunks_exact(BYTES_PER_PIXEL)
        .zip(dest.chunks_exact_mut(BYTES_PER_PIXEL))
    {
        let a = s[ALPHA_INDEX];
        for c in 0..COLOR_CHANNELS {
            d[c] = blend_channel(s[c], d[c], a);
        }
        d[ALPHA_INDEX] = ALPHA_OPAQUE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_alpha_black_over_color() {
        // 200 * 127 >> 8 = 99, 100 * 127 >> 8 = 49, 50 * 127 >> 8 = 24
        let out = blend_over([200, 100, 50, 7], [0, 0, 0, 128]);
        assert_eq!(out, [99, 49, 24, 255]);
    }

    #[test]
    fn opaque_source_over_white_loses_one() {
        assert_eq!(blend_channel(255, 255, 255), 254);
        assert_eq!(blend_channel(0, 255, 0), 254);
    }

    #[test]
    fn transparent_source_keeps_destination_weighted() {
        // dest * 255 >> 8 truncates, so only 0 stays exact
        assert_eq!(blend_channel(77, 0, 0), 0);
        assert_eq!(blend_channel(77, 128, 0), 127);
    }

    #[test]
    fn row_blend_matches_pixel_blend() {
        let src = [10, 20, 30, 40, 250, 240, 230, 220];
        let mut dest = [1, 2, 3, 4, 200, 201, 202, 0];
        let expected0 = blend_over([1, 2, 3, 4], [10, 20, 30, 40]);
        let expected1 = blend_over([200, 201, 202, 0], [250, 240, 230, 220]);
        blend_row(&src, &mut dest);
        assert_eq!(dest[..4], expected0);
        assert_eq!(dest[4..], expected1);
    }

    #[test]
    fn row_blend_ignores_trailing_destination() {
        let src = [0, 0, 0, 255];
        let mut dest = [9, 9, 9, 9, 8, 8, 8, 8];
        blend_row(&src, &mut dest);
        assert_eq!(dest, [0, 0, 0, 255, 8, 8, 8, 8]);
    }
}
