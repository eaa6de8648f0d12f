// ---------------------------------------------------------------------------
// Source-over row kernels with SIMD dispatch.
//
// The #[rite] row function holds the AVX2 loop; the #[arcane] strided
// wrapper loops over rows so incant! dispatches once per compose. Every tier
// produces the same bytes as crate::pixel::blend_row.
// ---------------------------------------------------------------------------

use archmage::incant;
use archmage::prelude::*;

use crate::pixel::{BYTES_PER_PIXEL, blend_row};

#[cfg(target_arch = "x86_64")]
const ALPHA_FF_MASK_AVX: [i8; 32] = [
    0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0, 0, 0, -1, 0,
    0, 0, -1,
];

// ===========================================================================
// Scalar
// ===========================================================================

fn blend_row_scalar(_token: ScalarToken, src: &[u8], dst: &mut [u8]) {
    blend_row(src, dst);
}

fn blend_strided_scalar(
    t: ScalarToken,
    src: &[u8],
    ss: usize,
    dst: &mut [u8],
    ds: usize,
    w: usize,
    h: usize,
) {
    for y in 0..h {
        blend_row_scalar(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}

// ===========================================================================
// x86-64 AVX2
// ===========================================================================

/// Eight pixels per iteration. Bytes are widened to u16 lanes, so
/// `s * a + d * (255 - a)` peaks at 65025 and never wraps before the shift.
#[cfg(target_arch = "x86_64")]
#[rite]
fn blend_row_v3(_token: X64V3Token, src: &[u8], dst: &mut [u8]) {
    let alpha = safe_unaligned_simd::x86_64::_mm256_loadu_si256(&ALPHA_FF_MASK_AVX);
    let max = _mm256_set1_epi16(255);
    let zero = _mm256_setzero_si256();
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 32 <= n {
        let s: &[u8; 32] = src[i..i + 32].try_into().unwrap();
        let sv = safe_unaligned_simd::x86_64::_mm256_loadu_si256(s);
        let d: &[u8; 32] = dst[i..i + 32].try_into().unwrap();
        let dv = safe_unaligned_simd::x86_64::_mm256_loadu_si256(d);

        let s_lo = _mm256_unpacklo_epi8(sv, zero);
        let s_hi = _mm256_unpackhi_epi8(sv, zero);
        let d_lo = _mm256_unpacklo_epi8(dv, zero);
        let d_hi = _mm256_unpackhi_epi8(dv, zero);

        // Broadcast each pixel's alpha (u16 lane 3 of every 4) to its lanes.
        let a_lo = _mm256_shufflehi_epi16::<0xFF>(_mm256_shufflelo_epi16::<0xFF>(s_lo));
        let a_hi = _mm256_shufflehi_epi16::<0xFF>(_mm256_shufflelo_epi16::<0xFF>(s_hi));

        let lo = _mm256_srli_epi16::<8>(_mm256_add_epi16(
            _mm256_mullo_epi16(s_lo, a_lo),
            _mm256_mullo_epi16(d_lo, _mm256_sub_epi16(max, a_lo)),
        ));
        let hi = _mm256_srli_epi16::<8>(_mm256_add_epi16(
            _mm256_mullo_epi16(s_hi, a_hi),
            _mm256_mullo_epi16(d_hi, _mm256_sub_epi16(max, a_hi)),
        ));

        let result = _mm256_or_si256(_mm256_packus_epi16(lo, hi), alpha);
        let out: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        safe_unaligned_simd::x86_64::_mm256_storeu_si256(out, result);
        i += 32;
    }
    blend_row(&src[i..n], &mut dst[i..n]);
}

#[cfg(target_arch = "x86_64")]
#[arcane]
fn blend_strided_v3(
    t: X64V3Token,
    src: &[u8],
    ss: usize,
    dst: &mut [u8],
    ds: usize,
    w: usize,
    h: usize,
) {
    for y in 0..h {
        blend_row_v3(t, &src[y * ss..][..w * 4], &mut dst[y * ds..][..w * 4]);
    }
}

// ===========================================================================
// Dispatch
// ===========================================================================

/// Blend `h` rows of `w` pixels, rows `ss` / `ds` bytes apart.
pub(super) fn blend_strided(
    src: &[u8],
    ss: usize,
    dst: &mut [u8],
    ds: usize,
    w: usize,
    h: usize,
) {
    debug_assert!(w * BYTES_PER_PIXEL <= ss && w * BYTES_PER_PIXEL <= ds);
    incant!(blend_strided(src, ss, dst, ds, w, h), [v3, scalar]);
}
