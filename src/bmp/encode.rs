//! Header writer for freshly built 32-bit BGRA bitmaps.
//!
//! Decoded images never go through here: their header bytes are replayed
//! verbatim.

use alloc::vec::Vec;

/// File header (14) + BITMAPV5HEADER (124). Matches the 0x8A pixel data
/// offset of the assets the compositor was built around.
pub(crate) const V5_HEADER_LEN: usize = 138;

const FILE_HEADER_LEN: u32 = 14;
const V5_INFO_HEADER_LEN: u32 = 124;
const BI_BITFIELDS: u32 = 3;
const LCS_SRGB: u32 = 0x7352_4742; // 'sRGB'
const LCS_GM_IMAGES: u32 = 4;

pub(crate) fn write_bgra_header(
    out: &mut Vec<u8>,
    file_size: u32,
    pixel_data_size: u32,
    width: i32,
    height: i32,
) {
    debug_assert_eq!(FILE_HEADER_LEN + V5_INFO_HEADER_LEN, V5_HEADER_LEN as u32);

    // File header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(V5_HEADER_LEN as u32).to_le_bytes()); // data offset

    // BITMAPINFOHEADER part (40 bytes)
    out.extend_from_slice(&V5_INFO_HEADER_LEN.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes()); // positive = bottom-up
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bpp
    out.extend_from_slice(&BI_BITFIELDS.to_le_bytes());
    out.extend_from_slice(&pixel_data_size.to_le_bytes());
    out.extend_from_slice(&2835u32.to_le_bytes()); // h resolution (72 DPI)
    out.extend_from_slice(&2835u32.to_le_bytes()); // v resolution
    out.extend_from_slice(&0u32.to_le_bytes()); // colors used
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    // V4/V5 extension: channel masks for B, G, R, A byte order
    out.extend_from_slice(&0x00FF_0000u32.to_le_bytes()); // red
    out.extend_from_slice(&0x0000_FF00u32.to_le_bytes()); // green
    out.extend_from_slice(&0x0000_00FFu32.to_le_bytes()); // blue
    out.extend_from_slice(&0xFF00_0000u32.to_le_bytes()); // alpha
    out.extend_from_slice(&LCS_SRGB.to_le_bytes());
    out.extend_from_slice(&[0u8; 36]); // endpoints, unused for sRGB
    out.extend_from_slice(&[0u8; 12]); // gamma, unused for sRGB
    out.extend_from_slice(&LCS_GM_IMAGES.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // profile data
    out.extend_from_slice(&0u32.to_le_bytes()); // profile size
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
}
