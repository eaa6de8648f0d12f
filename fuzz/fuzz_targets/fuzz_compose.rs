#![no_main]
use libfuzzer_sys::fuzz_target;
use zenblend::*;

fuzz_target!(|data: &[u8]| {
    // Layout: x (1), y (1), split (2), then two concatenated bitmaps
    if data.len() < 4 {
        return;
    }
    let x = i64::from(data[0] as i8);
    let y = i64::from(data[1] as i8);
    let split = usize::from(u16::from_le_bytes([data[2], data[3]]));
    let rest = &data[4..];
    let split = split.min(rest.len());

    let Ok(mut dest) = decode_bmp(&rest[..split], enough::Unstoppable) else {
        return;
    };
    let Ok(src) = decode_bmp(&rest[split..], enough::Unstoppable) else {
        return;
    };

    let before = dest.clone();
    match compose_alpha(&mut dest, &src, x, y) {
        Ok(()) => assert_eq!(dest.header(), before.header()),
        Err(_) => assert_eq!(dest, before, "failed compose mutated destination"),
    }
});
