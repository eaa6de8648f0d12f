#![no_main]
use libfuzzer_sys::fuzz_target;
use zenblend::*;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, encoding must replay the stored bytes exactly
    let Ok(decoded) = decode_bmp(data, enough::Unstoppable) else {
        return;
    };
    let encoded = decoded.encode();
    assert!(data.starts_with(&encoded), "encode is not a prefix of the input");

    // A file size field below the header end legitimately truncates the header
    if encoded.len() < MIN_HEADER_LEN {
        return;
    }
    let Ok(decoded2) = decode_bmp(&encoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded2.encode(), encoded, "second roundtrip changed bytes");
});
