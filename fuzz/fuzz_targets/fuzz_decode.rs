#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Probe and decode must never panic
    let _ = zenblend::ImageInfo::from_bytes(data);
    let _ = zenblend::decode_bmp(data, enough::Unstoppable);
});
