#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp32(width: u32, height: i32, bgra: [u8; 4]) -> Vec<u8> {
    let pixels = width as usize * height.unsigned_abs() as usize;
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&((54 + pixels * 4) as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&(width as i32).to_le_bytes()); // width
    bmp[22..26].copy_from_slice(&height.to_le_bytes()); // height
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&32u16.to_le_bytes()); // bpp
    for _ in 0..pixels {
        bmp.extend_from_slice(&bgra);
    }
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    fs::write(format!("{dir}/bmp32_2x2.bmp"), bmp32(2, 2, [0, 0, 255, 255])).unwrap();
    fs::write(format!("{dir}/bmp32_topdown_1x3.bmp"), bmp32(1, -3, [9, 8, 7, 128])).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut past_end = bmp32(1, 1, [0; 4]);
    past_end[10..14].copy_from_slice(&1000u32.to_le_bytes());
    fs::write(format!("{dir}/offset_past_end.bmp"), past_end).unwrap();

    let dir = "fuzz/corpus/fuzz_compose";
    fs::create_dir_all(dir).unwrap();
    let dest = bmp32(4, 4, [255, 255, 255, 255]);
    let src = bmp32(2, 2, [0, 0, 0, 128]);
    let mut seed = vec![1u8, 1];
    seed.extend_from_slice(&(dest.len() as u16).to_le_bytes());
    seed.extend_from_slice(&dest);
    seed.extend_from_slice(&src);
    fs::write(format!("{dir}/place_1_1.bin"), seed).unwrap();

    println!("Generated seed corpora under fuzz/corpus/");
}
