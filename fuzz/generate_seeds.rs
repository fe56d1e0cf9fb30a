#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bpp: u16, offset: u32, file_size: u32) -> Vec<u8> {
    let mut bmp = vec![0u8; 54];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&file_size.to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&bpp.to_le_bytes());
    bmp
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 1x1 24-bit: 3 bytes + 1 padding
    let mut bmp = header(1, 1, 24, 54, 58);
    bmp.extend_from_slice(&[0xff, 0x00, 0x00, 0x00]);
    fs::write(format!("{dir}/bmp24_1x1.bmp"), bmp).unwrap();

    // 3x3 8-bit with grayscale palette
    let mut bmp = header(3, 3, 8, 1078, 1090);
    for i in 0..=255u8 {
        bmp.extend_from_slice(&[i, i, i, 0]);
    }
    for row in 0..3u8 {
        bmp.extend_from_slice(&[row * 80, 40, 200, 0]);
    }
    fs::write(format!("{dir}/bmp8_3x3.bmp"), bmp).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    fs::write(format!("{dir}/top_down.bmp"), header(2, -2, 24, 54, 70)).unwrap();
    fs::write(format!("{dir}/offset_past_end.bmp"), header(1, 1, 24, 9999, 58)).unwrap();

    println!("Generated seed corpus in {dir}/");
}
