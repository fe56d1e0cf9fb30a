//! Test corpus: synthetic patterns across sizes, through the codec and the
//! operators.

use bmplab::*;

fn checkerboard(w: usize, h: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; w * h];
    for y in 0..h {
        for x in 0..w {
            pixels[y * w + x] = if (x + y) % 2 == 0 { 200 } else { 10 };
        }
    }
    pixels
}

fn noise_pattern(len: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn gray_image(w: u32, h: u32, pixels: &[u8]) -> Image8 {
    let mut img = Image8::new(w, h, 0).unwrap();
    img.pixels_mut().copy_from_slice(pixels);
    img
}

fn color_image(w: u32, h: u32, bytes: &[u8]) -> Image24 {
    let mut img = Image24::new(w, h, RGB8::default()).unwrap();
    for (px, c) in img.pixels_mut().iter_mut().zip(bytes.chunks_exact(3)) {
        *px = RGB8::new(c[0], c[1], c[2]);
    }
    img
}

const SIZES: [(u32, u32); 7] = [(1, 1), (2, 3), (3, 2), (4, 4), (5, 5), (7, 3), (13, 11)];

// ── Codec ────────────────────────────────────────────────────────────

#[test]
fn gray_corpus_roundtrip() {
    for (w, h) in SIZES {
        for pixels in [
            checkerboard(w as usize, h as usize),
            noise_pattern((w * h) as usize),
        ] {
            let img = gray_image(w, h, &pixels);
            let encoded = img.encode(Unstoppable).unwrap();
            let decoded = decode8(&encoded, Unstoppable).unwrap();
            assert_eq!(decoded.pixels().pixels(), &pixels[..], "{w}x{h}");
            assert_eq!(decoded.encode(Unstoppable).unwrap(), encoded, "{w}x{h}");
        }
    }
}

#[test]
fn color_corpus_roundtrip() {
    for (w, h) in SIZES {
        let bytes = noise_pattern((w * h * 3) as usize);
        let img = color_image(w, h, &bytes);
        let encoded = img.encode(Unstoppable).unwrap();
        assert_eq!(encoded.len() as u64, 54 + img.describe().data_size);
        let decoded = decode24(&encoded, Unstoppable).unwrap();
        assert_eq!(decoded.pixels(), img.pixels(), "{w}x{h}");
    }
}

#[test]
fn encoded_padding_is_zero() {
    let img = gray_image(5, 4, &[0xFF; 20]);
    let encoded = img.encode(Unstoppable).unwrap();
    for row in encoded[1078..].chunks_exact(8) {
        assert_eq!(&row[..5], &[0xFF; 5]);
        assert_eq!(&row[5..], &[0, 0, 0]);
    }
}

#[test]
fn truncated_files_rejected() {
    let img = gray_image(4, 4, &noise_pattern(16));
    let encoded = img.encode(Unstoppable).unwrap();
    for cut in [0, 1, 2, 53, 54, 500, 1077, 1078, 1081, 1093] {
        assert!(
            decode8(&encoded[..cut], Unstoppable).is_err(),
            "accepted file cut to {cut} bytes"
        );
    }
    assert!(decode8(&encoded, Unstoppable).is_ok());
}

#[test]
fn truncation_errors_are_classified() {
    let img = gray_image(4, 4, &noise_pattern(16));
    let encoded = img.encode(Unstoppable).unwrap();
    assert!(matches!(
        decode8(&encoded[..40], Unstoppable),
        Err(BmpError::Format(_))
    ));
    assert!(matches!(
        decode8(&encoded[..600], Unstoppable),
        Err(BmpError::Format(_))
    ));
    assert!(matches!(
        decode8(&encoded[..1085], Unstoppable),
        Err(BmpError::Format(_))
    ));
}

#[test]
fn failed_decode_leaves_previous_image() {
    let good = gray_image(3, 3, &checkerboard(3, 3));
    let mut slot: Option<Image> = Some(good.clone().into());
    let bad = b"BMnot really a bitmap";
    if let Ok(img) = decode(bad, Unstoppable) {
        slot = Some(img);
    }
    let kept = slot.as_ref().and_then(Image::as_gray8).unwrap();
    assert_eq!(kept.pixels(), good.pixels());
}

// ── Operators ────────────────────────────────────────────────────────

#[test]
fn negative_self_inverse_on_corpus() {
    for (w, h) in SIZES {
        let bytes = noise_pattern((w * h * 3) as usize);
        let original = color_image(w, h, &bytes);
        let mut img = original.clone();
        img.negative().negative();
        assert_eq!(img.pixels(), original.pixels());

        let original = gray_image(w, h, &bytes[..(w * h) as usize]);
        let mut img = original.clone();
        img.negative().negative();
        assert_eq!(img.pixels(), original.pixels());
    }
}

#[test]
fn threshold_sample_scenario() {
    let mut img = Image8::new(4, 4, 100).unwrap();
    img.set(0, 0, 200);
    img.threshold(150);
    let px = img.pixels().pixels();
    assert_eq!(px.iter().filter(|&&v| v == 255).count(), 1);
    assert_eq!(px.iter().filter(|&&v| v == 0).count(), 15);
    assert_eq!(img.pixels().get(0, 0), 255);
}

#[test]
fn threshold_idempotent_on_noise() {
    for t in [0, 17, 128, 254, 255] {
        let mut once = gray_image(13, 11, &noise_pattern(143));
        once.threshold(t);
        let mut twice = once.clone();
        twice.threshold(t);
        assert_eq!(once.pixels(), twice.pixels());
    }
}

#[test]
fn filter_border_ring_preserved_on_color() {
    let original = color_image(5, 5, &noise_pattern(75));
    for kind in FilterKind::ALL {
        let mut img = original.clone();
        img.apply_filter(kind).unwrap();
        let mut changed_interior = false;
        for y in 0..5 {
            for x in 0..5 {
                let border = y == 0 || y == 4 || x == 0 || x == 4;
                let same = img.pixels().get(y, x) == original.pixels().get(y, x);
                if border {
                    assert!(same, "{kind:?} changed border ({y},{x})");
                } else if !same {
                    changed_interior = true;
                }
            }
        }
        assert!(changed_interior, "{kind:?} left noise untouched");
    }
}

#[test]
fn equalize_uniform_is_noop() {
    let mut gray = Image8::new(6, 6, 128).unwrap();
    assert_eq!(gray.equalize(), Equalization::Uniform);
    assert!(gray.pixels().pixels().iter().all(|&v| v == 128));

    let mut color = Image24::new(6, 6, RGB8::new(128, 128, 128)).unwrap();
    let before = color.clone();
    assert_eq!(color.equalize(), Equalization::Uniform);
    assert_eq!(color.pixels(), before.pixels());
}

#[test]
fn equalize_spans_full_range() {
    for (w, h) in SIZES.into_iter().filter(|&(w, h)| w * h > 1) {
        let pixels: Vec<u8> = noise_pattern((w * h) as usize)
            .into_iter()
            .map(|v| 60 + v / 4)
            .collect();
        let distinct = pixels.iter().any(|&v| v != pixels[0]);
        let mut img = gray_image(w, h, &pixels);
        let outcome = img.equalize();
        if !distinct {
            assert_eq!(outcome, Equalization::Uniform);
            continue;
        }
        assert_eq!(outcome, Equalization::Applied);
        let out = img.pixels().pixels();
        let lo = pixels.iter().min().unwrap();
        let hi = pixels.iter().max().unwrap();
        for (src, dst) in pixels.iter().zip(out) {
            if src == lo {
                assert_eq!(*dst, 0, "{w}x{h}");
            }
            if src == hi {
                assert_eq!(*dst, 255, "{w}x{h}");
            }
        }
    }
}

#[test]
fn equalize_color_preserves_neutral_hue() {
    let levels = noise_pattern(49);
    let bytes: Vec<u8> = levels.iter().flat_map(|&v| [v / 2 + 40; 3]).collect();
    let mut img = color_image(7, 7, &bytes);
    assert_eq!(img.equalize(), Equalization::Applied);
    for px in img.pixels().pixels() {
        assert!(px.r.abs_diff(px.g) <= 1 && px.g.abs_diff(px.b) <= 1, "{px:?}");
    }
}

#[test]
fn grayscale_then_equalize_color() {
    let mut img = color_image(4, 4, &noise_pattern(48));
    img.grayscale();
    for px in img.pixels().pixels() {
        assert!(px.r == px.g && px.g == px.b);
    }
    img.equalize();
    let lo = img.pixels().pixels().iter().map(|p| p.g).min().unwrap();
    let hi = img.pixels().pixels().iter().map(|p| p.g).max().unwrap();
    assert!(lo <= 1);
    assert!(hi >= 254);
}
