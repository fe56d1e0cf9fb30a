#![no_main]
use bmplab::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // If we can decode it, re-encoding must be stable and decode to the same pixels
    let Ok(mut decoded) = decode(data, enough::Unstoppable) else {
        return;
    };

    let Ok(reencoded) = decoded.encode(enough::Unstoppable) else {
        return;
    };
    let Ok(decoded2) = decode(&reencoded, enough::Unstoppable) else {
        panic!("re-encoded data failed to decode");
    };
    assert_eq!(decoded.describe(), decoded2.describe());
    assert_eq!(
        decoded2.encode(enough::Unstoppable).ok().as_deref(),
        Some(&reencoded[..]),
        "second encode differs"
    );

    // Operators must never panic on a decodable image
    decoded.negative().brightness(data.len() as i32 - 128);
    let _ = decoded.apply_filter(FilterKind::Emboss);
    decoded.equalize();
});
