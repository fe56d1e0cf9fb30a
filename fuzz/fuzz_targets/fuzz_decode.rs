#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Auto-detect and each depth explicitly — must never panic
    let _ = bmplab::decode(data, enough::Unstoppable);
    let _ = bmplab::decode8(data, enough::Unstoppable);
    let _ = bmplab::decode24(data, enough::Unstoppable);
});
