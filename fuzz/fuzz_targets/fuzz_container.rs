#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = gost_pki::container::parse_masks(data);
    let _ = gost_pki::container::parse_primary(data);
});
