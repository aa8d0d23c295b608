#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(oid) = gost_utils::oid::Oid::from_der_value(data) {
        // A decodable OID must re-encode without panicking
        let _ = oid.to_der_value();
        let _ = oid.to_dot_string();
    }
});
