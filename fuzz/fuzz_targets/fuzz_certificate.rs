#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = gost_pki::x509::SignerCertificate::from_der(data);
});
