//! Shared fixtures for the unit tests in this crate.

use gost_utils::asn1::Encoder;

/// Assemble a small but structurally honest self-signed-shaped certificate
/// with the given serial INTEGER content.
pub(crate) fn build_test_cert(serial: &[u8]) -> Vec<u8> {
    // issuer: SEQUENCE { SET { SEQUENCE { OID 2.5.4.3, UTF8String "Test CA" } } }
    let mut atav = Encoder::new();
    atav.write_oid(&[0x55, 0x04, 0x03]);
    atav.write_tlv(0x0C, b"Test CA");
    let mut rdn_seq = Encoder::new();
    rdn_seq.write_sequence(&atav.finish());
    let mut rdn_set = Encoder::new();
    rdn_set.write_set(&rdn_seq.finish());
    let mut issuer = Encoder::new();
    issuer.write_sequence(&rdn_set.finish());
    let issuer_der = issuer.finish();

    // signature AlgorithmIdentifier: GOST R 34.10-2012-256 with Streebog-256
    let mut alg = Encoder::new();
    alg.write_oid(&[0x2a, 0x85, 0x03, 0x07, 0x01, 0x01, 0x03, 0x02]);
    let mut alg_seq = Encoder::new();
    alg_seq.write_sequence(&alg.finish());
    let alg_der = alg_seq.finish();

    // validity SEQUENCE { UTCTime 2024-01-01, UTCTime 2025-01-01 }
    let mut validity = Encoder::new();
    validity.write_utc_time(1_704_067_200);
    validity.write_utc_time(1_735_689_600);
    let mut validity_seq = Encoder::new();
    validity_seq.write_sequence(&validity.finish());

    let mut tbs = Encoder::new();
    // version [0] EXPLICIT INTEGER 2 (v3)
    let mut ver = Encoder::new();
    ver.write_integer(&[0x02]);
    tbs.write_context_specific(0, true, &ver.finish());
    tbs.write_integer_content(serial);
    tbs.write_raw(&alg_der);
    tbs.write_raw(&issuer_der);
    tbs.write_raw(&validity_seq.finish());
    tbs.write_raw(&issuer_der); // subject = issuer
    // subjectPublicKeyInfo with a dummy 64-byte point
    let mut spki_alg = Encoder::new();
    spki_alg.write_oid(&[0x2a, 0x85, 0x03, 0x07, 0x01, 0x01, 0x01, 0x01]);
    spki_alg.write_null();
    let mut spki_alg_seq = Encoder::new();
    spki_alg_seq.write_sequence(&spki_alg.finish());
    let mut spki = Encoder::new();
    spki.write_raw(&spki_alg_seq.finish());
    let mut point = vec![0x00, 0x04, 0x40];
    point.extend_from_slice(&[0u8; 64]);
    spki.write_tlv(0x03, &point);
    let mut spki_seq = Encoder::new();
    spki_seq.write_sequence(&spki.finish());
    tbs.write_raw(&spki_seq.finish());

    let mut tbs_seq = Encoder::new();
    tbs_seq.write_sequence(&tbs.finish());

    let mut cert = Encoder::new();
    cert.write_raw(&tbs_seq.finish());
    cert.write_raw(&alg_der);
    let mut sig = vec![0x00];
    sig.extend_from_slice(&[0u8; 64]);
    cert.write_tlv(0x03, &sig);

    let mut outer = Encoder::new();
    outer.write_sequence(&cert.finish());
    outer.finish()
}
