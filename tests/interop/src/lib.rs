//! Cross-crate roundtrip tests for esia-gost.

#[cfg(test)]
mod tests {
    use gost_bignum::BigNum;
    use gost_crypto::gost3410::{subgroup_order, PrivateKey};
    use gost_crypto::magma::Gost28147Key;
    use gost_crypto::modes::ecb;
    use gost_crypto::streebog::Streebog256;
    use gost_pki::cms::Signer;
    use gost_pki::container::cpkdf;
    use gost_types::GostCurveId;
    use gost_utils::asn1::{Decoder, Encoder};
    use gost_utils::bytes;
    use gost_utils::oid::known;

    fn hex(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    /// Minimal certificate good enough for the signer: version, serial,
    /// algorithm, issuer.
    fn tiny_cert(serial: &[u8]) -> Vec<u8> {
        let mut atav = Encoder::new();
        atav.write_oid(&[0x55, 0x04, 0x03]);
        atav.write_tlv(0x0C, b"Interop CA");
        let mut rdn_seq = Encoder::new();
        rdn_seq.write_sequence(&atav.finish());
        let mut rdn_set = Encoder::new();
        rdn_set.write_set(&rdn_seq.finish());
        let mut issuer = Encoder::new();
        issuer.write_sequence(&rdn_set.finish());

        let mut alg = Encoder::new();
        alg.write_oid(&known::gost3410_2012_256_with_streebog256().to_der_value());
        let mut alg_seq = Encoder::new();
        alg_seq.write_sequence(&alg.finish());

        let mut tbs = Encoder::new();
        let mut ver = Encoder::new();
        ver.write_integer(&[0x02]);
        tbs.write_context_specific(0, true, &ver.finish());
        tbs.write_integer(serial);
        tbs.write_raw(&alg_seq.finish());
        tbs.write_raw(&issuer.finish());
        let mut tbs_seq = Encoder::new();
        tbs_seq.write_sequence(&tbs.finish());

        let mut cert = Encoder::new();
        cert.write_sequence(&tbs_seq.finish());
        cert.finish()
    }

    // -------------------------------------------------------
    // 1. Scalar from hex → CMS blob → signature verifies
    // -------------------------------------------------------
    #[test]
    fn test_raw_scalar_to_verified_cms() {
        let raw = hex("6a2f0c5d3e8b49170e6d5c4b3a291807f6e5d4c3b2a190877665544332211009");
        let prv = PrivateKey::new(GostCurveId::CryptoProA, &raw).unwrap();
        let pub_key = prv.public_key().unwrap();
        let signer = Signer::new(prv, &tiny_cert(&[0x42])).unwrap();

        let message = b"interop message";
        let cms = signer.sign(message).unwrap();
        assert_eq!(cms[0], 0x30);

        // Walk to the signed attributes and the signature
        let mut dec = Decoder::new(&cms);
        let mut ci = dec.read_sequence().unwrap();
        ci.read_oid().unwrap();
        let content = ci.read_context_specific(0, true).unwrap();
        let mut sd = Decoder::new(content.value).read_sequence().unwrap();
        sd.read_integer().unwrap();
        sd.read_tlv().unwrap(); // digestAlgorithms
        sd.read_sequence().unwrap(); // encapContentInfo
        sd.read_context_specific(0, true).unwrap(); // certificates
        let si_set = sd.read_tlv().unwrap();
        let mut si = Decoder::new(si_set.value).read_sequence().unwrap();
        si.read_integer().unwrap();
        si.read_sequence().unwrap(); // issuerAndSerial
        si.read_sequence().unwrap(); // digestAlgorithm
        let attrs = si.read_context_specific(0, true).unwrap();
        si.read_sequence().unwrap(); // signatureAlgorithm
        let signature = si.read_octet_string().unwrap();

        let mut attrs_set = Encoder::new();
        attrs_set.write_set(attrs.value);
        let digest = Streebog256::digest(&attrs_set.finish()).unwrap();
        let reversed = bytes::reverse(&digest);
        assert!(pub_key.verify_digest(&reversed, signature).unwrap());
    }

    // -------------------------------------------------------
    // 2. The KDF output drives the block cipher directly
    // -------------------------------------------------------
    #[test]
    fn test_cpkdf_output_is_cipher_key() {
        let wrap_key = cpkdf(b"pin-code", &hex("00112233445566778899aabb")).unwrap();
        let cipher = Gost28147Key::new(&wrap_key).unwrap();

        let plaintext = hex("deadbeefcafebabe0102030405060708");
        let wrapped = ecb::ecb_encrypt(&cipher, &plaintext).unwrap();
        let unwrapped = ecb::ecb_decrypt(&cipher, &wrapped).unwrap();
        assert_eq!(unwrapped, plaintext);
    }

    // -------------------------------------------------------
    // 3. Masking and unmasking across bignum and curve order
    // -------------------------------------------------------
    #[test]
    fn test_mask_unmask_recovers_scalar() {
        let q = subgroup_order(GostCurveId::CryptoProA);
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();

        let mut d_be = prv.raw();
        bytes::reverse_in_place(&mut d_be);
        let d = BigNum::from_bytes_be(&d_be);

        let mask = BigNum::random_range(&q).unwrap();
        let masked = d.mod_mul(&mask, &q).unwrap();
        let mask_inv = mask.mod_inv(&q).unwrap();
        let recovered = masked.mod_mul(&mask_inv, &q).unwrap();
        assert_eq!(recovered, d);
    }

    // -------------------------------------------------------
    // 4. Endianness crossings compose to identity
    // -------------------------------------------------------
    #[test]
    fn test_reverse_and_bignum_codec_compose() {
        let le = hex("0102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f20");
        let be = bytes::reverse(&le);
        let n = BigNum::from_bytes_be(&be);
        let mut back = n.to_bytes_be_padded(32);
        bytes::reverse_in_place(&mut back);
        assert_eq!(back, le);
    }
}
