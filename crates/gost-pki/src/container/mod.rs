//! CryptoPro key-container reader.
//!
//! A container is a directory of small files. `header.key` is treated as
//! opaque bytes and scanned for two landmarks (the curve OID and the
//! public-key fingerprint); its surrounding structure varies across
//! CryptoPro versions and is not parsed. `masks.key` and `primary.key`
//! carry the multiplicative mask and the password-wrapped masked scalar.

use std::fs;
use std::path::{Path, PathBuf};

use gost_bignum::BigNum;
use gost_crypto::gost3410::{subgroup_order, PrivateKey};
use gost_crypto::magma::Gost28147Key;
use gost_crypto::modes::ecb;
use gost_crypto::streebog::Streebog256;
use gost_types::{ContainerError, CryptoError, GostCurveId};
use gost_utils::asn1::Decoder;
use gost_utils::bytes;
use gost_utils::oid::{known, Oid};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// Required container files.
pub const HEADER_FILE: &str = "header.key";
pub const MASKS_FILE: &str = "masks.key";
pub const PRIMARY_FILE: &str = "primary.key";

/// Second key slot; detected but never read.
const SECONDARY_MASKS_FILE: &str = "masks2.key";
const SECONDARY_PRIMARY_FILE: &str = "primary2.key";

/// Identifier octet of the fingerprint landmark in header.key.
const FINGERPRINT_TAG: u8 = 0x8A;

/// Scan table: the OID patterns searched in header.key, in order.
fn scan_table() -> [Oid; 7] {
    [
        known::curve_crypto_pro_a(),
        known::curve_crypto_pro_b(),
        known::curve_crypto_pro_c(),
        known::curve_crypto_pro_xch_a(),
        known::curve_crypto_pro_xch_b(),
        known::curve_tc26_2012_256_a(),
        known::curve_tc26_2012_256_b(),
    ]
}

/// Registry: OID string to parameter set. Kept separate from the scan
/// table; a scan hit with no registry entry reports `CurveOidUnknown`.
fn resolve_curve(oid: &str) -> Option<GostCurveId> {
    match oid {
        "1.2.643.2.2.35.1" => Some(GostCurveId::CryptoProA),
        "1.2.643.2.2.35.2" => Some(GostCurveId::CryptoProB),
        "1.2.643.2.2.35.3" => Some(GostCurveId::CryptoProC),
        "1.2.643.2.2.36.0" => Some(GostCurveId::CryptoProXchA),
        "1.2.643.2.2.36.1" => Some(GostCurveId::CryptoProXchB),
        "1.2.643.7.1.2.1.1.1" => Some(GostCurveId::Tc26ParamSetA),
        "1.2.643.7.1.2.1.1.2" => Some(GostCurveId::Tc26ParamSetB),
        _ => None,
    }
}

/// Extracted key material.
///
/// `private_key` is the 32-byte little-endian raw scalar, ready for
/// [`PrivateKey::new`]. Zeroized on drop.
#[derive(Debug, Zeroize)]
#[zeroize(drop)]
pub struct KeyBundle {
    pub private_key: Vec<u8>,
    pub public_key: Vec<u8>,
    pub curve_oid: String,
    pub fingerprint: Vec<u8>,
}

/// An opened container: header scanned, curve resolved, password not yet
/// supplied.
#[derive(Debug)]
pub struct Container {
    path: PathBuf,
    header: Vec<u8>,
    curve_id: GostCurveId,
    oid: String,
}

impl Container {
    /// Open a container directory: read `header.key` and locate the curve.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
        let path = path.as_ref().to_path_buf();
        let header_path = path.join(HEADER_FILE);
        let header = fs::read(&header_path).map_err(|source| ContainerError::Io {
            path: header_path,
            source,
        })?;

        let oid = find_curve_oid(&header).ok_or(ContainerError::CurveOidNotFound)?;
        let curve_id =
            resolve_curve(&oid).ok_or_else(|| ContainerError::CurveOidUnknown(oid.clone()))?;

        Ok(Self {
            path,
            header,
            curve_id,
            oid,
        })
    }

    /// The container directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dotted string of the curve OID found in the header.
    pub fn curve_oid(&self) -> &str {
        &self.oid
    }

    /// The resolved parameter set.
    pub fn curve_id(&self) -> GostCurveId {
        self.curve_id
    }

    /// True when the ignored second key slot (`masks2.key` +
    /// `primary2.key`) is present; callers may want to log it.
    pub fn secondary_slot_present(&self) -> bool {
        self.path.join(SECONDARY_MASKS_FILE).is_file()
            && self.path.join(SECONDARY_PRIMARY_FILE).is_file()
    }

    /// Recover the private scalar using the container password.
    ///
    /// A wrong password surfaces as `FingerprintMismatch` (the derived
    /// public key no longer matches the stored fingerprint), never as a
    /// silent success.
    pub fn extract(&self, password: &str) -> Result<KeyBundle, ContainerError> {
        let masks_path = self.path.join(MASKS_FILE);
        let masks_der = fs::read(&masks_path).map_err(|source| ContainerError::Io {
            path: masks_path,
            source,
        })?;

        let primary_path = self.path.join(PRIMARY_FILE);
        let primary_der = fs::read(&primary_path).map_err(|source| ContainerError::Io {
            path: primary_path,
            source,
        })?;

        let masks = parse_masks(&masks_der).map_err(|source| ContainerError::Decode {
            file: MASKS_FILE,
            source,
        })?;
        let wrapped = parse_primary(&primary_der).map_err(|source| ContainerError::Decode {
            file: PRIMARY_FILE,
            source,
        })?;

        // Unwrap the masked scalar
        let mut wrap_key = cpkdf(password.as_bytes(), &masks.salt)?;
        let cipher = Gost28147Key::new(&wrap_key)?;
        wrap_key.zeroize();
        let mut decrypted = ecb::ecb_decrypt(&cipher, &wrapped)?;
        drop(cipher);
        bytes::reverse_in_place(&mut decrypted);

        let mut scalar = unmask(&decrypted, &masks.mask, self.curve_id)?;
        decrypted.zeroize();

        // Derive the public point and check it against the header
        let private_key = match PrivateKey::new(self.curve_id, &scalar) {
            Ok(key) => key,
            Err(e) => {
                scalar.zeroize();
                return Err(ContainerError::Crypto(e));
            }
        };
        let public_key = match private_key.public_key() {
            Ok(point) => point.raw(),
            Err(e) => {
                scalar.zeroize();
                return Err(ContainerError::Crypto(e));
            }
        };
        let fingerprint = &public_key[..8];

        if let Some(expected) = find_fingerprint(&self.header, FINGERPRINT_TAG) {
            if !bool::from(fingerprint.ct_eq(expected)) {
                scalar.zeroize();
                return Err(ContainerError::FingerprintMismatch {
                    expected: to_hex(expected),
                    got: to_hex(fingerprint),
                });
            }
        }

        Ok(KeyBundle {
            fingerprint: fingerprint.to_vec(),
            curve_oid: self.oid.clone(),
            public_key,
            private_key: scalar,
        })
    }
}

/// masks.key payload: SEQUENCE { OCTET STRING mask, OCTET STRING salt,
/// OCTET STRING hmac }.
#[doc(hidden)]
pub struct MaskData {
    mask: Vec<u8>,
    salt: Vec<u8>,
    /// Present in every container; what CryptoPro derives it from is
    /// undocumented and nothing verifies it here.
    #[allow(dead_code)]
    hmac: Vec<u8>,
}

impl Drop for MaskData {
    fn drop(&mut self) {
        self.mask.zeroize();
        self.salt.zeroize();
    }
}

// The two file parsers are public for the fuzz harness but hidden from
// docs; callers go through `Container::extract`.
#[doc(hidden)]
pub fn parse_masks(der: &[u8]) -> Result<MaskData, CryptoError> {
    let mut dec = Decoder::new(der);
    let mut seq = dec.read_sequence()?;
    let mask = seq.read_octet_string()?.to_vec();
    let salt = seq.read_octet_string()?.to_vec();
    let hmac = seq.read_octet_string()?.to_vec();
    seq.expect_empty()?;
    dec.expect_empty()?;
    Ok(MaskData { mask, salt, hmac })
}

/// primary.key payload: SEQUENCE { OCTET STRING value }.
#[doc(hidden)]
pub fn parse_primary(der: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut dec = Decoder::new(der);
    let mut seq = dec.read_sequence()?;
    let value = seq.read_octet_string()?.to_vec();
    seq.expect_empty()?;
    dec.expect_empty()?;
    Ok(value)
}

/// CryptoPro password-based key derivation.
///
/// A hand-rolled HMAC-like double-hash over Streebog-256 with a fixed
/// magic constant; 2000 iterations with a password, 2 without. Any
/// deviation from what CryptoPro computes surfaces downstream as
/// `FingerprintMismatch`.
pub fn cpkdf(password: &[u8], salt: &[u8]) -> Result<[u8; 32], CryptoError> {
    const MAGIC: &[u8; 32] = b"DENEFH028.760246785.IUEFHWUIO.EF";

    // Each password byte lands at position 4i of a 4x buffer
    let mut pin = vec![0u8; password.len() * 4];
    for (i, &b) in password.iter().enumerate() {
        pin[i * 4] = b;
    }

    let mut h = Streebog256::new();
    h.update(salt)?;
    h.update(&pin)?;
    let mut seed = h.finish()?;

    let mut c = [0u8; 64];
    c[..32].copy_from_slice(MAGIC);

    let iterations = if password.is_empty() { 2 } else { 2000 };
    let mut m0 = [0u8; 64];
    let mut m1 = [0u8; 64];

    for _ in 0..iterations {
        for j in 0..64 {
            m0[j] = c[j] ^ 0x36;
            m1[j] = c[j] ^ 0x5C;
        }
        let mut h = Streebog256::new();
        h.update(&m0)?;
        h.update(&seed)?;
        h.update(&m1)?;
        h.update(&seed)?;
        let digest = h.finish()?;
        c = [0u8; 64];
        c[..32].copy_from_slice(&digest);
    }

    for j in 0..64 {
        m0[j] = c[j] ^ 0x36;
        m1[j] = c[j] ^ 0x5C;
    }
    let mut h = Streebog256::new();
    h.update(&m0[..32])?;
    h.update(salt)?;
    h.update(&m1[..32])?;
    h.update(&pin)?;
    let mixed = h.finish()?;

    let mut h = Streebog256::new();
    h.update(&mixed)?;
    let out = h.finish()?;

    pin.zeroize();
    seed.zeroize();
    c.zeroize();
    m0.zeroize();
    m1.zeroize();
    Ok(out)
}

/// Remove the multiplicative blinding: S = D · M⁻¹ mod q, returned as the
/// 32-byte little-endian raw scalar.
fn unmask(
    decrypted_be: &[u8],
    mask: &[u8],
    curve_id: GostCurveId,
) -> Result<Vec<u8>, ContainerError> {
    let mut mask_be = bytes::reverse(mask);

    let d = BigNum::from_bytes_be(decrypted_be);
    let m = BigNum::from_bytes_be(&mask_be);
    mask_be.zeroize();

    let q = subgroup_order(curve_id);
    let m_inv = m
        .mod_inv(&q)
        .map_err(|_| ContainerError::ModInverseFailed)?;
    let s = d.mod_mul(&m_inv, &q).map_err(ContainerError::Crypto)?;

    let mut raw = s.to_bytes_be_padded(32);
    bytes::reverse_in_place(&mut raw);
    Ok(raw)
}

/// Scan opaque header bytes for the first known curve-OID DER pattern.
fn find_curve_oid(header: &[u8]) -> Option<String> {
    for oid in scan_table() {
        let pattern = oid.to_der();
        if header.windows(pattern.len()).any(|w| w == pattern.as_slice()) {
            return Some(oid.to_dot_string());
        }
    }
    None
}

/// Scan for `tag 0x08` and return the 8 bytes that follow.
fn find_fingerprint(header: &[u8], tag: u8) -> Option<&[u8]> {
    let pattern = [tag, 0x08];
    header
        .windows(2)
        .position(|w| w == &pattern[..])
        .filter(|idx| idx + 10 <= header.len())
        .map(|idx| &header[idx + 2..idx + 10])
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_cpkdf_empty_password() {
        let salt = hex_to_bytes("aabbccdd11223344aabbccdd");
        let key = cpkdf(b"", &salt).unwrap();
        assert_eq!(key.len(), 32);

        let key2 = cpkdf(b"", &salt).unwrap();
        assert_eq!(key, key2);
    }

    #[test]
    fn test_cpkdf_with_password() {
        let salt = hex_to_bytes("aabbccdd11223344aabbccdd");
        let key = cpkdf(b"testpassword", &salt).unwrap();
        assert_eq!(key.len(), 32);

        let other_pw = cpkdf(b"otherpassword", &salt).unwrap();
        assert_ne!(key, other_pw);

        let salt2 = hex_to_bytes("11223344aabbccdd11223344");
        let other_salt = cpkdf(b"testpassword", &salt2).unwrap();
        assert_ne!(key, other_salt);
    }

    #[test]
    fn test_unmask_math() {
        // ((a·b) mod q) · b⁻¹ mod q == a mod q
        let q = subgroup_order(GostCurveId::CryptoProA);
        let a = BigNum::from_bytes_be(&hex_to_bytes(
            "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
        ));
        let b = BigNum::from_bytes_be(&hex_to_bytes(
            "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210",
        ));

        let ab = a.mod_mul(&b, &q).unwrap();
        let b_inv = b.mod_inv(&q).unwrap();
        let back = ab.mod_mul(&b_inv, &q).unwrap();
        assert_eq!(back, a.mod_reduce(&q).unwrap());
    }

    #[test]
    fn test_find_curve_oid() {
        let header = [
            0x30, 0x82, 0x06, 0x07, 0x2a, 0x85, 0x03, 0x02, 0x02, 0x23, 0x01, 0x00,
        ];
        assert_eq!(find_curve_oid(&header).as_deref(), Some("1.2.643.2.2.35.1"));

        let header2 = [
            0x30, 0x82, 0x06, 0x07, 0x2a, 0x85, 0x03, 0x02, 0x02, 0x24, 0x00, 0x00,
        ];
        assert_eq!(find_curve_oid(&header2).as_deref(), Some("1.2.643.2.2.36.0"));

        let header3 = [0x30, 0x82, 0x00, 0x00, 0x00];
        assert_eq!(find_curve_oid(&header3), None);
    }

    #[test]
    fn test_find_curve_oid_tc26() {
        let mut header = vec![0x30, 0x82, 0x01, 0x00];
        header.extend_from_slice(&known::curve_tc26_2012_256_a().to_der());
        header.push(0x00);
        assert_eq!(
            find_curve_oid(&header).as_deref(),
            Some("1.2.643.7.1.2.1.1.1")
        );
    }

    #[test]
    fn test_find_fingerprint() {
        let header = [
            0x30, 0x82, 0x8a, 0x08, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x00,
        ];
        let fp = find_fingerprint(&header, 0x8a).unwrap();
        assert_eq!(fp, &[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);

        let header2 = [0x30, 0x82, 0x00, 0x00, 0x00];
        assert!(find_fingerprint(&header2, 0x8a).is_none());
    }

    #[test]
    fn test_find_fingerprint_truncated_tail() {
        // Tag present but fewer than 8 bytes follow
        let header = [0x8a, 0x08, 0x01, 0x02, 0x03];
        assert!(find_fingerprint(&header, 0x8a).is_none());
    }

    #[test]
    fn test_resolve_curve_registry_covers_scan_table() {
        for oid in scan_table() {
            assert!(
                resolve_curve(&oid.to_dot_string()).is_some(),
                "no descriptor for {oid}"
            );
        }
        assert!(resolve_curve("1.2.840.10045.3.1.7").is_none());
    }

    #[test]
    fn test_parse_masks_strict() {
        // SEQUENCE { OCTET STRING, OCTET STRING, OCTET STRING }
        let der = hex_to_bytes("300c04020102040201020402aabb");
        let masks = parse_masks(&der).unwrap();
        assert_eq!(masks.mask, vec![0x01, 0x02]);
        assert_eq!(masks.salt, vec![0x01, 0x02]);
        assert_eq!(masks.hmac, vec![0xaa, 0xbb]);

        // Missing hmac field
        let short = hex_to_bytes("30080402010204020102");
        assert!(parse_masks(&short).is_err());

        // Trailing byte after the sequence
        let mut trailing = der.clone();
        trailing.push(0x00);
        assert!(matches!(
            parse_masks(&trailing),
            Err(CryptoError::DecodeTrailingData)
        ));
    }

    #[test]
    fn test_parse_primary_strict() {
        let der = hex_to_bytes("300a04080011223344556677");
        let value = parse_primary(&der).unwrap();
        assert_eq!(value.len(), 8);

        assert!(parse_primary(&hex_to_bytes("3000")).is_err());
    }
}
