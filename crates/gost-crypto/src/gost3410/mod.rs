//! GOST R 34.10-2012 (256-bit) signatures.
//!
//! Raw byte conventions follow the OpenSSL GOST engine and gogost: private
//! keys and the 64-byte raw public point are little-endian, the raw
//! signature is `s ‖ r` (each half 32 bytes, big-endian), and the digest
//! passed to [`PrivateKey::sign_digest`] is interpreted as a big-endian
//! integer — callers hand hashes over pre-reversed.

pub(crate) mod curves;
pub(crate) mod point;

use gost_bignum::BigNum;
use gost_types::{CryptoError, GostCurveId};
use gost_utils::bytes;
use zeroize::Zeroize;

use curves::{get_curve_params, CurveParams};
use point::JacobianPoint;

/// Size in bytes of a coordinate, a scalar, and half a raw signature.
pub const POINT_SIZE: usize = 32;

/// Number of nonce retries before signing gives up. Each retry fails with
/// probability ~2⁻²⁵⁶, so reaching the bound means the RNG is broken.
const SIGN_RETRIES: usize = 100;

/// The order q of the subgroup the given parameter set signs in. Scalars
/// and masks live in [1, q-1].
pub fn subgroup_order(curve_id: GostCurveId) -> BigNum {
    get_curve_params(curve_id).q
}

/// A GOST R 34.10-2012 private key.
#[derive(Clone)]
pub struct PrivateKey {
    curve_id: GostCurveId,
    params: CurveParams,
    /// The private scalar d, 1 <= d < q.
    key: BigNum,
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl PrivateKey {
    /// Create a private key from its 32-byte little-endian raw form (the
    /// container convention).
    pub fn new(curve_id: GostCurveId, raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != POINT_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: POINT_SIZE,
                got: raw.len(),
            });
        }
        let be = bytes::reverse(raw);
        let d = BigNum::from_bytes_be(&be);
        let params = get_curve_params(curve_id);

        if d.is_zero() || d >= params.q {
            return Err(CryptoError::EcInvalidPrivateKey);
        }

        Ok(Self {
            curve_id,
            params,
            key: d,
        })
    }

    /// Generate a fresh key pair on the given curve.
    pub fn generate(curve_id: GostCurveId) -> Result<Self, CryptoError> {
        let params = get_curve_params(curve_id);
        let d = BigNum::random_range(&params.q)?;
        Ok(Self {
            curve_id,
            params,
            key: d,
        })
    }

    /// The 32-byte little-endian raw form of the scalar.
    pub fn raw(&self) -> Vec<u8> {
        let mut out = self.key.to_bytes_be_padded(POINT_SIZE);
        bytes::reverse_in_place(&mut out);
        out
    }

    /// The curve this key lives on.
    pub fn curve_id(&self) -> GostCurveId {
        self.curve_id
    }

    /// Derive the public key Q = d·G.
    pub fn public_key(&self) -> Result<PublicKey, CryptoError> {
        let g = JacobianPoint::from_affine(&self.params.gx, &self.params.gy);
        let q_point = g.mul(&self.key, &self.params)?;
        let (x, y) = q_point
            .to_affine(&self.params.p)?
            .ok_or(CryptoError::EcPointAtInfinity)?;
        Ok(PublicKey {
            curve_id: self.curve_id,
            params: self.params.clone(),
            x,
            y,
        })
    }

    /// Sign a digest, returning the raw 64-byte signature `s ‖ r`.
    ///
    /// The digest bytes are taken as a big-endian integer and reduced
    /// modulo the subgroup order; a zero reduction is replaced by one, as
    /// the standard requires.
    pub fn sign_digest(&self, digest: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let q = &self.params.q;

        let mut e = BigNum::from_bytes_be(digest).mod_reduce(q)?;
        if e.is_zero() {
            e = BigNum::from_u64(1);
        }

        let g = JacobianPoint::from_affine(&self.params.gx, &self.params.gy);

        for _ in 0..SIGN_RETRIES {
            let k = BigNum::random_range(q)?;

            let c = g.mul(&k, &self.params)?;
            let (cx, _) = match c.to_affine(&self.params.p)? {
                Some(p) => p,
                None => continue,
            };

            let r = cx.mod_reduce(q)?;
            if r.is_zero() {
                continue;
            }

            // s = (r·d + k·e) mod q
            let rd = r.mod_mul(&self.key, q)?;
            let ke = k.mod_mul(&e, q)?;
            let s = rd.mod_add(&ke, q)?;
            if s.is_zero() {
                continue;
            }

            let mut sig = s.to_bytes_be_padded(POINT_SIZE);
            sig.extend_from_slice(&r.to_bytes_be_padded(POINT_SIZE));
            return Ok(sig);
        }

        Err(CryptoError::EcSignFail)
    }
}

/// A GOST R 34.10-2012 public key (an affine curve point).
#[derive(Clone)]
pub struct PublicKey {
    curve_id: GostCurveId,
    params: CurveParams,
    x: BigNum,
    y: BigNum,
}

impl PublicKey {
    /// Parse the 64-byte little-endian raw form and check the point lies
    /// on the curve.
    pub fn from_raw(curve_id: GostCurveId, raw: &[u8]) -> Result<Self, CryptoError> {
        if raw.len() != 2 * POINT_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: 2 * POINT_SIZE,
                got: raw.len(),
            });
        }
        let be = bytes::reverse(raw);
        let y = BigNum::from_bytes_be(&be[..POINT_SIZE]);
        let x = BigNum::from_bytes_be(&be[POINT_SIZE..]);
        let params = get_curve_params(curve_id);

        let key = Self {
            curve_id,
            params,
            x,
            y,
        };
        if !key.is_on_curve()? {
            return Err(CryptoError::EcPointNotOnCurve);
        }
        Ok(key)
    }

    /// The 64-byte little-endian raw form; its first 8 bytes are the
    /// container fingerprint.
    pub fn raw(&self) -> Vec<u8> {
        let mut out = self.y.to_bytes_be_padded(POINT_SIZE);
        out.extend_from_slice(&self.x.to_bytes_be_padded(POINT_SIZE));
        bytes::reverse_in_place(&mut out);
        out
    }

    /// The curve this key lives on.
    pub fn curve_id(&self) -> GostCurveId {
        self.curve_id
    }

    fn is_on_curve(&self) -> Result<bool, CryptoError> {
        let p = &self.params.p;
        let lhs = self.y.mod_mul(&self.y, p)?;
        let x_sq = self.x.mod_mul(&self.x, p)?;
        let x_cu = x_sq.mod_mul(&self.x, p)?;
        let ax = self.params.a.mod_mul(&self.x, p)?;
        let rhs = x_cu.mod_add(&ax, p)?.mod_add(&self.params.b, p)?;
        Ok(lhs == rhs)
    }

    /// Verify a raw 64-byte `s ‖ r` signature over a digest.
    pub fn verify_digest(&self, digest: &[u8], signature: &[u8]) -> Result<bool, CryptoError> {
        if signature.len() != 2 * POINT_SIZE {
            return Ok(false);
        }
        let q = &self.params.q;

        let s = BigNum::from_bytes_be(&signature[..POINT_SIZE]);
        let r = BigNum::from_bytes_be(&signature[POINT_SIZE..]);

        if r.is_zero() || r >= *q || s.is_zero() || s >= *q {
            return Ok(false);
        }

        let mut e = BigNum::from_bytes_be(digest).mod_reduce(q)?;
        if e.is_zero() {
            e = BigNum::from_u64(1);
        }

        let v = match e.mod_inv(q) {
            Ok(v) => v,
            Err(_) => return Ok(false),
        };

        // z1 = s·v mod q, z2 = -r·v mod q
        let z1 = s.mod_mul(&v, q)?;
        let rv = r.mod_mul(&v, q)?;
        let z2 = q.mod_sub(&rv, q)?;

        let g = JacobianPoint::from_affine(&self.params.gx, &self.params.gy);
        let qp = JacobianPoint::from_affine(&self.x, &self.y);
        let c = g.mul_add(&z1, &qp, &z2, &self.params)?;

        let (cx, _) = match c.to_affine(&self.params.p)? {
            Some(p) => p,
            None => return Ok(false),
        };

        Ok(cx.mod_reduce(q)? == r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::streebog::Streebog256;

    fn hex_to_bytes(s: &str) -> Vec<u8> {
        (0..s.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
            .collect()
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();
        let pub_key = prv.public_key().unwrap();

        let digest = Streebog256::digest(b"test message").unwrap();
        let sig = prv.sign_digest(&digest).unwrap();
        assert_eq!(sig.len(), 64);

        assert!(pub_key.verify_digest(&digest, &sig).unwrap());

        let mut bad = digest;
        bad[0] ^= 0xFF;
        assert!(!pub_key.verify_digest(&bad, &sig).unwrap());
    }

    #[test]
    fn test_sign_verify_all_curves() {
        let digest = Streebog256::digest(b"curve sweep").unwrap();
        for id in [
            GostCurveId::CryptoProA,
            GostCurveId::CryptoProB,
            GostCurveId::CryptoProC,
            GostCurveId::CryptoProXchA,
            GostCurveId::CryptoProXchB,
            GostCurveId::Tc26ParamSetA,
            GostCurveId::Tc26ParamSetB,
        ] {
            let prv = PrivateKey::generate(id).unwrap();
            let sig = prv.sign_digest(&digest).unwrap();
            let pub_key = prv.public_key().unwrap();
            assert!(pub_key.verify_digest(&digest, &sig).unwrap(), "{id:?}");
        }
    }

    #[test]
    fn test_raw_private_key_roundtrip() {
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();
        let raw = prv.raw();
        assert_eq!(raw.len(), 32);

        let restored = PrivateKey::new(GostCurveId::CryptoProA, &raw).unwrap();
        assert_eq!(restored.raw(), raw);
        // Same public point either way
        assert_eq!(
            restored.public_key().unwrap().raw(),
            prv.public_key().unwrap().raw()
        );
    }

    #[test]
    fn test_raw_public_key_roundtrip() {
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();
        let pub_key = prv.public_key().unwrap();
        let raw = pub_key.raw();
        assert_eq!(raw.len(), 64);

        let restored = PublicKey::from_raw(GostCurveId::CryptoProA, &raw).unwrap();
        assert_eq!(restored.raw(), raw);

        let digest = Streebog256::digest(b"roundtrip").unwrap();
        let sig = prv.sign_digest(&digest).unwrap();
        assert!(restored.verify_digest(&digest, &sig).unwrap());
    }

    #[test]
    fn test_zero_key_rejected() {
        let err = PrivateKey::new(GostCurveId::CryptoProA, &[0u8; 32]);
        assert!(matches!(err, Err(CryptoError::EcInvalidPrivateKey)));
    }

    #[test]
    fn test_oversized_scalar_rejected() {
        // All-ones little-endian scalar exceeds q on the TC26-B curve
        let err = PrivateKey::new(GostCurveId::Tc26ParamSetB, &[0xFF; 32]);
        assert!(matches!(err, Err(CryptoError::EcInvalidPrivateKey)));
    }

    #[test]
    fn test_wrong_length_key_rejected() {
        assert!(PrivateKey::new(GostCurveId::CryptoProA, &[1u8; 31]).is_err());
        assert!(PublicKey::from_raw(GostCurveId::CryptoProA, &[1u8; 63]).is_err());
    }

    #[test]
    fn test_garbage_signature_rejected() {
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();
        let pub_key = prv.public_key().unwrap();
        let digest = Streebog256::digest(b"x").unwrap();
        assert!(!pub_key.verify_digest(&digest, &[0u8; 64]).unwrap());
        assert!(!pub_key.verify_digest(&digest, &[0xFF; 64]).unwrap());
        assert!(!pub_key.verify_digest(&digest, &[0u8; 10]).unwrap());
    }

    #[test]
    fn test_known_scalar_public_point() {
        // d = 2: Q = 2G, checked against explicit doubling
        let mut raw = [0u8; 32];
        raw[0] = 2;
        let prv = PrivateKey::new(GostCurveId::CryptoProA, &raw).unwrap();
        let q_raw = prv.public_key().unwrap().raw();

        let c = curves::get_curve_params(GostCurveId::CryptoProA);
        let g = JacobianPoint::from_affine(&c.gx, &c.gy);
        let two_g = g.double(&c).unwrap();
        let (x, y) = two_g.to_affine(&c.p).unwrap().unwrap();
        let mut expected = y.to_bytes_be_padded(POINT_SIZE);
        expected.extend_from_slice(&x.to_bytes_be_padded(POINT_SIZE));
        expected.reverse();
        assert_eq!(q_raw, expected);
    }

    #[test]
    fn test_signature_halves_are_scalars() {
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();
        let digest = Streebog256::digest(b"halves").unwrap();
        let sig = prv.sign_digest(&digest).unwrap();

        let c = curves::get_curve_params(GostCurveId::CryptoProA);
        let s = gost_bignum::BigNum::from_bytes_be(&sig[..32]);
        let r = gost_bignum::BigNum::from_bytes_be(&sig[32..]);
        assert!(!s.is_zero() && s < c.q);
        assert!(!r.is_zero() && r < c.q);
    }

    #[test]
    fn test_digest_reversal_changes_signature_validity() {
        // The primitive consumes little-endian digests; feeding the
        // unreversed hash must not verify against the reversed one.
        let prv = PrivateKey::generate(GostCurveId::CryptoProA).unwrap();
        let pub_key = prv.public_key().unwrap();
        let digest = Streebog256::digest(b"endianness contract").unwrap();
        let reversed: Vec<u8> = digest.iter().rev().copied().collect();

        let sig = prv.sign_digest(&reversed).unwrap();
        assert!(pub_key.verify_digest(&reversed, &sig).unwrap());
        assert!(!pub_key.verify_digest(&digest, &sig).unwrap());
    }

    #[test]
    fn test_fingerprint_prefix_is_stable() {
        let raw_key = hex_to_bytes("5a0f3c2b1e4d60798a9bacbdcedfe0f1021324354647586a7b8c9dadbecfd0e1");
        let prv = PrivateKey::new(GostCurveId::CryptoProA, &raw_key).unwrap();
        let fp1 = prv.public_key().unwrap().raw()[..8].to_vec();
        let fp2 = prv.public_key().unwrap().raw()[..8].to_vec();
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.len(), 8);
    }
}
