//! CMS/PKCS#7 SignedData construction with GOST algorithms.
//!
//! Produces the detached, signed-attributes form consumed by the ESIA
//! OAuth service. Attribute order inside signedAttrs is fixed
//! (contentType, signingTime, messageDigest) and the outer SET is never
//! re-sorted; the reference verifier is strict about both.

use std::time::{SystemTime, UNIX_EPOCH};

use gost_crypto::gost3410::PrivateKey;
use gost_crypto::streebog::Streebog256;
use gost_types::CmsError;
use gost_utils::asn1::{tags, unix_to_datetime, Encoder, RawValue};
use gost_utils::bytes;
use gost_utils::oid::{known, Oid};

use crate::x509::SignerCertificate;

// ── Encoder helpers (Encoder::write_* returns &mut Self, finish takes self) ──

fn enc_seq(content: &[u8]) -> Vec<u8> {
    let mut e = Encoder::new();
    e.write_sequence(content);
    e.finish()
}

fn enc_set(content: &[u8]) -> Vec<u8> {
    let mut e = Encoder::new();
    e.write_set(content);
    e.finish()
}

fn enc_octet(content: &[u8]) -> Vec<u8> {
    let mut e = Encoder::new();
    e.write_octet_string(content);
    e.finish()
}

fn enc_oid(oid: &Oid) -> Vec<u8> {
    let mut e = Encoder::new();
    e.write_oid(&oid.to_der_value());
    e.finish()
}

/// IMPLICIT [0] wrapper.
fn enc_ctx0(content: &[u8]) -> Vec<u8> {
    let mut e = Encoder::new();
    e.write_context_specific(0, true, content);
    e.finish()
}

/// AlgorithmIdentifier ::= SEQUENCE { algorithm OID, parameters NULL }.
fn alg_id(oid: &Oid) -> Vec<u8> {
    let mut inner = Encoder::new();
    inner.write_oid(&oid.to_der_value());
    inner.write_null();
    enc_seq(&inner.finish())
}

/// Attribute ::= SEQUENCE { attrType OID, attrValues SET OF (one value) }.
fn attribute(attr_type: &Oid, value_der: &[u8]) -> Vec<u8> {
    let mut inner = Encoder::new();
    inner.write_oid(&attr_type.to_der_value());
    inner.write_raw(&enc_set(value_der));
    enc_seq(&inner.finish())
}

/// A CMS signer bound to one private key and one certificate.
///
/// Holds read-only material only; a single instance may serve any number
/// of `sign` calls, concurrently if shared.
pub struct Signer {
    private_key: PrivateKey,
    certificate: Vec<u8>,
    issuer: RawValue,
    serial: Vec<u8>,
}

impl Signer {
    /// Create a signer. The certificate is parsed once for issuer and
    /// serial; empty or undecodable DER is rejected here.
    pub fn new(private_key: PrivateKey, certificate_der: &[u8]) -> Result<Self, CmsError> {
        let cert =
            SignerCertificate::from_der(certificate_der).map_err(CmsError::CertificateParse)?;
        Ok(Self {
            private_key,
            certificate: certificate_der.to_vec(),
            issuer: cert.issuer().clone(),
            serial: cert.serial_content().to_vec(),
        })
    }

    /// Sign `content`, producing the detached CMS SignedData DER.
    pub fn sign(&self, content: &[u8]) -> Result<Vec<u8>, CmsError> {
        self.sign_at(content, now_unix())
    }

    /// Like [`sign`](Self::sign) with an explicit signingTime instant.
    pub fn sign_at(&self, content: &[u8], signing_time: i64) -> Result<Vec<u8>, CmsError> {
        // 1. Digest of the (detached) content
        let content_digest = Streebog256::digest(content).map_err(CmsError::SignedAttributes)?;

        // 2. Signed attributes, in fixed order
        let (attrs_inner, attrs_for_signing) =
            build_signed_attributes(&content_digest, signing_time);

        // 3-4. Hash the SET image, reverse for the little-endian
        // primitive, sign
        let attrs_digest =
            Streebog256::digest(&attrs_for_signing).map_err(CmsError::SignedAttributes)?;
        let reversed = bytes::reverse(&attrs_digest);
        let signature = self
            .private_key
            .sign_digest(&reversed)
            .map_err(CmsError::Sign)?;

        // 5. SignerInfo
        let mut ias = Encoder::new();
        ias.write_raw_value(&self.issuer);
        ias.write_integer_content(&self.serial);
        let issuer_and_serial = enc_seq(&ias.finish());

        let mut si = Encoder::new();
        si.write_integer(&[0x01]);
        si.write_raw(&issuer_and_serial);
        si.write_raw(&alg_id(&known::streebog256()));
        si.write_raw(&enc_ctx0(&attrs_inner));
        si.write_raw(&alg_id(&known::gost3410_2012_256()));
        si.write_octet_string(&signature);
        let signer_info = enc_seq(&si.finish());

        // 6. SignedData, detached: encapContentInfo has no eContent
        let mut sd = Encoder::new();
        sd.write_integer(&[0x01]);
        sd.write_raw(&enc_set(&alg_id(&known::streebog256())));
        sd.write_raw(&enc_seq(&enc_oid(&known::pkcs7_data())));
        sd.write_raw(&enc_ctx0(&self.certificate));
        sd.write_raw(&enc_set(&signer_info));
        let signed_data = enc_seq(&sd.finish());

        // 7. ContentInfo { id-signedData, [0] EXPLICIT SignedData }
        let mut ci = Encoder::new();
        ci.write_oid(&known::pkcs7_signed_data().to_der_value());
        ci.write_raw(&enc_ctx0(&signed_data));
        Ok(enc_seq(&ci.finish()))
    }
}

/// Build the three signed attributes.
///
/// Returns `(attrs_inner, attrs_for_signing)`: the concatenated Attribute
/// elements (content of the `[0] IMPLICIT` field), and the same elements
/// under an outer SET header — the byte string that is actually hashed
/// and signed. The SET image is the SEQUENCE image with the identifier
/// octet rewritten, which is valid because only the tag differs.
fn build_signed_attributes(content_digest: &[u8], signing_time: i64) -> (Vec<u8>, Vec<u8>) {
    let mut time_value = Encoder::new();
    time_value.write_time(signing_time);

    let mut attrs_inner = Vec::new();
    attrs_inner.extend_from_slice(&attribute(
        &known::pkcs9_content_type(),
        &enc_oid(&known::pkcs7_data()),
    ));
    attrs_inner.extend_from_slice(&attribute(
        &known::pkcs9_signing_time(),
        &time_value.finish(),
    ));
    attrs_inner.extend_from_slice(&attribute(
        &known::pkcs9_message_digest(),
        &enc_octet(content_digest),
    ));

    let mut attrs_for_signing = enc_seq(&attrs_inner);
    attrs_for_signing[0] = tags::SET;

    (attrs_inner, attrs_for_signing)
}

/// Render an instant as `YYYY.MM.DD HH:MM:SS ±ZZZZ` in the given UTC
/// offset; the format the surrounding OAuth client sends alongside the
/// signature.
pub fn format_signing_time(timestamp: i64, tz_offset_secs: i32) -> String {
    let (year, month, day, hour, minute, second) =
        unix_to_datetime(timestamp + tz_offset_secs as i64);
    let sign = if tz_offset_secs < 0 { '-' } else { '+' };
    let abs = tz_offset_secs.unsigned_abs();
    format!(
        "{year:04}.{month:02}.{day:02} {hour:02}:{minute:02}:{second:02} {sign}{:02}{:02}",
        abs / 3600,
        (abs % 3600) / 60
    )
}

fn now_unix() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
