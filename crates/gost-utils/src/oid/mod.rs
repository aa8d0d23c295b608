//! OID (Object Identifier) codec and the fixed table of identifiers this
//! crate family emits or scans for.

use gost_types::CryptoError;

/// A parsed OID represented as a sequence of arc values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: Vec<u32>,
}

impl Oid {
    /// Create an OID from a slice of arc values.
    pub fn new(arcs: &[u32]) -> Self {
        Self {
            arcs: arcs.to_vec(),
        }
    }

    /// Return the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Encode this OID to DER content bytes (no tag/length).
    pub fn to_der_value(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        if self.arcs.len() >= 2 {
            buf.push((self.arcs[0] * 40 + self.arcs[1]) as u8);
            for &arc in &self.arcs[2..] {
                encode_arc(&mut buf, arc);
            }
        }
        buf
    }

    /// Encode this OID as a complete DER TLV (tag, length, value).
    pub fn to_der(&self) -> Vec<u8> {
        let mut e = crate::asn1::Encoder::new();
        e.write_oid(&self.to_der_value());
        e.finish()
    }

    /// Parse an OID from DER content bytes.
    pub fn from_der_value(data: &[u8]) -> Result<Self, CryptoError> {
        if data.is_empty() {
            return Err(CryptoError::DecodeAsn1Fail);
        }
        let mut arcs = Vec::new();
        let first = data[0] as u32;
        arcs.push(first / 40);
        arcs.push(first % 40);

        let mut i = 1;
        while i < data.len() {
            let (arc, consumed) = decode_arc(&data[i..])?;
            arcs.push(arc);
            i += consumed;
        }

        Ok(Self { arcs })
    }

    /// Return the dotted-string representation (e.g., "1.2.643.7.1.1.2.2").
    pub fn to_dot_string(&self) -> String {
        self.arcs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for Oid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_dot_string())
    }
}

fn encode_arc(buf: &mut Vec<u8>, mut value: u32) {
    if value < 0x80 {
        buf.push(value as u8);
        return;
    }
    let mut bytes = Vec::new();
    while value > 0 {
        bytes.push((value & 0x7F) as u8);
        value >>= 7;
    }
    bytes.reverse();
    let last = bytes.len() - 1;
    for (i, b) in bytes.iter().enumerate() {
        buf.push(if i < last { b | 0x80 } else { *b });
    }
}

fn decode_arc(data: &[u8]) -> Result<(u32, usize), CryptoError> {
    let mut value: u32 = 0;
    for (i, &byte) in data.iter().enumerate() {
        value = value.checked_shl(7).ok_or(CryptoError::DecodeAsn1Fail)? | (byte & 0x7F) as u32;
        if (byte & 0x80) == 0 {
            return Ok((value, i + 1));
        }
    }
    Err(CryptoError::DecodeAsn1Fail)
}

// Well-known OIDs
pub mod known {
    use super::Oid;

    // GOST algorithm identifiers (TC26)
    /// GOST R 34.11-2012 256-bit hash (Streebog-256).
    pub fn streebog256() -> Oid {
        Oid::new(&[1, 2, 643, 7, 1, 1, 2, 2])
    }
    /// GOST R 34.10-2012 256-bit public key / signature.
    pub fn gost3410_2012_256() -> Oid {
        Oid::new(&[1, 2, 643, 7, 1, 1, 1, 1])
    }
    /// GOST R 34.10-2012 with GOST R 34.11-2012 (256-bit), combined.
    /// Defined for completeness; the signer emits the bare signature OID.
    pub fn gost3410_2012_256_with_streebog256() -> Oid {
        Oid::new(&[1, 2, 643, 7, 1, 1, 3, 2])
    }

    // GOST R 34.10 curve parameter sets
    pub fn curve_crypto_pro_a() -> Oid {
        Oid::new(&[1, 2, 643, 2, 2, 35, 1])
    }
    pub fn curve_crypto_pro_b() -> Oid {
        Oid::new(&[1, 2, 643, 2, 2, 35, 2])
    }
    pub fn curve_crypto_pro_c() -> Oid {
        Oid::new(&[1, 2, 643, 2, 2, 35, 3])
    }
    pub fn curve_crypto_pro_xch_a() -> Oid {
        Oid::new(&[1, 2, 643, 2, 2, 36, 0])
    }
    pub fn curve_crypto_pro_xch_b() -> Oid {
        Oid::new(&[1, 2, 643, 2, 2, 36, 1])
    }
    pub fn curve_tc26_2012_256_a() -> Oid {
        Oid::new(&[1, 2, 643, 7, 1, 2, 1, 1, 1])
    }
    pub fn curve_tc26_2012_256_b() -> Oid {
        Oid::new(&[1, 2, 643, 7, 1, 2, 1, 1, 2])
    }

    // PKCS#7 content types
    pub fn pkcs7_data() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 7, 1])
    }
    pub fn pkcs7_signed_data() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 7, 2])
    }

    // PKCS#9 signed-attribute types
    pub fn pkcs9_content_type() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 9, 3])
    }
    pub fn pkcs9_message_digest() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 9, 4])
    }
    pub fn pkcs9_signing_time() -> Oid {
        Oid::new(&[1, 2, 840, 113549, 1, 9, 5])
    }
}
