//! Minimal certificate view for the CMS signer.
//!
//! Only two fields are ever interpreted: the serial number and the issuer
//! name. The issuer is kept as its verbatim DER so that the
//! issuerAndSerialNumber the signer emits is byte-identical to the
//! certificate, whatever string types or encodings the CA used.

use gost_types::CryptoError;
use gost_utils::asn1::{Decoder, RawValue};

/// The fields of an X.509 certificate the signer needs.
#[derive(Debug, Clone)]
pub struct SignerCertificate {
    raw: Vec<u8>,
    /// INTEGER content octets of tbsCertificate.serialNumber, verbatim.
    serial: Vec<u8>,
    /// tbsCertificate.issuer as a complete DER element, verbatim.
    issuer: RawValue,
}

impl SignerCertificate {
    /// Parse a DER certificate just deep enough to lift issuer and serial.
    /// Everything after the issuer (validity, subject, key, extensions,
    /// signature) is left uninterpreted.
    pub fn from_der(data: &[u8]) -> Result<Self, CryptoError> {
        if data.is_empty() {
            return Err(CryptoError::NullInput);
        }

        let mut outer = Decoder::new(data);
        let mut cert = outer.read_sequence()?;
        let mut tbs = cert.read_sequence()?;

        // version [0] EXPLICIT INTEGER DEFAULT v1
        let _ = tbs.try_read_context_specific(0, true)?;

        // serialNumber INTEGER
        let serial = tbs.read_integer()?.to_vec();

        // signature AlgorithmIdentifier
        let _ = tbs.read_sequence()?;

        // issuer Name, lifted verbatim
        let issuer = tbs.read_raw_value()?;
        if issuer.number != 0x10 || !issuer.constructed {
            return Err(CryptoError::DecodeAsn1Fail);
        }

        Ok(Self {
            raw: data.to_vec(),
            serial,
            issuer,
        })
    }

    /// The full certificate DER as supplied.
    pub fn raw_der(&self) -> &[u8] {
        &self.raw
    }

    /// Serial number INTEGER content octets.
    pub fn serial_content(&self) -> &[u8] {
        &self.serial
    }

    /// The issuer name element.
    pub fn issuer(&self) -> &RawValue {
        &self.issuer
    }
}
