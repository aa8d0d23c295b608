use std::path::PathBuf;

/// Cryptographic operation errors.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    // General errors
    #[error("null or empty input")]
    NullInput,
    #[error("invalid argument")]
    InvalidArg,
    #[error("invalid key length: expected {expected}, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },
    #[error("input length not a multiple of the block size")]
    InvalidBlockLength,

    // BigNum errors
    #[error("big number: division by zero")]
    BnDivisionByZero,
    #[error("big number: no modular inverse")]
    BnNoInverse,
    #[error("big number: random generation failed")]
    BnRandGenFail,

    // Curve / signature errors
    #[error("ec: point at infinity")]
    EcPointAtInfinity,
    #[error("ec: point not on curve")]
    EcPointNotOnCurve,
    #[error("ec: invalid private key")]
    EcInvalidPrivateKey,
    #[error("ec: invalid public key")]
    EcInvalidPublicKey,
    #[error("ec: signature generation failed")]
    EcSignFail,

    // Encoding/Decoding errors
    #[error("decode: bad asn1 structure")]
    DecodeAsn1Fail,
    #[error("decode: trailing data")]
    DecodeTrailingData,
}

/// Key-container extraction errors.
///
/// Matched by variant identity; the display strings exist for log lines
/// only.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("could not find curve OID in header.key")]
    CurveOidNotFound,
    #[error("unknown curve OID: {0}")]
    CurveOidUnknown(String),
    #[error("fingerprint mismatch (wrong password?): expected {expected}, got {got}")]
    FingerprintMismatch { expected: String, got: String },
    #[error("failed to calculate modular inverse")]
    ModInverseFailed,
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {file}")]
    Decode {
        file: &'static str,
        #[source]
        source: CryptoError,
    },
    #[error("crypto error")]
    Crypto(#[from] CryptoError),
}

/// CMS SignedData construction errors.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    #[error("failed to parse certificate")]
    CertificateParse(#[source] CryptoError),
    #[error("failed to create signed attributes")]
    SignedAttributes(#[source] CryptoError),
    #[error("failed to sign")]
    Sign(#[source] CryptoError),
    #[error("failed to marshal SignedData")]
    MarshalSignedData(#[source] CryptoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_error_display() {
        assert_eq!(CryptoError::NullInput.to_string(), "null or empty input");
        assert_eq!(
            CryptoError::BnNoInverse.to_string(),
            "big number: no modular inverse"
        );
        let e = CryptoError::InvalidKeyLength {
            expected: 32,
            got: 16,
        };
        assert_eq!(e.to_string(), "invalid key length: expected 32, got 16");
    }

    #[test]
    fn test_container_error_display() {
        assert_eq!(
            ContainerError::CurveOidNotFound.to_string(),
            "could not find curve OID in header.key"
        );
        assert_eq!(
            ContainerError::CurveOidUnknown("1.2.3".into()).to_string(),
            "unknown curve OID: 1.2.3"
        );
        let e = ContainerError::FingerprintMismatch {
            expected: "0102".into(),
            got: "0304".into(),
        };
        assert_eq!(
            e.to_string(),
            "fingerprint mismatch (wrong password?): expected 0102, got 0304"
        );
    }

    #[test]
    fn test_container_error_source_chain() {
        use std::error::Error;
        let e = ContainerError::Decode {
            file: "masks.key",
            source: CryptoError::DecodeTrailingData,
        };
        assert_eq!(e.to_string(), "failed to parse masks.key");
        let cause = e.source().expect("cause");
        assert_eq!(cause.to_string(), "decode: trailing data");
    }

    #[test]
    fn test_cms_error_source_chain() {
        use std::error::Error;
        let e = CmsError::CertificateParse(CryptoError::NullInput);
        assert_eq!(e.to_string(), "failed to parse certificate");
        assert_eq!(e.source().expect("cause").to_string(), "null or empty input");
    }

    #[test]
    fn test_errors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CryptoError>();
        assert_send_sync::<ContainerError>();
        assert_send_sync::<CmsError>();
    }

    #[test]
    fn test_crypto_to_container_conversion() {
        let e: ContainerError = CryptoError::BnNoInverse.into();
        assert!(matches!(e, ContainerError::Crypto(CryptoError::BnNoInverse)));
    }
}
