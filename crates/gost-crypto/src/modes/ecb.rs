//! ECB (Electronic Codebook) mode over GOST 28147.
//!
//! ECB offers no semantic security; it exists here because the CryptoPro
//! container format wraps its 32-byte masked scalar exactly this way.

use crate::magma::{Gost28147Key, GOST28147_BLOCK_SIZE};
use gost_types::CryptoError;

/// Encrypt data in ECB mode. Input must be a non-empty multiple of 8 bytes.
pub fn ecb_encrypt(key: &Gost28147Key, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if plaintext.is_empty() || plaintext.len() % GOST28147_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidBlockLength);
    }
    let mut output = plaintext.to_vec();
    for chunk in output.chunks_mut(GOST28147_BLOCK_SIZE) {
        key.encrypt_block(chunk)?;
    }
    Ok(output)
}

/// Decrypt data in ECB mode. Input must be a non-empty multiple of 8 bytes.
pub fn ecb_decrypt(key: &Gost28147Key, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if ciphertext.is_empty() || ciphertext.len() % GOST28147_BLOCK_SIZE != 0 {
        return Err(CryptoError::InvalidBlockLength);
    }
    let mut output = ciphertext.to_vec();
    for chunk in output.chunks_mut(GOST28147_BLOCK_SIZE) {
        key.decrypt_block(chunk)?;
    }
    Ok(output)
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
    fn test_ecb_roundtrip() {
        let key_bytes =
            hex_to_bytes("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef");
        let plaintext =
            hex_to_bytes("fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210");

        let key = Gost28147Key::new(&key_bytes).unwrap();
        let encrypted = ecb_encrypt(&key, &plaintext).unwrap();
        assert_eq!(encrypted.len(), plaintext.len());
        assert_ne!(encrypted, plaintext);

        let decrypted = ecb_decrypt(&key, &encrypted).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_ecb_identical_blocks_leak() {
        // Definitional property of ECB: equal blocks encrypt equally
        let key = Gost28147Key::new(&[0x42; 32]).unwrap();
        let plaintext = [0x10; 16];
        let ct = ecb_encrypt(&key, &plaintext).unwrap();
        assert_eq!(ct[..8], ct[8..]);
    }

    #[test]
    fn test_ecb_rejects_partial_block() {
        let key = Gost28147Key::new(&[0u8; 32]).unwrap();
        assert!(ecb_encrypt(&key, &[0u8; 12]).is_err());
        assert!(ecb_decrypt(&key, &[0u8; 7]).is_err());
        assert!(ecb_encrypt(&key, &[]).is_err());
    }
}
