//! GOST 28147-89 block cipher.
//!
//! 64-bit block, 256-bit key, fixed id-tc26-gost-28147-param-Z substitution
//! box (RFC 7836). Key words and block halves are read little-endian, the
//! legacy convention used by CryptoPro key containers.

use gost_types::CryptoError;
use zeroize::Zeroize;

/// GOST 28147 block size in bytes (64 bits).
pub const GOST28147_BLOCK_SIZE: usize = 8;

/// GOST 28147 key size in bytes (256 bits).
pub const GOST28147_KEY_SIZE: usize = 32;

/// id-tc26-gost-28147-param-Z S-box.
const SBOX_PARAM_Z: [[u8; 16]; 8] = [
    [12, 4, 6, 2, 10, 5, 11, 9, 14, 8, 13, 7, 0, 3, 15, 1],
    [6, 8, 2, 3, 9, 10, 5, 12, 1, 14, 4, 7, 11, 13, 0, 15],
    [11, 3, 5, 8, 2, 15, 10, 13, 14, 1, 7, 4, 12, 9, 6, 0],
    [12, 8, 2, 1, 13, 4, 15, 6, 7, 0, 10, 5, 3, 14, 9, 11],
    [7, 15, 5, 10, 8, 1, 6, 13, 0, 9, 3, 14, 11, 4, 2, 12],
    [5, 13, 15, 6, 9, 2, 12, 10, 11, 7, 8, 1, 4, 3, 14, 0],
    [8, 14, 2, 5, 6, 9, 1, 12, 15, 4, 11, 0, 13, 10, 3, 7],
    [1, 7, 14, 13, 0, 5, 8, 3, 4, 15, 10, 6, 9, 12, 11, 2],
];

/// Subkey order for the 32 encryption rounds: three ascending passes, one
/// descending. Decryption is the mirror image.
const ENC_SCHEDULE: [usize; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7, 0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0,
];
const DEC_SCHEDULE: [usize; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0, 7, 6, 5, 4, 3, 2, 1, 0, 7, 6, 5, 4, 3, 2, 1, 0,
];

/// A GOST 28147 key with precomputed 32-bit subkeys.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct Gost28147Key {
    subkeys: [u32; 8],
}

impl Gost28147Key {
    /// Create a key from 32 raw bytes.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != GOST28147_KEY_SIZE {
            return Err(CryptoError::InvalidKeyLength {
                expected: GOST28147_KEY_SIZE,
                got: key.len(),
            });
        }
        let mut subkeys = [0u32; 8];
        for (i, subkey) in subkeys.iter_mut().enumerate() {
            *subkey = u32::from_le_bytes(key[i * 4..i * 4 + 4].try_into().unwrap());
        }
        Ok(Self { subkeys })
    }

    /// Round function: modular add, S-box substitution, rotate left 11.
    fn round(&self, x: u32, k: u32) -> u32 {
        let t = x.wrapping_add(k);
        let mut y: u32 = 0;
        for (j, row) in SBOX_PARAM_Z.iter().enumerate() {
            let nibble = ((t >> (4 * j)) & 0x0F) as usize;
            y |= (row[nibble] as u32) << (4 * j);
        }
        y.rotate_left(11)
    }

    fn crypt_block(&self, block: &mut [u8], schedule: &[usize; 32]) {
        let mut n1 = u32::from_le_bytes(block[0..4].try_into().unwrap());
        let mut n2 = u32::from_le_bytes(block[4..8].try_into().unwrap());

        for &idx in schedule {
            let t = n2 ^ self.round(n1, self.subkeys[idx]);
            n2 = n1;
            n1 = t;
        }

        // The final round of the standard has no swap; undo it.
        block[0..4].copy_from_slice(&n2.to_le_bytes());
        block[4..8].copy_from_slice(&n1.to_le_bytes());
    }

    /// Encrypt a single 8-byte block in place.
    pub fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != GOST28147_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockLength);
        }
        self.crypt_block(block, &ENC_SCHEDULE);
        Ok(())
    }

    /// Decrypt a single 8-byte block in place.
    pub fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
        if block.len() != GOST28147_BLOCK_SIZE {
            return Err(CryptoError::InvalidBlockLength);
        }
        self.crypt_block(block, &DEC_SCHEDULE);
        Ok(())
    }
}
