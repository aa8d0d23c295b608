//! GOST R 34.11-2012 (Streebog) hash functions.
//!
//! Both the 256-bit and 512-bit variants share one compression core; they
//! differ only in the initialisation vector and the output width. Digest
//! bytes follow the convention of the OpenSSL GOST engine, which is what
//! CryptoPro containers and ESIA verifiers expect.

mod consts;

use consts::{A, C, PI, TAU};
use gost_types::CryptoError;

/// Streebog-256 output size in bytes.
pub const STREEBOG256_OUTPUT_SIZE: usize = 32;

/// Streebog-512 output size in bytes.
pub const STREEBOG512_OUTPUT_SIZE: usize = 64;

/// Streebog block size in bytes.
pub const STREEBOG_BLOCK_SIZE: usize = 64;

/// 512-bit big-endian addition: a += b.
fn add_512(a: &mut [u8; 64], b: &[u8; 64]) {
    let mut carry: u16 = 0;
    for i in (0..64).rev() {
        let t = a[i] as u16 + b[i] as u16 + carry;
        a[i] = t as u8;
        carry = t >> 8;
    }
}

/// Substitution π applied byte-wise.
fn transform_s(v: &mut [u8; 64]) {
    for byte in v.iter_mut() {
        *byte = PI[*byte as usize];
    }
}

/// Byte transposition τ.
fn transform_p(v: &mut [u8; 64]) {
    let src = *v;
    for (i, &pos) in TAU.iter().enumerate() {
        v[i] = src[pos];
    }
}

/// Linear transform ℓ applied to each 64-bit word.
fn transform_l(v: &mut [u8; 64]) {
    for chunk in v.chunks_exact_mut(8) {
        let word = u64::from_be_bytes(chunk.try_into().unwrap());
        let mut acc: u64 = 0;
        for bit in 0..64 {
            if (word >> bit) & 1 == 1 {
                acc ^= A[63 - bit];
            }
        }
        chunk.copy_from_slice(&acc.to_be_bytes());
    }
}

fn lps(v: &mut [u8; 64]) {
    transform_s(v);
    transform_p(v);
    transform_l(v);
}

/// Compression function g_N(h, m), updating `h` in place.
fn transform_g(n: &[u8; 64], h: &mut [u8; 64], m: &[u8; 64]) {
    let mut k = [0u8; 64];
    for i in 0..64 {
        k[i] = h[i] ^ n[i];
    }
    lps(&mut k);

    // E(K, m): 12 rounds of LPS with the evolving round key
    let mut state = [0u8; 64];
    for i in 0..64 {
        state[i] = m[i] ^ k[i];
    }
    for c in C.iter() {
        lps(&mut state);
        for i in 0..64 {
            k[i] ^= c[i];
        }
        lps(&mut k);
        for i in 0..64 {
            state[i] ^= k[i];
        }
    }

    for i in 0..64 {
        h[i] ^= state[i] ^ m[i];
    }
}

/// Shared hashing state. Vectors are kept most-significant byte first; an
/// incoming 64-byte block is reversed so that stream byte 0 lands in the
/// least significant position, as the standard prescribes.
#[derive(Clone)]
struct StreebogCore {
    h: [u8; 64],
    n: [u8; 64],
    sigma: [u8; 64],
    buffer: [u8; 64],
    buffer_len: usize,
}

impl StreebogCore {
    fn new(iv: u8) -> Self {
        Self {
            h: [iv; 64],
            n: [0; 64],
            sigma: [0; 64],
            buffer: [0; 64],
            buffer_len: 0,
        }
    }

    fn compress_full(&mut self, chunk: &[u8]) {
        let mut block = [0u8; 64];
        block.copy_from_slice(chunk);
        block.reverse();

        transform_g(&self.n, &mut self.h, &block);

        let mut bits = [0u8; 64];
        bits[62..].copy_from_slice(&512u16.to_be_bytes());
        add_512(&mut self.n, &bits);
        add_512(&mut self.sigma, &block);
    }

    fn update(&mut self, data: &[u8]) {
        let mut offset = 0;

        if self.buffer_len > 0 {
            let need = STREEBOG_BLOCK_SIZE - self.buffer_len;
            if data.len() < need {
                self.buffer[self.buffer_len..self.buffer_len + data.len()].copy_from_slice(data);
                self.buffer_len += data.len();
                return;
            }
            self.buffer[self.buffer_len..].copy_from_slice(&data[..need]);
            let buf = self.buffer;
            self.compress_full(&buf);
            self.buffer_len = 0;
            offset = need;
        }

        while offset + STREEBOG_BLOCK_SIZE <= data.len() {
            let chunk: [u8; 64] = data[offset..offset + STREEBOG_BLOCK_SIZE].try_into().unwrap();
            self.compress_full(&chunk);
            offset += STREEBOG_BLOCK_SIZE;
        }

        let remaining = data.len() - offset;
        if remaining > 0 {
            self.buffer[..remaining].copy_from_slice(&data[offset..]);
            self.buffer_len = remaining;
        }
    }

    /// Final padding block (always emitted, even for block-aligned input),
    /// then the two closing g_0 calls over N and Σ.
    fn finalize(&mut self) -> [u8; 64] {
        let mut block = [0u8; 64];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        block[self.buffer_len] = 1;
        block.reverse();

        transform_g(&self.n, &mut self.h, &block);

        let mut bits = [0u8; 64];
        bits[62..].copy_from_slice(&((self.buffer_len as u16) * 8).to_be_bytes());
        add_512(&mut self.n, &bits);
        add_512(&mut self.sigma, &block);

        let zero = [0u8; 64];
        let n = self.n;
        transform_g(&zero, &mut self.h, &n);
        let sigma = self.sigma;
        transform_g(&zero, &mut self.h, &sigma);

        let mut out = self.h;
        out.reverse();
        out
    }
}

/// Streebog-256 hash context.
#[derive(Clone)]
pub struct Streebog256 {
    core: StreebogCore,
}

impl Streebog256 {
    pub fn new() -> Self {
        Self {
            core: StreebogCore::new(0x01),
        }
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.core.update(data);
        Ok(())
    }

    pub fn finish(&mut self) -> Result<[u8; STREEBOG256_OUTPUT_SIZE], CryptoError> {
        let full = self.core.finalize();
        let mut out = [0u8; STREEBOG256_OUTPUT_SIZE];
        out.copy_from_slice(&full[32..]);
        Ok(out)
    }

    pub fn reset(&mut self) {
        self.core = StreebogCore::new(0x01);
    }

    pub fn digest(data: &[u8]) -> Result<[u8; STREEBOG256_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Default for Streebog256 {
    fn default() -> Self {
        Self::new()
    }
}

/// Streebog-512 hash context.
#[derive(Clone)]
pub struct Streebog512 {
    core: StreebogCore,
}

impl Streebog512 {
    pub fn new() -> Self {
        Self {
            core: StreebogCore::new(0x00),
        }
    }

    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.core.update(data);
        Ok(())
    }

    pub fn finish(&mut self) -> Result<[u8; STREEBOG512_OUTPUT_SIZE], CryptoError> {
        Ok(self.core.finalize())
    }

    pub fn reset(&mut self) {
        self.core = StreebogCore::new(0x00);
    }

    pub fn digest(data: &[u8]) -> Result<[u8; STREEBOG512_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Default for Streebog512 {
    fn default() -> Self {
        Self::new()
    }
}
