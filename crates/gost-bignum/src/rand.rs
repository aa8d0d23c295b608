//! Random big number generation using OS randomness.

use crate::bignum::BigNum;
use gost_types::CryptoError;

impl BigNum {
    /// Generate a random BigNum uniformly in [1, upper).
    ///
    /// Uses rejection sampling to ensure uniform distribution.
    pub fn random_range(upper: &BigNum) -> Result<BigNum, CryptoError> {
        if upper.is_zero() || upper.is_one() {
            return Err(CryptoError::InvalidArg);
        }

        let bits = upper.bit_len();

        loop {
            let num_bytes = bits.div_ceil(8);
            let mut buf = vec![0u8; num_bytes];
            getrandom::getrandom(&mut buf).map_err(|_| CryptoError::BnRandGenFail)?;

            // Mask excess bits in the most significant byte
            let excess = num_bytes * 8 - bits;
            if excess > 0 {
                buf[0] &= 0xFF >> excess;
            }

            let candidate = BigNum::from_bytes_be(&buf);

            if !candidate.is_zero() && candidate < *upper {
                return Ok(candidate);
            }
        }
    }
}
