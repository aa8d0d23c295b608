//! Modular inverse via the extended Euclidean algorithm.

use crate::bignum::BigNum;
use gost_types::CryptoError;

impl BigNum {
    /// Compute the modular inverse: self^(-1) mod modulus.
    ///
    /// Returns `Err(BnNoInverse)` if gcd(self, modulus) != 1.
    pub fn mod_inv(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        if modulus.is_zero() || modulus.is_one() {
            return Err(CryptoError::InvalidArg);
        }

        let mut old_r = self.mod_reduce(modulus)?;
        if old_r.is_zero() {
            return Err(CryptoError::BnNoInverse);
        }
        let mut r = modulus.clone();

        // Track old_s, s with old_r = old_s * self (mod modulus).
        let mut old_s = BigNum::from_u64(1);
        let mut s = BigNum::zero();

        while !r.is_zero() {
            let (quotient, remainder) = old_r.div_rem(&r)?;
            old_r = r;
            r = remainder;

            let qs = quotient.mul(&s);
            let new_s = old_s.sub(&qs);
            old_s = s;
            s = new_s;
        }

        if !old_r.is_one() {
            return Err(CryptoError::BnNoInverse);
        }

        old_s.mod_reduce(modulus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mod_inv_basic() {
        // 3 * 5 = 15 ≡ 1 (mod 7)
        let a = BigNum::from_u64(3);
        let m = BigNum::from_u64(7);
        assert_eq!(a.mod_inv(&m).unwrap(), BigNum::from_u64(5));
    }

    #[test]
    fn test_mod_inv_verify() {
        let a = BigNum::from_u64(17);
        let m = BigNum::from_u64(97);
        let inv = a.mod_inv(&m).unwrap();
        let product = a.mul(&inv).mod_reduce(&m).unwrap();
        assert!(product.is_one());
    }

    #[test]
    fn test_mod_inv_no_inverse() {
        // gcd(6, 9) = 3 ≠ 1
        let a = BigNum::from_u64(6);
        let m = BigNum::from_u64(9);
        assert!(matches!(
            a.mod_inv(&m),
            Err(CryptoError::BnNoInverse)
        ));
    }

    #[test]
    fn test_mod_inv_of_zero() {
        let z = BigNum::zero();
        let m = BigNum::from_u64(97);
        assert!(z.mod_inv(&m).is_err());
    }

    #[test]
    fn test_mod_inv_wide() {
        let bytes: Vec<u8> = (1..=32).collect();
        let a = BigNum::from_bytes_be(&bytes);
        // 2^255 - 19 is prime, so every nonzero residue is invertible
        let mut m_bytes = vec![0x7f];
        m_bytes.extend(vec![0xff; 30]);
        m_bytes.push(0xed);
        let m = BigNum::from_bytes_be(&m_bytes);
        let inv = a.mod_inv(&m).unwrap();
        assert!(a.mod_mul(&inv, &m).unwrap().is_one());
    }
}
