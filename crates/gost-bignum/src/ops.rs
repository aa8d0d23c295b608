//! Arithmetic and modular operations for BigNum.

use crate::bignum::{BigNum, DoubleLimb, Limb, LIMB_BITS};
use gost_types::CryptoError;

impl BigNum {
    /// Add two BigNums: self + other.
    pub fn add(&self, other: &BigNum) -> BigNum {
        if self.is_negative() == other.is_negative() {
            let mut result = add_unsigned(self.limbs(), other.limbs());
            result.set_negative(self.is_negative());
            result.normalize();
            result
        } else if self.is_negative() {
            // (-a) + b = b - a
            sub_unsigned(other.limbs(), self.limbs())
        } else {
            // a + (-b) = a - b
            sub_unsigned(self.limbs(), other.limbs())
        }
    }

    /// Subtract: self - other.
    pub fn sub(&self, other: &BigNum) -> BigNum {
        if self.is_negative() != other.is_negative() {
            let mut result = add_unsigned(self.limbs(), other.limbs());
            result.set_negative(self.is_negative());
            result.normalize();
            result
        } else if self.is_negative() {
            // (-a) - (-b) = b - a
            sub_unsigned(other.limbs(), self.limbs())
        } else {
            sub_unsigned(self.limbs(), other.limbs())
        }
    }

    /// Multiply: self * other.
    pub fn mul(&self, other: &BigNum) -> BigNum {
        let mut result = mul_unsigned(self.limbs(), other.limbs());
        result.set_negative(self.is_negative() != other.is_negative());
        result.normalize();
        result
    }

    /// Division with remainder: returns (quotient, remainder).
    ///
    /// Only defined for non-negative operands; the transient negative values
    /// inside mod_inv never reach a division.
    pub fn div_rem(&self, divisor: &BigNum) -> Result<(BigNum, BigNum), CryptoError> {
        if divisor.is_zero() {
            return Err(CryptoError::BnDivisionByZero);
        }
        let (q, r) = div_rem_unsigned(self.limbs(), divisor.limbs());
        Ok((q, r))
    }

    /// Modular reduction: self mod modulus, result in [0, modulus).
    pub fn mod_reduce(&self, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        let (_, r) = self.div_rem(modulus)?;
        if self.is_negative() && !r.is_zero() {
            return Ok(modulus.sub(&r));
        }
        Ok(r)
    }

    /// Modular addition: (self + other) mod modulus.
    pub fn mod_add(&self, other: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        self.add(other).mod_reduce(modulus)
    }

    /// Modular subtraction: (self - other) mod modulus.
    pub fn mod_sub(&self, other: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        self.sub(other).mod_reduce(modulus)
    }

    /// Modular multiplication: (self * other) mod modulus.
    pub fn mod_mul(&self, other: &BigNum, modulus: &BigNum) -> Result<BigNum, CryptoError> {
        self.mul(other).mod_reduce(modulus)
    }

    /// Compare absolute values.
    pub fn cmp_abs(&self, other: &BigNum) -> std::cmp::Ordering {
        cmp_limbs(self.limbs(), other.limbs())
    }
}

/// Compare two limb arrays as unsigned magnitudes.
fn cmp_limbs(a: &[Limb], b: &[Limb]) -> std::cmp::Ordering {
    for i in (0..a.len().max(b.len())).rev() {
        let av = a.get(i).copied().unwrap_or(0);
        let bv = b.get(i).copied().unwrap_or(0);
        if av != bv {
            return av.cmp(&bv);
        }
    }
    std::cmp::Ordering::Equal
}

/// Add two unsigned limb arrays.
fn add_unsigned(a: &[Limb], b: &[Limb]) -> BigNum {
    let longest = a.len().max(b.len());
    let mut limbs = Vec::with_capacity(longest + 1);
    let mut carry: DoubleLimb = 0;

    for i in 0..longest {
        let sum = a.get(i).copied().unwrap_or(0) as DoubleLimb
            + b.get(i).copied().unwrap_or(0) as DoubleLimb
            + carry;
        limbs.push(sum as Limb);
        carry = sum >> LIMB_BITS;
    }
    limbs.push(carry as Limb);

    from_limbs(limbs, false)
}

/// Subtract unsigned magnitudes: |a| - |b|, with the sign of the result.
fn sub_unsigned(a: &[Limb], b: &[Limb]) -> BigNum {
    let (larger, smaller, negative) = match cmp_limbs(a, b) {
        std::cmp::Ordering::Less => (b, a, true),
        std::cmp::Ordering::Equal => return BigNum::zero(),
        std::cmp::Ordering::Greater => (a, b, false),
    };

    let mut limbs = Vec::with_capacity(larger.len());
    let mut borrow: DoubleLimb = 0;

    for (i, &lv) in larger.iter().enumerate() {
        let subtrahend = smaller.get(i).copied().unwrap_or(0) as DoubleLimb + borrow;
        let lv = lv as DoubleLimb;
        if lv >= subtrahend {
            limbs.push((lv - subtrahend) as Limb);
            borrow = 0;
        } else {
            limbs.push((lv + (1 << LIMB_BITS) - subtrahend) as Limb);
            borrow = 1;
        }
    }

    from_limbs(limbs, negative)
}

/// Multiply two unsigned limb arrays (schoolbook).
fn mul_unsigned(a: &[Limb], b: &[Limb]) -> BigNum {
    if a.iter().all(|&l| l == 0) || b.iter().all(|&l| l == 0) {
        return BigNum::zero();
    }

    let mut limbs = vec![0u64; a.len() + b.len()];

    for i in 0..a.len() {
        let mut carry: u64 = 0;
        for j in 0..b.len() {
            let prod = a[i] as DoubleLimb * b[j] as DoubleLimb
                + limbs[i + j] as DoubleLimb
                + carry as DoubleLimb;
            limbs[i + j] = prod as Limb;
            carry = (prod >> LIMB_BITS) as u64;
        }
        limbs[i + b.len()] = carry;
    }

    from_limbs(limbs, false)
}

/// Binary long division on unsigned magnitudes.
fn div_rem_unsigned(a: &[Limb], b: &[Limb]) -> (BigNum, BigNum) {
    let a_bn = from_limbs(a.to_vec(), false);
    let b_bn = from_limbs(b.to_vec(), false);

    if a_bn.cmp_abs(&b_bn) == std::cmp::Ordering::Less {
        return (BigNum::zero(), a_bn);
    }

    let bits = a_bn.bit_len();
    let mut quotient = BigNum::zero();
    *quotient.limbs_mut() = vec![0u64; bits.div_ceil(LIMB_BITS)];
    let mut remainder = BigNum::zero();

    for i in (0..bits).rev() {
        // remainder = (remainder << 1) | bit i of a
        let mut carry = 0u64;
        for limb in remainder.limbs_mut().iter_mut() {
            let new_carry = *limb >> 63;
            *limb = (*limb << 1) | carry;
            carry = new_carry;
        }
        if carry != 0 {
            remainder.limbs_mut().push(carry);
        }
        remainder.limbs_mut()[0] |= a_bn.get_bit(i) as u64;

        if remainder.cmp_abs(&b_bn) != std::cmp::Ordering::Less {
            remainder = sub_unsigned(remainder.limbs(), b_bn.limbs());
            quotient.limbs_mut()[i / LIMB_BITS] |= 1u64 << (i % LIMB_BITS);
        }
    }

    quotient.normalize();
    remainder.normalize();
    (quotient, remainder)
}

fn from_limbs(limbs: Vec<Limb>, negative: bool) -> BigNum {
    let mut bn = BigNum::zero();
    *bn.limbs_mut() = limbs;
    bn.set_negative(negative);
    bn.normalize();
    bn
}
