//! Big number type and byte-level codec.

use zeroize::Zeroize;

/// Limb type for big number representation (64-bit on 64-bit platforms).
pub type Limb = u64;
/// Double-width type for multiplication intermediates.
pub type DoubleLimb = u128;

/// Bits per limb.
pub const LIMB_BITS: usize = 64;

/// A heap-allocated big number that is zeroized on drop.
///
/// Internally represented as a little-endian array of `u64` limbs with a
/// separate sign flag (sign-magnitude; the sign only appears transiently
/// inside the extended Euclid).
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct BigNum {
    /// Little-endian limbs (limbs[0] is the least significant).
    limbs: Vec<Limb>,
    /// True if the number is negative.
    negative: bool,
}

impl BigNum {
    /// Create a zero-valued BigNum.
    pub fn zero() -> Self {
        Self {
            limbs: vec![0],
            negative: false,
        }
    }

    /// Create a BigNum from a `u64` value.
    pub fn from_u64(value: u64) -> Self {
        Self {
            limbs: vec![value],
            negative: false,
        }
    }

    /// Create a BigNum from big-endian bytes. Leading zeros are tolerated.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::zero();
        }

        // rchunks walks from the least significant end, so each chunk maps
        // straight onto a limb after left-padding to 8 bytes.
        let limbs: Vec<Limb> = bytes
            .rchunks(8)
            .map(|chunk| {
                let mut limb = [0u8; 8];
                limb[8 - chunk.len()..].copy_from_slice(chunk);
                u64::from_be_bytes(limb)
            })
            .collect();

        let mut bn = Self {
            limbs,
            negative: false,
        };
        bn.normalize();
        bn
    }

    /// Export to minimal big-endian bytes (a single zero byte for zero).
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self
            .limbs
            .iter()
            .rev()
            .flat_map(|limb| limb.to_be_bytes())
            .collect();
        let leading = bytes.iter().take_while(|&&b| b == 0).count();
        if leading == bytes.len() {
            return vec![0];
        }
        bytes.drain(..leading);
        bytes
    }

    /// Export to exactly `width` big-endian bytes, left-padded with zeros.
    ///
    /// Panics if the value does not fit; callers size `width` from the
    /// curve, which bounds every value handled here.
    pub fn to_bytes_be_padded(&self, width: usize) -> Vec<u8> {
        let raw = self.to_bytes_be();
        let raw = if raw == [0] { Vec::new() } else { raw };
        assert!(raw.len() <= width, "value wider than requested padding");
        let mut out = vec![0u8; width];
        out[width - raw.len()..].copy_from_slice(&raw);
        out
    }

    /// Return the number of significant bits.
    pub fn bit_len(&self) -> usize {
        for i in (0..self.limbs.len()).rev() {
            if self.limbs[i] != 0 {
                return i * LIMB_BITS + (LIMB_BITS - self.limbs[i].leading_zeros() as usize);
            }
        }
        0
    }

    /// Return bit `i` (0 = least significant) as 0 or 1.
    pub fn get_bit(&self, i: usize) -> u8 {
        let limb_idx = i / LIMB_BITS;
        if limb_idx >= self.limbs.len() {
            return 0;
        }
        ((self.limbs[limb_idx] >> (i % LIMB_BITS)) & 1) as u8
    }

    /// Return true if this number is zero.
    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    /// Return true if this number is one.
    pub fn is_one(&self) -> bool {
        !self.negative && self.limbs[0] == 1 && self.limbs[1..].iter().all(|&l| l == 0)
    }

    /// Return true if this number is negative.
    pub fn is_negative(&self) -> bool {
        self.negative && !self.is_zero()
    }

    /// Return the limbs as a slice.
    pub(crate) fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    /// Access mutable limbs.
    pub(crate) fn limbs_mut(&mut self) -> &mut Vec<Limb> {
        &mut self.limbs
    }

    /// Set the sign.
    pub(crate) fn set_negative(&mut self, neg: bool) {
        self.negative = neg;
    }

    /// Remove leading zero limbs.
    pub(crate) fn normalize(&mut self) {
        while self.limbs.len() > 1 && *self.limbs.last().unwrap() == 0 {
            self.limbs.pop();
        }
        if self.is_zero() {
            self.negative = false;
        }
    }
}

impl std::fmt::Debug for BigNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        let hex = self
            .to_bytes_be()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<String>();
        write!(f, "BigNum({sign}0x{hex})")
    }
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        self.is_negative() == other.is_negative() && self.limbs_eq(other)
    }
}

impl Eq for BigNum {}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;
        match (self.is_negative(), other.is_negative()) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => self.cmp_abs(other),
            (true, true) => other.cmp_abs(self),
        }
    }
}

impl BigNum {
    fn limbs_eq(&self, other: &Self) -> bool {
        let max = self.limbs.len().max(other.limbs.len());
        (0..max).all(|i| {
            self.limbs.get(i).copied().unwrap_or(0) == other.limbs.get(i).copied().unwrap_or(0)
        })
    }
}
