//! Jacobian coordinate point arithmetic for the GOST curves.
//!
//! Points are held as (X, Y, Z) representing affine (X/Z², Y/Z³); the point
//! at infinity has Z = 0. All arithmetic is modulo the curve prime p.

use gost_bignum::BigNum;
use gost_types::CryptoError;

use super::curves::CurveParams;

/// A point in Jacobian projective coordinates.
#[derive(Clone)]
pub(crate) struct JacobianPoint {
    pub x: BigNum,
    pub y: BigNum,
    pub z: BigNum,
}

impl JacobianPoint {
    /// The point at infinity (identity element).
    pub fn infinity() -> Self {
        JacobianPoint {
            x: BigNum::from_u64(1),
            y: BigNum::from_u64(1),
            z: BigNum::zero(),
        }
    }

    /// Create a Jacobian point from affine coordinates (Z = 1).
    pub fn from_affine(x: &BigNum, y: &BigNum) -> Self {
        JacobianPoint {
            x: x.clone(),
            y: y.clone(),
            z: BigNum::from_u64(1),
        }
    }

    /// Check if this point is the point at infinity.
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    /// Convert to affine coordinates: (X/Z², Y/Z³).
    /// Returns None for the point at infinity.
    pub fn to_affine(&self, p: &BigNum) -> Result<Option<(BigNum, BigNum)>, CryptoError> {
        if self.is_infinity() {
            return Ok(None);
        }

        let z_inv = self.z.mod_inv(p)?;
        let z_inv2 = z_inv.mod_mul(&z_inv, p)?;
        let z_inv3 = z_inv2.mod_mul(&z_inv, p)?;

        Ok(Some((
            self.x.mod_mul(&z_inv2, p)?,
            self.y.mod_mul(&z_inv3, p)?,
        )))
    }

    /// Point addition: self + other.
    pub fn add(&self, other: &JacobianPoint, c: &CurveParams) -> Result<JacobianPoint, CryptoError> {
        let p = &c.p;

        if self.is_infinity() {
            return Ok(other.clone());
        }
        if other.is_infinity() {
            return Ok(self.clone());
        }

        // U1 = X1·Z2², U2 = X2·Z1², S1 = Y1·Z2³, S2 = Y2·Z1³
        let z1_sq = self.z.mod_mul(&self.z, p)?;
        let z2_sq = other.z.mod_mul(&other.z, p)?;
        let u1 = self.x.mod_mul(&z2_sq, p)?;
        let u2 = other.x.mod_mul(&z1_sq, p)?;
        let s1 = self.y.mod_mul(&z2_sq.mod_mul(&other.z, p)?, p)?;
        let s2 = other.y.mod_mul(&z1_sq.mod_mul(&self.z, p)?, p)?;

        let h = u2.mod_sub(&u1, p)?;
        let r = s2.mod_sub(&s1, p)?;

        if h.is_zero() {
            // Same x: either a doubling or P + (-P)
            if r.is_zero() {
                return self.double(c);
            }
            return Ok(JacobianPoint::infinity());
        }

        let h_sq = h.mod_mul(&h, p)?;
        let h_cu = h_sq.mod_mul(&h, p)?;
        let u1_h_sq = u1.mod_mul(&h_sq, p)?;

        // X3 = R² - H³ - 2·U1·H²
        let x3 = r
            .mod_mul(&r, p)?
            .mod_sub(&h_cu, p)?
            .mod_sub(&u1_h_sq, p)?
            .mod_sub(&u1_h_sq, p)?;

        // Y3 = R·(U1·H² - X3) - S1·H³
        let y3 = r
            .mod_mul(&u1_h_sq.mod_sub(&x3, p)?, p)?
            .mod_sub(&s1.mod_mul(&h_cu, p)?, p)?;

        // Z3 = H·Z1·Z2
        let z3 = h.mod_mul(&self.z, p)?.mod_mul(&other.z, p)?;

        Ok(JacobianPoint { x: x3, y: y3, z: z3 })
    }

    /// Point doubling: 2·self.
    ///
    /// The CryptoPro curves all have a = p-3, which admits the
    /// `M = 3·(X+Z²)·(X-Z²)` shortcut; TC26 paramSetB takes the generic
    /// `M = 3·X² + a·Z⁴` path.
    pub fn double(&self, c: &CurveParams) -> Result<JacobianPoint, CryptoError> {
        let p = &c.p;

        if self.is_infinity() || self.y.is_zero() {
            return Ok(JacobianPoint::infinity());
        }

        let two = BigNum::from_u64(2);
        let three = BigNum::from_u64(3);

        // S = 4·X·Y²
        let y_sq = self.y.mod_mul(&self.y, p)?;
        let s = self
            .x
            .mod_mul(&y_sq, p)?
            .mod_mul(&BigNum::from_u64(4), p)?;

        let m = if c.a_is_minus_3 {
            let z_sq = self.z.mod_mul(&self.z, p)?;
            self.x
                .mod_add(&z_sq, p)?
                .mod_mul(&self.x.mod_sub(&z_sq, p)?, p)?
                .mod_mul(&three, p)?
        } else {
            let z_sq = self.z.mod_mul(&self.z, p)?;
            let a_z4 = c.a.mod_mul(&z_sq.mod_mul(&z_sq, p)?, p)?;
            self.x
                .mod_mul(&self.x, p)?
                .mod_mul(&three, p)?
                .mod_add(&a_z4, p)?
        };

        // X3 = M² - 2·S
        let x3 = m.mod_mul(&m, p)?.mod_sub(&s.mod_mul(&two, p)?, p)?;

        // Y3 = M·(S - X3) - 8·Y⁴
        let eight_y4 = y_sq
            .mod_mul(&y_sq, p)?
            .mod_mul(&BigNum::from_u64(8), p)?;
        let y3 = m.mod_mul(&s.mod_sub(&x3, p)?, p)?.mod_sub(&eight_y4, p)?;

        // Z3 = 2·Y·Z
        let z3 = self.y.mod_mul(&self.z, p)?.mod_mul(&two, p)?;

        Ok(JacobianPoint { x: x3, y: y3, z: z3 })
    }

    /// Scalar multiplication: k·self, double-and-add from the top bit.
    pub fn mul(&self, k: &BigNum, c: &CurveParams) -> Result<JacobianPoint, CryptoError> {
        if k.is_zero() || self.is_infinity() {
            return Ok(JacobianPoint::infinity());
        }

        let mut acc = JacobianPoint::infinity();
        for i in (0..k.bit_len()).rev() {
            acc = acc.double(c)?;
            if k.get_bit(i) != 0 {
                acc = acc.add(self, c)?;
            }
        }
        Ok(acc)
    }

    /// Shamir's trick: k1·self + k2·other in one pass.
    pub fn mul_add(
        &self,
        k1: &BigNum,
        other: &JacobianPoint,
        k2: &BigNum,
        c: &CurveParams,
    ) -> Result<JacobianPoint, CryptoError> {
        if k1.is_zero() {
            return other.mul(k2, c);
        }
        if k2.is_zero() {
            return self.mul(k1, c);
        }

        let both = self.add(other, c)?;
        let mut acc = JacobianPoint::infinity();

        for i in (0..k1.bit_len().max(k2.bit_len())).rev() {
            acc = acc.double(c)?;
            acc = match (k1.get_bit(i), k2.get_bit(i)) {
                (1, 1) => acc.add(&both, c)?,
                (1, 0) => acc.add(self, c)?,
                (0, 1) => acc.add(other, c)?,
                _ => acc,
            };
        }
        Ok(acc)
    }
}
