//! GOST R 34.10 256-bit curve parameter definitions.
//!
//! CryptoPro A/B/C and the Xch aliases come from RFC 4357; the TC26 2012
//! sets come from RFC 7836 (paramSetA is defined there as the CryptoPro-A
//! parameters under a new OID, for backward compatibility; paramSetB is an
//! independently generated curve).

use gost_bignum::BigNum;
use gost_types::GostCurveId;

/// Parameters for a short Weierstrass curve: y² = x³ + ax + b (mod p).
#[derive(Clone)]
pub(crate) struct CurveParams {
    /// Prime field modulus.
    pub p: BigNum,
    /// Curve coefficient a.
    pub a: BigNum,
    /// Curve coefficient b.
    pub b: BigNum,
    /// Base point x-coordinate.
    pub gx: BigNum,
    /// Base point y-coordinate.
    pub gy: BigNum,
    /// Order of the subgroup generated by the base point.
    pub q: BigNum,
    /// Field element byte length.
    pub field_size: usize,
    /// Whether a = p - 3 (enables the optimized doubling formula).
    pub a_is_minus_3: bool,
}

/// Helper: parse a hex string into a BigNum.
fn bn(hex: &str) -> BigNum {
    let bytes: Vec<u8> = (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect();
    BigNum::from_bytes_be(&bytes)
}

/// Return curve parameters for the given parameter set.
pub(crate) fn get_curve_params(curve_id: GostCurveId) -> CurveParams {
    match curve_id {
        GostCurveId::CryptoProA | GostCurveId::CryptoProXchA | GostCurveId::Tc26ParamSetA => {
            crypto_pro_a_params()
        }
        GostCurveId::CryptoProB => crypto_pro_b_params(),
        GostCurveId::CryptoProC | GostCurveId::CryptoProXchB => crypto_pro_c_params(),
        GostCurveId::Tc26ParamSetB => tc26_2012_256_b_params(),
    }
}

/// id-GostR3410-2001-CryptoPro-A-ParamSet — RFC 4357 §11.4.
fn crypto_pro_a_params() -> CurveParams {
    CurveParams {
        p: bn("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFD97"),
        a: bn("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFD94"),
        b: bn("A6"),
        gx: bn("01"),
        gy: bn("8D91E471E0989CDA27DF505A453F2B7635294F2DDF23E3B122ACC99C9E9F1E14"),
        q: bn("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF6C611070995AD10045841B09B761B893"),
        field_size: 32,
        a_is_minus_3: true,
    }
}

/// id-GostR3410-2001-CryptoPro-B-ParamSet — RFC 4357 §11.4.
fn crypto_pro_b_params() -> CurveParams {
    CurveParams {
        p: bn("8000000000000000000000000000000000000000000000000000000000000C99"),
        a: bn("8000000000000000000000000000000000000000000000000000000000000C96"),
        b: bn("3E1AF419A269A5F866A7D3C25C3DF80AE979259373FF2B182F49D4CE7E1BBC8B"),
        gx: bn("01"),
        gy: bn("3FA8124359F96680B83D1C3EB2C070E5C545C9858D03ECFB744BF8D717717EFC"),
        q: bn("800000000000000000000000000000015F700CFFF1A624E5E497161BCC8A198F"),
        field_size: 32,
        a_is_minus_3: true,
    }
}

/// id-GostR3410-2001-CryptoPro-C-ParamSet — RFC 4357 §11.4.
fn crypto_pro_c_params() -> CurveParams {
    CurveParams {
        p: bn("9B9F605F5A858107AB1EC85E6B41C8AACF846E86789051D37998F7B9022D759B"),
        a: bn("9B9F605F5A858107AB1EC85E6B41C8AACF846E86789051D37998F7B9022D7598"),
        b: bn("805A"),
        gx: bn("00"),
        gy: bn("41ECE55743711A8C3CBF3783CD08C0EE4D4DC440D4641A8F366E550DFDB3BB67"),
        q: bn("9B9F605F5A858107AB1EC85E6B41C8AA582CA3511EDDFB74F02F3A6598980BB9"),
        field_size: 32,
        a_is_minus_3: true,
    }
}

/// id-tc26-gost-3410-2012-256-paramSetB — RFC 7836. Cofactor 4; the
/// subgroup order below is what scalars are reduced by.
fn tc26_2012_256_b_params() -> CurveParams {
    CurveParams {
        p: bn("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFD97"),
        a: bn("C2173F1513981673AF4892C23035A27CE25E2013BF95AA33B22C656F277E7335"),
        b: bn("295F9BAE7428ED9CCC20E7C359A9D41A22FCCD9108E17BF7BA9337A6F8AE9513"),
        gx: bn("91E38443A5E82C0D880923425712B2BB658B9196932E02C78B2582FE742DAA28"),
        gy: bn("32879423AB1A0375895786C4BB46E9565FDE0B5344766740AF268ADB32322E5C"),
        q: bn("400000000000000000000000000000000FD8CDDFC87B6635C115AF556C360C67"),
        field_size: 32,
        a_is_minus_3: false,
    }
}
