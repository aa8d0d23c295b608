/// GOST R 34.10 256-bit curve parameter set identifiers.
///
/// The Xch sets and the TC26 paramSetA reuse parameters of other entries
/// (XchA = CryptoPro-A, XchB = CryptoPro-C, TC26-A = CryptoPro-A); they are
/// still distinct identifiers because containers reference them by OID.
/// TC26 paramSetB is the one independently generated curve in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GostCurveId {
    CryptoProA,
    CryptoProB,
    CryptoProC,
    CryptoProXchA,
    CryptoProXchB,
    Tc26ParamSetA,
    Tc26ParamSetB,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_ids_distinct() {
        let ids = [
            GostCurveId::CryptoProA,
            GostCurveId::CryptoProB,
            GostCurveId::CryptoProC,
            GostCurveId::CryptoProXchA,
            GostCurveId::CryptoProXchB,
            GostCurveId::Tc26ParamSetA,
            GostCurveId::Tc26ParamSetB,
        ];
        for (i, a) in ids.iter().enumerate() {
            for (j, b) in ids.iter().enumerate() {
                assert_eq!(i == j, a == b);
            }
        }
    }
}
