#![forbid(unsafe_code)]
#![doc = "Utility layers for esia-gost: byte reversal, ASN.1 DER, OID."]

pub mod asn1;
pub mod bytes;
pub mod oid;
