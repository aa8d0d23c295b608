#![forbid(unsafe_code)]
#![doc = "Big number arithmetic for the GOST signing core."]

mod bignum;
mod gcd;
mod ops;
mod rand;

pub use bignum::BigNum;
