#![forbid(unsafe_code)]
#![doc = "Common types, error codes, and curve identifiers for esia-gost."]

pub mod algorithm;
pub mod error;

pub use algorithm::*;
pub use error::*;
