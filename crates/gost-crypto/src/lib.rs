#![forbid(unsafe_code)]
#![doc = "GOST cryptographic primitives: Streebog, GOST 28147-89, GOST R 34.10-2012."]

// Hash algorithms
pub mod streebog;

// Symmetric cipher and modes of operation
pub mod magma;
pub mod modes;

// Signatures
pub mod gost3410;
