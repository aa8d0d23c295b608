#![forbid(unsafe_code)]
#![doc = "Key-container extraction and CMS SignedData construction for ESIA."]

pub mod cms;
pub mod container;
pub mod x509;

#[cfg(test)]
pub(crate) mod testutil;
