//! ASN.1 identifier octet parsing and encoding.

use super::{Tag, TagClass};
use gost_types::CryptoError;

impl Tag {
    /// Parse a tag from the first bytes of `input`.
    /// Returns the tag and the number of bytes consumed.
    pub fn from_bytes(input: &[u8]) -> Result<(Self, usize), CryptoError> {
        if input.is_empty() {
            return Err(CryptoError::NullInput);
        }

        let first = input[0];
        let class = match (first >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            _ => TagClass::Private,
        };
        let constructed = (first & 0x20) != 0;

        let low_bits = first & 0x1F;
        if low_bits < 0x1F {
            return Ok((
                Tag {
                    class,
                    constructed,
                    number: low_bits as u32,
                },
                1,
            ));
        }

        // High tag numbers (>= 31) use base-128 continuation octets.
        let mut number: u32 = 0;
        let mut i = 1;
        loop {
            if i >= input.len() {
                return Err(CryptoError::DecodeAsn1Fail);
            }
            let byte = input[i];
            number = number.checked_shl(7).ok_or(CryptoError::DecodeAsn1Fail)? | (byte & 0x7F) as u32;
            i += 1;
            if (byte & 0x80) == 0 {
                break;
            }
        }
        Ok((
            Tag {
                class,
                constructed,
                number,
            },
            i,
        ))
    }

    /// Encode this tag to identifier octets.
    pub fn to_bytes(&self) -> Vec<u8> {
        let class_bits = match self.class {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xC0,
        };
        let constructed_bit = if self.constructed { 0x20 } else { 0x00 };

        if self.number < 0x1F {
            return vec![class_bits | constructed_bit | (self.number as u8)];
        }

        let mut result = vec![class_bits | constructed_bit | 0x1F];
        let mut continuation = Vec::new();
        let mut num = self.number;
        while num > 0 {
            continuation.push((num & 0x7F) as u8);
            num >>= 7;
        }
        continuation.reverse();
        let last = continuation.len() - 1;
        for (i, b) in continuation.iter().enumerate() {
            result.push(if i < last { b | 0x80 } else { *b });
        }
        result
    }
}
