//! Fixed-width field types of the block wire format
//!
//! The codec keeps every field as the raw bytes found on the wire. Numeric
//! fields of the trailer and of transaction entries stay little-endian byte
//! arrays; [`U64Bytes::value`] and [`U32Bytes::value`] interpret them on
//! demand. All types serialize to lowercase hex strings.

use crate::constants::{HASH_LEN, TX_ADDR_LEN, TX_AMOUNT_LEN, TX_SIG_LEN};
use crate::error::DecodeError;
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! fixed_bytes {
    ($(#[$meta:meta])* $name:ident, $len:expr, $field:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash)]
        pub struct $name([u8; $len]);

        impl $name {
            /// Width of the field in bytes
            pub const LEN: usize = $len;

            /// Wrap raw bytes
            pub const fn from_bytes(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }

            /// All-zero value
            pub const fn zero() -> Self {
                Self([0u8; $len])
            }

            /// Copy from a slice of exactly `LEN` bytes
            pub fn from_slice(slice: &[u8]) -> Result<Self, DecodeError> {
                let bytes = <[u8; $len]>::try_from(slice).map_err(|_| {
                    DecodeError::InvalidFieldLength {
                        field: $field,
                        expected: $len,
                        actual: slice.len(),
                    }
                })?;
                Ok(Self(bytes))
            }

            /// Get the raw bytes
            pub fn as_bytes(&self) -> &[u8; $len] {
                &self.0
            }

            /// Get a mutable reference to the raw bytes
            pub fn as_bytes_mut(&mut self) -> &mut [u8; $len] {
                &mut self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.iter().all(|b| *b == 0)
            }

            /// Convert to hexadecimal string
            pub fn to_hex(&self) -> String {
                hex::encode(self.0)
            }

            /// Create from hexadecimal string
            pub fn from_hex(s: &str) -> Result<Self, DecodeError> {
                let bytes = hex::decode(s).map_err(|e| DecodeError::InvalidHex {
                    field: $field,
                    message: e.to_string(),
                })?;
                Self::from_slice(&bytes)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<[u8; $len]> for $name {
            fn from(bytes: [u8; $len]) -> Self {
                Self(bytes)
            }
        }

        impl AsRef<[u8]> for $name {
            fn as_ref(&self) -> &[u8] {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.to_hex())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if $len > HASH_LEN {
                    write!(
                        f,
                        "{}({}..{}, {} bytes)",
                        stringify!($name),
                        hex::encode(&self.0[..4]),
                        hex::encode(&self.0[$len - 4..]),
                        $len
                    )
                } else {
                    write!(f, "{}({})", stringify!($name), self.to_hex())
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_hex())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let s = String::deserialize(deserializer)?;
                Self::from_hex(&s).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_bytes!(
    /// Opaque address blob (miner, source, destination or change address)
    Address,
    TX_ADDR_LEN,
    "address"
);

fixed_bytes!(
    /// Opaque transaction signature
    Signature,
    TX_SIG_LEN,
    "signature"
);

fixed_bytes!(
    /// 32-byte hash (block hash, merkle root, transaction id, nonce)
    Hash,
    HASH_LEN,
    "hash"
);

fixed_bytes!(
    /// 8-byte little-endian integer kept as raw bytes
    U64Bytes,
    TX_AMOUNT_LEN,
    "u64 field"
);

fixed_bytes!(
    /// 4-byte little-endian integer kept as raw bytes
    U32Bytes,
    4,
    "u32 field"
);

impl Copy for Hash {}
impl Copy for U64Bytes {}
impl Copy for U32Bytes {}

impl U64Bytes {
    /// Interpret the bytes as a little-endian integer
    pub fn value(&self) -> u64 {
        LittleEndian::read_u64(&self.0)
    }

    /// Store an integer as little-endian bytes
    pub fn from_value(value: u64) -> Self {
        let mut bytes = [0u8; TX_AMOUNT_LEN];
        LittleEndian::write_u64(&mut bytes, value);
        Self(bytes)
    }
}

impl U32Bytes {
    /// Interpret the bytes as a little-endian integer
    pub fn value(&self) -> u32 {
        LittleEndian::read_u32(&self.0)
    }

    /// Store an integer as little-endian bytes
    pub fn from_value(value: u32) -> Self {
        let mut bytes = [0u8; 4];
        LittleEndian::write_u32(&mut bytes, value);
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_numeric_accessors_little_endian() {
        let amount = U64Bytes::from_bytes([0xEF, 0xCD, 0xAB, 0x89, 0x67, 0x45, 0x23, 0x01]);
        assert_eq!(amount.value(), 0x0123456789ABCDEF);
        assert_eq!(U64Bytes::from_value(0x0123456789ABCDEF), amount);

        let count = U32Bytes::from_value(3);
        assert_eq!(count.as_bytes(), &[3, 0, 0, 0]);
        assert_eq!(count.value(), 3);
    }

    #[test]
    fn test_from_slice_length_check() {
        assert!(Hash::from_slice(&[0u8; 32]).is_ok());
        assert_matches!(
            Hash::from_slice(&[0u8; 31]),
            Err(DecodeError::InvalidFieldLength {
                field: "hash",
                expected: 32,
                actual: 31
            })
        );
        assert_matches!(
            Address::from_slice(&[0u8; 2209]),
            Err(DecodeError::InvalidFieldLength { expected: 2208, .. })
        );
    }

    #[test]
    fn test_hex_conversion() {
        let hash = Hash::from_bytes([0xAB; 32]);
        let hex = hash.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(Hash::from_hex(&hex).unwrap(), hash);
        assert_matches!(Hash::from_hex("zz"), Err(DecodeError::InvalidHex { .. }));
    }

    #[test]
    fn test_zero_and_default() {
        assert!(Address::default().is_zero());
        assert!(Signature::zero().is_zero());

        let mut addr = Address::zero();
        addr.as_bytes_mut()[0] = 1;
        assert!(!addr.is_zero());
    }

    #[test]
    fn test_debug_shortens_large_fields() {
        let mut bytes = [0u8; TX_ADDR_LEN];
        bytes[0] = 0xde;
        bytes[TX_ADDR_LEN - 1] = 0xef;
        let debug = format!("{:?}", Address::from_bytes(bytes));
        assert_eq!(debug, "Address(de000000..000000ef, 2208 bytes)");

        let debug = format!("{:?}", U32Bytes::from_value(1));
        assert_eq!(debug, "U32Bytes(01000000)");
    }

    #[test]
    fn test_serde_as_hex_string() {
        let value = U64Bytes::from_value(258);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "\"0201000000000000\"");

        let parsed: U64Bytes = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
        assert!(serde_json::from_str::<U64Bytes>("\"0201\"").is_err());
    }
}
