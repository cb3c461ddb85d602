//! Block trailer codec
//!
//! The trailer is the fixed 160-byte suffix of every block. All ten fields are
//! copied positionally; hashes, counters and difficulty are never checked.

use crate::codec::WireFormat;
use crate::constants::{
    TRAILER_BHASH_OFFSET, TRAILER_BNUM_OFFSET, TRAILER_DIFFICULTY_OFFSET, TRAILER_LEN,
    TRAILER_MFEE_OFFSET, TRAILER_MROOT_OFFSET, TRAILER_NONCE_OFFSET, TRAILER_PHASH_OFFSET,
    TRAILER_STIME_OFFSET, TRAILER_TCOUNT_OFFSET, TRAILER_TIME0_OFFSET,
};
use crate::error::{DecodeError, Region};
use crate::types::{Hash, U32Bytes, U64Bytes};
use serde::{Deserialize, Serialize};

/// Block trailer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Trailer {
    pub previous_hash: Hash,
    pub block_number: U64Bytes,
    pub miner_fee: U64Bytes,
    pub tx_count: U32Bytes,
    pub start_time: U32Bytes,
    pub difficulty: U32Bytes,
    pub merkle_root: Hash,
    pub nonce: Hash,
    pub solve_time: U32Bytes,
    pub block_hash: Hash,
}

impl Trailer {
    pub fn block_number_value(&self) -> u64 {
        self.block_number.value()
    }

    pub fn miner_fee_value(&self) -> u64 {
        self.miner_fee.value()
    }

    /// Transaction count as declared by the trailer
    pub fn tx_count_value(&self) -> u32 {
        self.tx_count.value()
    }

    /// Start time in seconds since the Unix epoch
    pub fn start_time_value(&self) -> u32 {
        self.start_time.value()
    }

    pub fn difficulty_value(&self) -> u32 {
        self.difficulty.value()
    }

    /// Solve time in seconds since the Unix epoch
    pub fn solve_time_value(&self) -> u32 {
        self.solve_time.value()
    }
}

impl WireFormat for Trailer {
    const SIZE: usize = TRAILER_LEN;

    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        if bytes.len() < TRAILER_LEN {
            return Err(DecodeError::truncated(Region::Trailer, TRAILER_LEN, bytes.len()));
        }

        Ok(Self {
            previous_hash: Hash::from_slice(&bytes[TRAILER_PHASH_OFFSET..TRAILER_BNUM_OFFSET])?,
            block_number: U64Bytes::from_slice(&bytes[TRAILER_BNUM_OFFSET..TRAILER_MFEE_OFFSET])?,
            miner_fee: U64Bytes::from_slice(&bytes[TRAILER_MFEE_OFFSET..TRAILER_TCOUNT_OFFSET])?,
            tx_count: U32Bytes::from_slice(&bytes[TRAILER_TCOUNT_OFFSET..TRAILER_TIME0_OFFSET])?,
            start_time: U32Bytes::from_slice(
                &bytes[TRAILER_TIME0_OFFSET..TRAILER_DIFFICULTY_OFFSET],
            )?,
            difficulty: U32Bytes::from_slice(
                &bytes[TRAILER_DIFFICULTY_OFFSET..TRAILER_MROOT_OFFSET],
            )?,
            merkle_root: Hash::from_slice(&bytes[TRAILER_MROOT_OFFSET..TRAILER_NONCE_OFFSET])?,
            nonce: Hash::from_slice(&bytes[TRAILER_NONCE_OFFSET..TRAILER_STIME_OFFSET])?,
            solve_time: U32Bytes::from_slice(&bytes[TRAILER_STIME_OFFSET..TRAILER_BHASH_OFFSET])?,
            block_hash: Hash::from_slice(&bytes[TRAILER_BHASH_OFFSET..TRAILER_LEN])?,
        })
    }

    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(self.previous_hash.as_bytes());
        out.extend_from_slice(self.block_number.as_bytes());
        out.extend_from_slice(self.miner_fee.as_bytes());
        out.extend_from_slice(self.tx_count.as_bytes());
        out.extend_from_slice(self.start_time.as_bytes());
        out.extend_from_slice(self.difficulty.as_bytes());
        out.extend_from_slice(self.merkle_root.as_bytes());
        out.extend_from_slice(self.nonce.as_bytes());
        out.extend_from_slice(self.solve_time.as_bytes());
        out.extend_from_slice(self.block_hash.as_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn counting_bytes() -> Vec<u8> {
        (0..TRAILER_LEN as u8).collect()
    }

    #[test]
    fn test_fields_match_slices() {
        let bytes = counting_bytes();
        let trailer = Trailer::decode(&bytes).unwrap();

        assert_eq!(&trailer.previous_hash.as_bytes()[..], &bytes[0..32]);
        assert_eq!(&trailer.block_number.as_bytes()[..], &bytes[32..40]);
        assert_eq!(&trailer.miner_fee.as_bytes()[..], &bytes[40..48]);
        assert_eq!(&trailer.tx_count.as_bytes()[..], &bytes[48..52]);
        assert_eq!(&trailer.start_time.as_bytes()[..], &bytes[52..56]);
        assert_eq!(&trailer.difficulty.as_bytes()[..], &bytes[56..60]);
        assert_eq!(&trailer.merkle_root.as_bytes()[..], &bytes[60..92]);
        assert_eq!(&trailer.nonce.as_bytes()[..], &bytes[92..124]);
        assert_eq!(&trailer.solve_time.as_bytes()[..], &bytes[124..128]);
        assert_eq!(&trailer.block_hash.as_bytes()[..], &bytes[128..160]);
    }

    #[test]
    fn test_encode_is_exactly_160_bytes() {
        assert_eq!(Trailer::default().encode(), vec![0u8; TRAILER_LEN]);

        let bytes = counting_bytes();
        assert_eq!(Trailer::decode(&bytes).unwrap().encode(), bytes);
    }

    #[test]
    fn test_numeric_accessors() {
        let trailer = Trailer {
            block_number: U64Bytes::from_value(0x1234),
            miner_fee: U64Bytes::from_value(500),
            tx_count: U32Bytes::from_value(2),
            start_time: U32Bytes::from_value(1_700_000_000),
            difficulty: U32Bytes::from_value(18),
            solve_time: U32Bytes::from_value(1_700_000_060),
            ..Default::default()
        };

        assert_eq!(trailer.block_number_value(), 0x1234);
        assert_eq!(trailer.miner_fee_value(), 500);
        assert_eq!(trailer.tx_count_value(), 2);
        assert_eq!(trailer.start_time_value(), 1_700_000_000);
        assert_eq!(trailer.difficulty_value(), 18);
        assert_eq!(trailer.solve_time_value(), 1_700_000_060);
    }

    #[test]
    fn test_short_trailer() {
        assert_matches!(
            Trailer::decode(&[0u8; 159]),
            Err(DecodeError::Truncated {
                region: Region::Trailer,
                needed: 160,
                available: 159
            })
        );
    }
}
