//! Block header codec
//!
//! The header is a fixed 2220-byte prefix: a 4-byte little-endian length tag,
//! the 2208-byte miner address and the 8-byte little-endian miner reward. The
//! length tag doubles as the offset at which the body begins.

use crate::codec::{HeaderPolicy, WireFormat};
use crate::constants::{
    HEADER_ADDR_OFFSET, HEADER_LEN, HEADER_REWARD_OFFSET, HEADER_TAG, HEADER_TAG_OFFSET,
};
use crate::error::{DecodeError, Region};
use crate::types::Address;
use byteorder::{ByteOrder, LittleEndian};
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

/// Block header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Length tag; 2220 for this format version
    pub length: u32,
    pub miner_address: Address,
    pub miner_reward: u64,
}

impl Header {
    /// Create a header with the current format's length tag
    pub fn new(miner_address: Address, miner_reward: u64) -> Self {
        Self {
            length: HEADER_TAG,
            miner_address,
            miner_reward,
        }
    }

    /// Header with zero address and reward carrying the given tag
    pub fn empty(length: u32) -> Self {
        Self {
            length,
            miner_address: Address::zero(),
            miner_reward: 0,
        }
    }

    /// Check the length tag against the format constant
    pub fn is_valid(&self) -> bool {
        self.length == HEADER_TAG
    }

    /// Decode the header at the start of `bytes` under the given policy
    pub fn decode_with(bytes: &[u8], policy: HeaderPolicy) -> Result<Self, DecodeError> {
        if bytes.len() < HEADER_ADDR_OFFSET {
            return Err(DecodeError::truncated(
                Region::Header,
                HEADER_ADDR_OFFSET,
                bytes.len(),
            ));
        }

        let length = LittleEndian::read_u32(&bytes[HEADER_TAG_OFFSET..HEADER_ADDR_OFFSET]);
        if length != HEADER_TAG {
            return match policy {
                HeaderPolicy::Strict => Err(DecodeError::InvalidHeaderTag {
                    found: length,
                    expected: HEADER_TAG,
                }),
                HeaderPolicy::Lenient => {
                    warn!(tag = length, "header tag mismatch, returning empty header");
                    Ok(Self::empty(length))
                }
            };
        }

        if bytes.len() < HEADER_LEN {
            return Err(DecodeError::truncated(Region::Header, HEADER_LEN, bytes.len()));
        }

        let miner_address = Address::from_slice(&bytes[HEADER_ADDR_OFFSET..HEADER_REWARD_OFFSET])?;
        let miner_reward = LittleEndian::read_u64(&bytes[HEADER_REWARD_OFFSET..HEADER_LEN]);
        trace!(miner_reward, "decoded header");

        Ok(Self {
            length,
            miner_address,
            miner_reward,
        })
    }
}

impl WireFormat for Header {
    const SIZE: usize = HEADER_LEN;

    /// Strict decode: a wrong length tag is an error
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with(bytes, HeaderPolicy::Strict)
    }

    /// Always writes 2220 bytes; the length tag is written as stored, not re-validated
    fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.length.to_le_bytes());
        out.extend_from_slice(self.miner_address.as_bytes());
        out.extend_from_slice(&self.miner_reward.to_le_bytes());
    }
}
